// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Backend-agnostic resource types.
//!
//! Organized into several logical sub-modules:
//!
//! - **[`buffer`]**: GPU buffer handles and usage flags.
//! - **[`texture`]**: GPU texture handles, formats, and usage flags.
//! - **[`geometry`]**: the raster vertex layout, draw segments, and the
//!   static tile quad.

pub mod buffer;
pub mod geometry;
pub mod texture;

pub use buffer::{BufferId, BufferUsage};
pub use geometry::{tile_quad, QuadGeometry, RasterVertex, Segment, TILE_EXTENT};
pub use texture::{TextureFormat, TextureId, TextureUsage};
