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

//! Provides the public, backend-agnostic rendering contracts for carto.
//!
//! This module defines the "common language" between the tile pipeline
//! and the embedding renderer: the abstract `traits` (like
//! [`GraphicsContext`]), resource handle types, and the [`RasterBucket`]
//! that ties them together. The 'how' of the GPU side is handled by a
//! concrete backend in the `carto-infra` crate which implements these
//! traits.

pub mod api;
pub mod bucket;
pub mod error;
pub mod layer;
pub mod params;
pub mod tile;
pub mod traits;

// Re-export the most important traits and types for easier use.
pub use self::api::{BufferId, RasterVertex, Segment, TextureId};
pub use self::bucket::{RasterBucket, RasterPlacement};
pub use self::error::ResourceError;
pub use self::layer::{BackgroundLayerView, RasterLayerView, RenderLayer};
pub use self::params::{DebugOptions, PaintParameters, PassKind};
pub use self::tile::{RenderTile, TileCoordinate};
pub use self::traits::{GraphicsContext, RenderDispatcher};
