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

//! Math value types used by the rendering contracts.
//!
//! Only the types needed to *carry* transforms and pixel dimensions live
//! here. Deriving a tile's transform from view state (projection, zoom,
//! pitch) is the embedding renderer's job, not this crate's.

pub mod dimension;
pub mod matrix;

pub use dimension::Extent2D;
pub use matrix::Mat4;
