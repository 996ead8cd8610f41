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

use crate::image::PremultipliedImage;
use crate::render::api::{BufferId, RasterVertex, TextureId};
use crate::render::error::ResourceError;
use std::fmt::Debug;

/// The graphics context a bucket materializes its resources through.
///
/// All methods must be invoked from the execution context that owns the
/// underlying graphics device; callers serialize access (see the bucket's
/// threading contract). Failure surfaces as [`ResourceError`] and is not
/// retried or translated here.
pub trait GraphicsContext: Send + Sync + Debug + 'static {
    /// Creates a GPU texture holding a copy of the image's current pixels.
    /// ## Arguments
    /// * `image` - The decoded premultiplied pixel buffer to upload.
    /// ## Returns
    /// A `Result` containing the ID of the created texture or an error if
    /// the creation fails.
    fn create_texture(&self, image: &PremultipliedImage) -> Result<TextureId, ResourceError>;

    /// Creates a GPU vertex buffer, consuming the supplied geometry.
    ///
    /// The vertices are moved in; callers do not retain a CPU copy once
    /// the buffer exists.
    fn create_vertex_buffer(&self, vertices: Vec<RasterVertex>) -> Result<BufferId, ResourceError>;

    /// Creates a GPU index buffer, consuming the supplied indices.
    fn create_index_buffer(&self, indices: Vec<u16>) -> Result<BufferId, ResourceError>;

    /// Destroys a GPU texture.
    /// ## Arguments
    /// * `id` - The ID of the texture to be destroyed.
    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError>;

    /// Destroys a GPU buffer.
    /// ## Arguments
    /// * `id` - The ID of the buffer to be destroyed.
    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError>;
}
