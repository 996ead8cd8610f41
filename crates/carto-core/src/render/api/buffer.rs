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

//! Defines data structures related to GPU buffer resources.

use crate::carto_bitflags;

carto_bitflags! {
    /// A set of flags describing the allowed usages of a [`BufferId`].
    ///
    /// The graphics backend uses these to place the buffer in the most
    /// optimal memory type and to validate usage at runtime.
    pub struct BufferUsage: u32 {
        /// The buffer can be used as the destination of a copy operation.
        const COPY_DST = 1 << 0;
        /// The buffer can be bound as a vertex buffer.
        const VERTEX = 1 << 1;
        /// The buffer can be bound as an index buffer.
        const INDEX = 1 << 2;
    }
}

/// An opaque handle to a GPU buffer resource.
///
/// This ID is returned by [`GraphicsContext::create_vertex_buffer`] and
/// [`GraphicsContext::create_index_buffer`] and is used to reference the
/// buffer in all subsequent operations, including destruction.
///
/// [`GraphicsContext::create_vertex_buffer`]: crate::render::traits::GraphicsContext::create_vertex_buffer
/// [`GraphicsContext::create_index_buffer`]: crate::render::traits::GraphicsContext::create_index_buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferId(pub usize);
