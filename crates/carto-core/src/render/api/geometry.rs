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

//! The CPU-side geometry a raster bucket carries until upload.
//!
//! Tessellation (subdividing a tile quad against the projection) is the
//! tile pipeline's job; this module only defines the vertex layout that
//! pipeline produces, plus the trivial single-quad case every raster tile
//! starts from.

use bytemuck::{Pod, Zeroable};

/// The coordinate extent of one tile, in tile-local units.
///
/// Both vertex positions and texture coordinates of a tile quad span
/// `0..=TILE_EXTENT`; the tile-space matrix maps this range onto the tile's
/// on-screen footprint.
pub const TILE_EXTENT: u16 = 8192;

/// One vertex of tessellated raster geometry.
///
/// The layout is GPU-bound: two 16-bit signed position components in
/// tile-local units and two 16-bit unsigned texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RasterVertex {
    /// Position within the tile, `0..=TILE_EXTENT`.
    pub position: [i16; 2],
    /// Texture coordinate, `0..=TILE_EXTENT`.
    pub texture_coordinate: [u16; 2],
}

impl RasterVertex {
    /// Creates a vertex from a tile-local position and texture coordinate.
    pub const fn new(position: [i16; 2], texture_coordinate: [u16; 2]) -> Self {
        Self {
            position,
            texture_coordinate,
        }
    }
}

/// A contiguous draw range within a bucket's vertex and index buffers.
///
/// Buffers are bound once per bucket; segments let a single pair of
/// buffers carry several primitive runs (e.g. a subdivided quad), each
/// drawn with its own offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Offset of the first vertex of this segment.
    pub vertex_offset: usize,
    /// Offset of the first index of this segment.
    pub index_offset: usize,
    /// Number of vertices covered by this segment.
    pub vertex_length: usize,
    /// Number of indices covered by this segment.
    pub index_length: usize,
}

/// Geometry for one quad: four vertices, two triangles, one segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuadGeometry {
    /// The quad's vertices.
    pub vertices: Vec<RasterVertex>,
    /// Triangle indices into `vertices`.
    pub indices: Vec<u16>,
    /// The single draw range covering the quad.
    pub segment: Segment,
}

/// Builds the static full-tile quad spanning `0..=TILE_EXTENT` in both
/// position and texture space.
pub fn tile_quad() -> QuadGeometry {
    let max = TILE_EXTENT;
    QuadGeometry {
        vertices: vec![
            RasterVertex::new([0, 0], [0, 0]),
            RasterVertex::new([max as i16, 0], [max, 0]),
            RasterVertex::new([0, max as i16], [0, max]),
            RasterVertex::new([max as i16, max as i16], [max, max]),
        ],
        indices: vec![0, 1, 2, 1, 2, 3],
        segment: Segment {
            vertex_offset: 0,
            index_offset: 0,
            vertex_length: 4,
            index_length: 6,
        },
    }
}
