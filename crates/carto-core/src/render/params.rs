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

//! Per-frame parameters handed through to the render dispatcher.

use crate::carto_bitflags;

carto_bitflags! {
    /// Debug overlays the embedding renderer may enable for a frame.
    pub struct DebugOptions: u32 {
        /// Draw tile boundaries.
        const TILE_BORDERS = 1 << 0;
        /// Overlay tile load/parse status.
        const PARSE_STATUS = 1 << 1;
        /// Overlay tile timestamps.
        const TIMESTAMPS = 1 << 2;
        /// Visualize overdraw instead of normal compositing.
        const OVERDRAW = 1 << 3;
    }
}

/// The pass a draw is issued in.
///
/// Raster draws blend, so they run in the translucent pass; the split
/// matters to the dispatcher's depth and blend state selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    /// Front-to-back pass for fully opaque draws.
    Opaque,
    /// Back-to-front pass for blended draws.
    Translucent,
}

/// A collection of per-frame values that affect how a bucket is drawn.
#[derive(Debug, Clone)]
pub struct PaintParameters {
    /// The view's current zoom level.
    pub zoom: f64,
    /// Device pixel ratio of the target surface.
    pub pixel_ratio: f32,
    /// Which pass the current draw belongs to.
    pub pass: PassKind,
    /// Debug overlays active this frame.
    pub debug: DebugOptions,
}

impl Default for PaintParameters {
    fn default() -> Self {
        Self {
            zoom: 0.0,
            pixel_ratio: 1.0,
            pass: PassKind::Translucent,
            debug: DebugOptions::EMPTY,
        }
    }
}
