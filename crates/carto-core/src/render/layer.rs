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

//! The layer kinds a bucket can be rendered under.
//!
//! Style evaluation happens upstream; these views carry only the already
//! evaluated paint values a dispatcher needs at draw time. The kinds form
//! a sum type so that bucket-to-layer associations are matched on a
//! variant, not discovered through a runtime cast.

use std::time::Duration;

/// The evaluated paint values of a raster layer.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterLayerView {
    /// The style-layer identifier, for diagnostics.
    pub name: String,
    /// Overall opacity, `0.0..=1.0`.
    pub opacity: f32,
    /// Minimum per-channel brightness, `0.0..=1.0`.
    pub brightness_min: f32,
    /// Maximum per-channel brightness, `0.0..=1.0`.
    pub brightness_max: f32,
    /// Saturation shift, `-1.0..=1.0`.
    pub saturation: f32,
    /// Contrast shift, `-1.0..=1.0`.
    pub contrast: f32,
    /// Cross-fade duration when a tile's texture generation changes.
    pub fade_duration: Duration,
}

impl RasterLayerView {
    /// Creates a view with neutral paint values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            opacity: 1.0,
            brightness_min: 0.0,
            brightness_max: 1.0,
            saturation: 0.0,
            contrast: 0.0,
            fade_duration: Duration::from_millis(300),
        }
    }
}

/// The evaluated paint values of a background layer.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayerView {
    /// The style-layer identifier, for diagnostics.
    pub name: String,
    /// Premultiplied RGBA fill color.
    pub color: [f32; 4],
}

/// A style layer resolved for rendering, by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderLayer {
    /// A layer that draws raster tiles.
    Raster(RasterLayerView),
    /// A layer that fills the viewport with a flat color.
    Background(BackgroundLayerView),
}

impl RenderLayer {
    /// Returns the raster view if this layer is raster-capable.
    pub fn as_raster(&self) -> Option<&RasterLayerView> {
        match self {
            RenderLayer::Raster(view) => Some(view),
            _ => None,
        }
    }

    /// The layer's style identifier.
    pub fn name(&self) -> &str {
        match self {
            RenderLayer::Raster(view) => &view.name,
            RenderLayer::Background(view) => &view.name,
        }
    }
}
