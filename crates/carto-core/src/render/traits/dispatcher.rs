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

use crate::math::Mat4;
use crate::render::bucket::RasterBucket;
use crate::render::layer::RasterLayerView;
use crate::render::params::PaintParameters;

/// The rendering façade a bucket hands itself to.
///
/// Implementations read the bucket's texture and buffer handles and issue
/// the actual draw; the bucket never touches the GPU command stream
/// itself. Lives in the embedding renderer.
pub trait RenderDispatcher {
    /// Draws one raster bucket under one raster layer.
    ///
    /// ## Arguments
    /// * `parameters` - Per-frame render parameters.
    /// * `bucket` - The bucket whose resources to draw. May have no
    ///   texture (e.g. tile still loading); handling that is the
    ///   dispatcher's responsibility.
    /// * `layer` - The resolved raster layer's paint values.
    /// * `matrix` - The transform to draw under.
    /// * `explicit_matrix` - `false` when `matrix` was derived from a
    ///   tile's position in the view, `true` when the caller supplied it
    ///   directly (e.g. a full-viewport overlay). The distinction may
    ///   affect sampling or clipping on the dispatcher side.
    fn render_raster(
        &mut self,
        parameters: &PaintParameters,
        bucket: &RasterBucket,
        layer: &RasterLayerView,
        matrix: &Mat4,
        explicit_matrix: bool,
    );
}
