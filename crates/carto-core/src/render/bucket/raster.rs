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

//! The raster bucket: the synchronization boundary between CPU-owned
//! pixel data and the GPU resources that display it.

use crate::image::{ImageHandle, PremultipliedImage};
use crate::math::Mat4;
use crate::render::api::{BufferId, RasterVertex, Segment, TextureId};
use crate::render::error::ResourceError;
use crate::render::layer::RenderLayer;
use crate::render::params::PaintParameters;
use crate::render::tile::RenderTile;
use crate::render::traits::{GraphicsContext, RenderDispatcher};
use std::mem;

/// Where the transform for a raster draw comes from.
#[derive(Debug, Clone, Copy)]
pub enum RasterPlacement<'a> {
    /// Normal tile-space rendering: the matrix is the tile's own.
    Tile(&'a RenderTile),
    /// Caller-supplied placement, e.g. a full-viewport overlay or a
    /// debug/preview draw outside normal tile indexing.
    Matrix(&'a Mat4),
}

/// Holds the GPU resources needed to draw one layer's raster contribution
/// to one tile.
///
/// The bucket owns a shared handle to the decoded pixels, lazily
/// materializes texture and vertex/index buffers from them on first
/// [`upload`](Self::upload), and hands itself to a [`RenderDispatcher`]
/// at draw time. It performs no GPU drawing itself.
///
/// ## Threading
///
/// The bucket has no interior synchronization. Construction and
/// [`set_image`](Self::set_image) may run on a loading thread;
/// [`upload`](Self::upload), [`render`](Self::render), and
/// [`destroy`](Self::destroy) must run on the thread that owns the
/// graphics context, and the two sides must serialize access to a given
/// bucket. GPU handles retired away from the context thread are kept on a
/// deferred-release list and destroyed through the context at the next
/// `upload` (or at `destroy`).
#[derive(Debug, Default)]
pub struct RasterBucket {
    image: Option<ImageHandle>,

    texture: Option<TextureId>,
    vertex_buffer: Option<BufferId>,
    index_buffer: Option<BufferId>,

    vertices: Vec<RasterVertex>,
    indices: Vec<u16>,
    segments: Vec<Segment>,

    // Handles whose owning generation ended off the context thread; they
    // are destroyed at the next operation that runs on it.
    retired_textures: Vec<TextureId>,
    retired_buffers: Vec<BufferId>,

    uploaded: bool,
}

impl RasterBucket {
    /// Creates a bucket that takes sole initial ownership of a freshly
    /// decoded image, wrapping it in a shared handle so later code may
    /// take further references.
    ///
    /// No GPU work happens here; construction is cheap and may run off
    /// the render thread.
    pub fn new(image: PremultipliedImage) -> Self {
        Self::from_shared(ImageHandle::new(image))
    }

    /// Creates a bucket over an already-shared image handle.
    pub fn from_shared(image: ImageHandle) -> Self {
        Self {
            image: Some(image),
            texture: None,
            vertex_buffer: None,
            index_buffer: None,
            vertices: Vec::new(),
            indices: Vec::new(),
            segments: Vec::new(),
            retired_textures: Vec::new(),
            retired_buffers: Vec::new(),
            uploaded: false,
        }
    }

    /// Returns `true` if the bucket has pixels to render.
    ///
    /// Purely a statement about CPU data; GPU state never affects it.
    pub fn has_data(&self) -> bool {
        self.image.is_some()
    }

    /// Returns `true` once GPU resources reflect the current image and
    /// geometry generation.
    pub fn is_uploaded(&self) -> bool {
        self.uploaded
    }

    /// The shared image handle, if any.
    pub fn image(&self) -> Option<&ImageHandle> {
        self.image.as_ref()
    }

    /// The GPU texture handle, once uploaded.
    pub fn texture(&self) -> Option<TextureId> {
        self.texture
    }

    /// The GPU vertex buffer handle, once uploaded with geometry.
    pub fn vertex_buffer(&self) -> Option<BufferId> {
        self.vertex_buffer
    }

    /// The GPU index buffer handle, once uploaded with geometry.
    pub fn index_buffer(&self) -> Option<BufferId> {
        self.index_buffer
    }

    /// The draw ranges over the bucket's buffers.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Replaces the CPU-side geometry the next [`upload`](Self::upload)
    /// will materialize.
    ///
    /// Supplied by the tile pipeline's tessellation step, typically
    /// before the first upload or after [`clear`](Self::clear).
    pub fn set_geometry(
        &mut self,
        vertices: Vec<RasterVertex>,
        indices: Vec<u16>,
        segments: Vec<Segment>,
    ) {
        self.vertices = vertices;
        self.indices = indices;
        self.segments = segments;
    }

    /// Materializes GPU resources for the current image and geometry.
    ///
    /// Without an image this is a no-op, not an error: a tile may simply
    /// not have finished loading. The texture is created at most once per
    /// image generation; calling `upload` again before
    /// [`set_image`](Self::set_image) reuses it. Non-empty geometry moves
    /// into freshly created vertex/index buffers and the local copies are
    /// released.
    ///
    /// Must be invoked on the thread that owns `context`. Failures from
    /// the context propagate unchanged; the bucket does not retry.
    pub fn upload(&mut self, context: &dyn GraphicsContext) -> Result<(), ResourceError> {
        self.release_retired(context);

        let Some(image) = &self.image else {
            return Ok(());
        };
        if self.texture.is_none() {
            self.texture = Some(context.create_texture(image)?);
        }
        if !self.vertices.is_empty() {
            let vertices = mem::take(&mut self.vertices);
            let indices = mem::take(&mut self.indices);
            let vertex_buffer = context.create_vertex_buffer(vertices)?;
            if let Some(old) = self.vertex_buffer.replace(vertex_buffer) {
                Self::destroy_buffer_or_warn(context, old);
            }
            let index_buffer = context.create_index_buffer(indices)?;
            if let Some(old) = self.index_buffer.replace(index_buffer) {
                Self::destroy_buffer_or_warn(context, old);
            }
        }
        self.uploaded = true;
        Ok(())
    }

    /// Drops buffers, geometry, and segment bookkeeping, and resets the
    /// uploaded flag. Safe to call repeatedly.
    ///
    /// The texture handle is deliberately preserved: geometry is cheap to
    /// rebuild, re-uploading pixels is not. Only
    /// [`set_image`](Self::set_image) or [`destroy`](Self::destroy)
    /// retires the texture. Used when the bucket's tile is evicted but
    /// the object itself is pooled for reuse.
    pub fn clear(&mut self) {
        self.retired_buffers.extend(self.vertex_buffer.take());
        self.retired_buffers.extend(self.index_buffer.take());
        self.segments.clear();
        self.vertices.clear();
        self.indices.clear();

        self.uploaded = false;
    }

    /// Replaces the image with a new shared handle, retiring the texture
    /// so the next [`upload`](Self::upload) recreates it from the new
    /// pixels.
    ///
    /// Always invalidates, even if the new image is pixel-identical to
    /// the old one. Vertex and index buffers are untouched; geometry is
    /// independent of image content. May run off the render thread.
    pub fn set_image(&mut self, image: ImageHandle) {
        self.image = Some(image);
        self.retired_textures.extend(self.texture.take());
        self.uploaded = false;
    }

    /// Releases every GPU handle the bucket owns, including the texture.
    ///
    /// The owning tile calls this on the render thread before dropping
    /// the bucket; the graphics context must still be alive. The image
    /// handle survives, so the bucket can be uploaded again later.
    pub fn destroy(&mut self, context: &dyn GraphicsContext) {
        self.retired_textures.extend(self.texture.take());
        self.retired_buffers.extend(self.vertex_buffer.take());
        self.retired_buffers.extend(self.index_buffer.take());
        self.release_retired(context);
        self.segments.clear();
        self.vertices.clear();
        self.indices.clear();
        self.uploaded = false;
    }

    /// Dispatches a draw of this bucket to the rendering façade.
    ///
    /// `placement` selects between the tile's own matrix and an explicit
    /// caller-supplied one; the dispatcher receives the resolved matrix
    /// plus the `explicit_matrix` discriminant. The dispatcher is invoked
    /// whether or not the bucket has data; an absent texture is its
    /// concern.
    ///
    /// ## Panics
    /// Panics if `layer` is not raster-capable. That is a programming
    /// error in the caller's bucket-to-layer association, not a runtime
    /// condition.
    pub fn render(
        &self,
        dispatcher: &mut dyn RenderDispatcher,
        parameters: &PaintParameters,
        layer: &RenderLayer,
        placement: RasterPlacement<'_>,
    ) {
        let raster = layer
            .as_raster()
            .expect("raster bucket rendered under a non-raster layer");
        let (matrix, explicit_matrix) = match placement {
            RasterPlacement::Tile(tile) => (tile.matrix(), false),
            RasterPlacement::Matrix(matrix) => (matrix, true),
        };
        dispatcher.render_raster(parameters, self, raster, matrix, explicit_matrix);
    }

    fn release_retired(&mut self, context: &dyn GraphicsContext) {
        for id in self.retired_textures.drain(..) {
            if let Err(err) = context.destroy_texture(id) {
                log::warn!("Failed to destroy retired texture {id:?}: {err}");
            }
        }
        for id in self.retired_buffers.drain(..) {
            Self::destroy_buffer_or_warn(context, id);
        }
    }

    fn destroy_buffer_or_warn(context: &dyn GraphicsContext, id: BufferId) {
        if let Err(err) = context.destroy_buffer(id) {
            log::warn!("Failed to destroy buffer {id:?}: {err}");
        }
    }

    fn live_handle_count(&self) -> usize {
        usize::from(self.texture.is_some())
            + usize::from(self.vertex_buffer.is_some())
            + usize::from(self.index_buffer.is_some())
            + self.retired_textures.len()
            + self.retired_buffers.len()
    }
}

impl Drop for RasterBucket {
    fn drop(&mut self) {
        let live = self.live_handle_count();
        if live > 0 {
            log::warn!(
                "RasterBucket dropped with {live} live GPU handle(s); destroy() should run on the render thread first"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::PremultipliedImage;
    use crate::math::Extent2D;
    use crate::render::api::tile_quad;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Counts creations and records destructions; IDs are never reused.
    #[derive(Debug, Default)]
    struct CountingContext {
        next_id: AtomicUsize,
        textures_created: AtomicUsize,
        buffers_created: AtomicUsize,
        destroyed_textures: Mutex<Vec<TextureId>>,
        destroyed_buffers: Mutex<Vec<BufferId>>,
    }

    impl GraphicsContext for CountingContext {
        fn create_texture(
            &self,
            _image: &PremultipliedImage,
        ) -> Result<TextureId, ResourceError> {
            self.textures_created.fetch_add(1, Ordering::Relaxed);
            Ok(TextureId(self.next_id.fetch_add(1, Ordering::Relaxed)))
        }

        fn create_vertex_buffer(
            &self,
            _vertices: Vec<RasterVertex>,
        ) -> Result<BufferId, ResourceError> {
            self.buffers_created.fetch_add(1, Ordering::Relaxed);
            Ok(BufferId(self.next_id.fetch_add(1, Ordering::Relaxed)))
        }

        fn create_index_buffer(&self, _indices: Vec<u16>) -> Result<BufferId, ResourceError> {
            self.buffers_created.fetch_add(1, Ordering::Relaxed);
            Ok(BufferId(self.next_id.fetch_add(1, Ordering::Relaxed)))
        }

        fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
            self.destroyed_textures.lock().unwrap().push(id);
            Ok(())
        }

        fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
            self.destroyed_buffers.lock().unwrap().push(id);
            Ok(())
        }
    }

    fn test_image() -> PremultipliedImage {
        PremultipliedImage::new(Extent2D::new(2, 2))
    }

    #[test]
    fn test_empty_bucket_upload_is_noop() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::default();

        assert!(!bucket.has_data());
        bucket.upload(&context).unwrap();
        assert!(!bucket.is_uploaded());
        assert_eq!(context.textures_created.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_has_data_before_upload() {
        let bucket = RasterBucket::new(test_image());
        assert!(bucket.has_data());
        assert!(!bucket.is_uploaded());
        assert!(bucket.texture().is_none());
    }

    #[test]
    fn test_upload_is_idempotent_per_generation() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::new(test_image());

        bucket.upload(&context).unwrap();
        let first = bucket.texture().unwrap();
        bucket.upload(&context).unwrap();
        assert_eq!(bucket.texture().unwrap(), first);
        assert_eq!(context.textures_created.load(Ordering::Relaxed), 1);

        bucket.destroy(&context);
    }

    #[test]
    fn test_upload_without_geometry_creates_no_buffers() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::new(test_image());

        bucket.upload(&context).unwrap();
        assert!(bucket.is_uploaded());
        assert!(bucket.texture().is_some());
        assert!(bucket.vertex_buffer().is_none());
        assert!(bucket.index_buffer().is_none());
        assert_eq!(context.buffers_created.load(Ordering::Relaxed), 0);

        bucket.destroy(&context);
    }

    #[test]
    fn test_clear_keeps_image_and_texture() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::new(test_image());
        let quad = tile_quad();
        bucket.set_geometry(quad.vertices, quad.indices, vec![quad.segment]);

        bucket.upload(&context).unwrap();
        let texture = bucket.texture().unwrap();
        let vertex_buffer = bucket.vertex_buffer().unwrap();
        let index_buffer = bucket.index_buffer().unwrap();

        bucket.clear();
        assert!(bucket.has_data());
        assert!(!bucket.is_uploaded());
        assert_eq!(bucket.texture(), Some(texture));
        assert!(bucket.vertex_buffer().is_none());
        assert!(bucket.segments().is_empty());

        // The retired buffers reach the context at the next upload.
        bucket.upload(&context).unwrap();
        let destroyed = context.destroyed_buffers.lock().unwrap().clone();
        assert_eq!(destroyed, vec![vertex_buffer, index_buffer]);
        // No geometry was re-supplied, so no buffers were recreated.
        assert!(bucket.vertex_buffer().is_none());
        assert_eq!(context.textures_created.load(Ordering::Relaxed), 1);

        bucket.destroy(&context);
    }

    #[test]
    fn test_set_image_retires_texture() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::new(test_image());

        bucket.upload(&context).unwrap();
        let first = bucket.texture().unwrap();

        bucket.set_image(ImageHandle::new(test_image()));
        assert!(!bucket.is_uploaded());
        assert!(bucket.texture().is_none());

        bucket.upload(&context).unwrap();
        let second = bucket.texture().unwrap();
        assert_ne!(first, second);
        assert_eq!(
            context.destroyed_textures.lock().unwrap().clone(),
            vec![first]
        );

        bucket.destroy(&context);
    }

    #[test]
    fn test_destroy_releases_everything() {
        let context = CountingContext::default();
        let mut bucket = RasterBucket::new(test_image());
        let quad = tile_quad();
        bucket.set_geometry(quad.vertices, quad.indices, vec![quad.segment]);
        bucket.upload(&context).unwrap();

        bucket.destroy(&context);
        assert!(bucket.texture().is_none());
        assert!(bucket.vertex_buffer().is_none());
        assert!(bucket.index_buffer().is_none());
        assert!(!bucket.is_uploaded());
        assert!(bucket.has_data());
        assert_eq!(context.destroyed_textures.lock().unwrap().len(), 1);
        assert_eq!(context.destroyed_buffers.lock().unwrap().len(), 2);
        assert_eq!(bucket.live_handle_count(), 0);
    }
}
