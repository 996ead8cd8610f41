use carto_core::image::{ImageHandle, PremultipliedImage};
use carto_core::math::{Extent2D, Mat4};
use carto_core::render::api::{tile_quad, BufferId, RasterVertex, TextureId};
use carto_core::render::{
    GraphicsContext, PaintParameters, RasterBucket, RasterLayerView, RasterPlacement,
    RenderDispatcher, RenderLayer, RenderTile, ResourceError, TileCoordinate,
};
use std::sync::Mutex;

/// Records every resource operation, keyed by monotonically growing IDs,
/// and remembers which pixels each texture was created from.
#[derive(Debug, Default)]
struct RecordingContext {
    state: Mutex<ContextState>,
}

#[derive(Debug, Default)]
struct ContextState {
    next_id: usize,
    texture_pixels: Vec<(TextureId, Vec<u8>)>,
    live_textures: Vec<TextureId>,
    live_buffers: Vec<BufferId>,
    vertex_uploads: Vec<usize>,
    index_uploads: Vec<usize>,
}

impl RecordingContext {
    fn texture_pixels(&self, id: TextureId) -> Vec<u8> {
        let state = self.state.lock().unwrap();
        state
            .texture_pixels
            .iter()
            .find(|(texture, _)| *texture == id)
            .map(|(_, pixels)| pixels.clone())
            .expect("texture was never created")
    }

    fn live_texture_count(&self) -> usize {
        self.state.lock().unwrap().live_textures.len()
    }

    fn live_buffer_count(&self) -> usize {
        self.state.lock().unwrap().live_buffers.len()
    }

    fn vertex_upload_count(&self) -> usize {
        self.state.lock().unwrap().vertex_uploads.len()
    }
}

impl GraphicsContext for RecordingContext {
    fn create_texture(&self, image: &PremultipliedImage) -> Result<TextureId, ResourceError> {
        let mut state = self.state.lock().unwrap();
        let id = TextureId(state.next_id);
        state.next_id += 1;
        state.texture_pixels.push((id, image.pixels().to_vec()));
        state.live_textures.push(id);
        Ok(id)
    }

    fn create_vertex_buffer(&self, vertices: Vec<RasterVertex>) -> Result<BufferId, ResourceError> {
        let mut state = self.state.lock().unwrap();
        let id = BufferId(state.next_id);
        state.next_id += 1;
        state.vertex_uploads.push(vertices.len());
        state.live_buffers.push(id);
        Ok(id)
    }

    fn create_index_buffer(&self, indices: Vec<u16>) -> Result<BufferId, ResourceError> {
        let mut state = self.state.lock().unwrap();
        let id = BufferId(state.next_id);
        state.next_id += 1;
        state.index_uploads.push(indices.len());
        state.live_buffers.push(id);
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .live_textures
            .iter()
            .position(|&live| live == id)
            .ok_or(ResourceError::NotFound)?;
        state.live_textures.remove(index);
        Ok(())
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut state = self.state.lock().unwrap();
        let index = state
            .live_buffers
            .iter()
            .position(|&live| live == id)
            .ok_or(ResourceError::NotFound)?;
        state.live_buffers.remove(index);
        Ok(())
    }
}

/// Captures what the bucket hands to the rendering façade.
#[derive(Debug, Default)]
struct RecordingDispatcher {
    calls: Vec<DispatchCall>,
}

#[derive(Debug)]
struct DispatchCall {
    layer_name: String,
    matrix: Mat4,
    explicit_matrix: bool,
    texture: Option<TextureId>,
}

impl RenderDispatcher for RecordingDispatcher {
    fn render_raster(
        &mut self,
        _parameters: &PaintParameters,
        bucket: &RasterBucket,
        layer: &RasterLayerView,
        matrix: &Mat4,
        explicit_matrix: bool,
    ) {
        self.calls.push(DispatchCall {
            layer_name: layer.name.clone(),
            matrix: *matrix,
            explicit_matrix,
            texture: bucket.texture(),
        });
    }
}

/// A 1x1 image whose single premultiplied pixel is `fill`.
fn solid_image(fill: [u8; 4]) -> PremultipliedImage {
    PremultipliedImage::from_raw(Extent2D::new(1, 1), fill.to_vec()).unwrap()
}

#[test]
fn image_swap_recreates_texture_from_new_pixels() {
    let context = RecordingContext::default();
    let mut bucket = RasterBucket::new(solid_image([10, 0, 0, 255]));

    bucket.upload(&context).unwrap();
    assert!(bucket.is_uploaded());
    let first = bucket.texture().unwrap();
    assert_eq!(context.texture_pixels(first), vec![10, 0, 0, 255]);

    bucket.set_image(ImageHandle::new(solid_image([0, 20, 0, 255])));
    assert!(!bucket.is_uploaded());

    bucket.upload(&context).unwrap();
    let second = bucket.texture().unwrap();
    assert_ne!(first, second);
    assert_eq!(context.texture_pixels(second), vec![0, 20, 0, 255]);

    // The first generation's texture was released through the context.
    assert_eq!(context.live_texture_count(), 1);

    bucket.destroy(&context);
    assert_eq!(context.live_texture_count(), 0);
}

#[test]
fn upload_without_geometry_leaves_buffers_absent() {
    let context = RecordingContext::default();
    let mut bucket = RasterBucket::new(solid_image([1, 2, 3, 255]));

    bucket.upload(&context).unwrap();
    assert!(bucket.texture().is_some());
    assert!(bucket.vertex_buffer().is_none());
    assert!(bucket.index_buffer().is_none());
    assert_eq!(context.live_buffer_count(), 0);

    bucket.destroy(&context);
}

#[test]
fn geometry_moves_into_buffers_once() {
    let context = RecordingContext::default();
    let mut bucket = RasterBucket::new(solid_image([1, 2, 3, 255]));
    let quad = tile_quad();
    bucket.set_geometry(quad.vertices, quad.indices, vec![quad.segment]);

    bucket.upload(&context).unwrap();
    let vertex_buffer = bucket.vertex_buffer().unwrap();
    assert_eq!(bucket.segments().len(), 1);

    // A second upload has no local geometry left and reuses the buffers.
    bucket.upload(&context).unwrap();
    assert_eq!(bucket.vertex_buffer().unwrap(), vertex_buffer);
    assert_eq!(context.vertex_upload_count(), 1);

    bucket.destroy(&context);
}

#[test]
fn clear_then_resupplied_geometry_recreates_buffers() {
    let context = RecordingContext::default();
    let mut bucket = RasterBucket::new(solid_image([1, 2, 3, 255]));
    let quad = tile_quad();
    bucket.set_geometry(quad.vertices, quad.indices, vec![quad.segment]);
    bucket.upload(&context).unwrap();
    let first_vertex_buffer = bucket.vertex_buffer().unwrap();

    bucket.clear();
    assert!(bucket.has_data());
    assert!(!bucket.is_uploaded());

    let quad = tile_quad();
    bucket.set_geometry(quad.vertices, quad.indices, vec![quad.segment]);
    bucket.upload(&context).unwrap();
    let second_vertex_buffer = bucket.vertex_buffer().unwrap();
    assert_ne!(first_vertex_buffer, second_vertex_buffer);

    // The cleared generation's buffers are gone; only the new pair lives.
    assert_eq!(context.live_buffer_count(), 2);

    bucket.destroy(&context);
    assert_eq!(context.live_buffer_count(), 0);
}

#[test]
fn render_dispatches_tile_and_explicit_placements() {
    let mut dispatcher = RecordingDispatcher::default();
    let bucket = RasterBucket::new(solid_image([1, 2, 3, 255]));
    let layer = RenderLayer::Raster(RasterLayerView::new("satellite"));
    let parameters = PaintParameters::default();

    let tile_matrix = Mat4::from_translation(4.0, 8.0, 0.0);
    let tile = RenderTile::new(TileCoordinate { z: 2, x: 1, y: 3 }, tile_matrix);
    bucket.render(
        &mut dispatcher,
        &parameters,
        &layer,
        RasterPlacement::Tile(&tile),
    );

    let overlay_matrix = Mat4::from_scale(2.0, 2.0, 1.0);
    bucket.render(
        &mut dispatcher,
        &parameters,
        &layer,
        RasterPlacement::Matrix(&overlay_matrix),
    );

    assert_eq!(dispatcher.calls.len(), 2);
    assert_eq!(dispatcher.calls[0].layer_name, "satellite");
    assert_eq!(dispatcher.calls[0].matrix, tile_matrix);
    assert!(!dispatcher.calls[0].explicit_matrix);
    assert_eq!(dispatcher.calls[1].matrix, overlay_matrix);
    assert!(dispatcher.calls[1].explicit_matrix);
}

#[test]
fn render_without_data_still_reaches_dispatcher() {
    let mut dispatcher = RecordingDispatcher::default();
    let bucket = RasterBucket::default();
    let layer = RenderLayer::Raster(RasterLayerView::new("satellite"));

    let matrix = Mat4::IDENTITY;
    bucket.render(
        &mut dispatcher,
        &PaintParameters::default(),
        &layer,
        RasterPlacement::Matrix(&matrix),
    );

    // The dispatcher decides what an absent texture means.
    assert_eq!(dispatcher.calls.len(), 1);
    assert!(dispatcher.calls[0].texture.is_none());
}

#[test]
#[should_panic(expected = "non-raster layer")]
fn render_under_non_raster_layer_is_a_contract_violation() {
    let mut dispatcher = RecordingDispatcher::default();
    let bucket = RasterBucket::default();
    let layer = RenderLayer::Background(carto_core::render::BackgroundLayerView {
        name: "bg".to_string(),
        color: [0.0, 0.0, 0.0, 1.0],
    });

    let matrix = Mat4::IDENTITY;
    bucket.render(
        &mut dispatcher,
        &PaintParameters::default(),
        &layer,
        RasterPlacement::Matrix(&matrix),
    );
}
