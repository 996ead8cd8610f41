use carto_core::image::PremultipliedImage;
use carto_core::math::Extent2D;
use carto_core::render::traits::GraphicsContext;
use carto_infra::{ContextSettings, WgpuContext, WgpuGraphicsContext};

/// Bootstraps a headless context and runs one texture round trip.
///
/// Environments without any graphics adapter (bare CI runners) are
/// common, so an adapter failure skips rather than fails.
#[test]
fn bootstrap_and_create_texture_if_adapter_available() {
    let _ = env_logger::builder().is_test(true).try_init();

    let settings = ContextSettings {
        allow_fallback_adapter: true,
        ..ContextSettings::default()
    };
    let context = match WgpuContext::new_blocking(&settings) {
        Ok(context) => context,
        Err(err) => {
            eprintln!("skipping: no graphics adapter available: {err}");
            return;
        }
    };
    log::info!("Selected adapter: {}", context.adapter_name());

    let graphics = WgpuGraphicsContext::new(context);
    assert_eq!(graphics.vram_allocated_bytes(), 0);

    let image = PremultipliedImage::new(Extent2D::new(16, 16));
    let texture = graphics.create_texture(&image).unwrap();
    assert!(graphics.get_wgpu_texture(texture).is_some());
    assert_eq!(graphics.vram_allocated_bytes(), 16 * 16 * 4);

    graphics.destroy_texture(texture).unwrap();
    assert_eq!(graphics.vram_allocated_bytes(), 0);
    assert!(graphics.get_wgpu_texture(texture).is_none());
}
