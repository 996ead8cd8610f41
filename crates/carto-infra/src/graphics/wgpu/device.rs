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

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wgpu::util::DeviceExt;

use carto_core::image::PremultipliedImage;
use carto_core::render::api::{
    BufferId, BufferUsage, RasterVertex, TextureFormat, TextureId, TextureUsage,
};
use carto_core::render::error::ResourceError;
use carto_core::render::traits::GraphicsContext;

use crate::graphics::wgpu::context::WgpuContext;
use crate::graphics::wgpu::conversions::IntoWgpu;

/// The texel format raster tiles upload as.
const RASTER_TEXTURE_FORMAT: TextureFormat = TextureFormat::Rgba8UnormSrgb;

#[derive(Debug)]
struct WgpuBufferEntry {
    wgpu_buffer: Arc<wgpu::Buffer>,
    size: u64, // To track VRAM accurately on destruction
}

#[derive(Debug)]
struct WgpuTextureEntry {
    wgpu_texture: Arc<wgpu::Texture>,
    size: u64, // To track VRAM accurately on destruction
}

/// The internal, non-clonable state of the graphics context.
#[derive(Debug)]
struct WgpuGraphicsContextInternal {
    context: WgpuContext,
    buffers: Mutex<HashMap<BufferId, WgpuBufferEntry>>,
    textures: Mutex<HashMap<TextureId, WgpuTextureEntry>>,

    next_buffer_id: AtomicUsize,
    next_texture_id: AtomicUsize,

    // VRAM Tracking
    vram_allocated_bytes: AtomicUsize,
    vram_peak_bytes: AtomicU64,
}

/// A clonable, thread-safe handle to the wgpu-backed graphics context.
///
/// It wraps the actual state in an `Arc`, allowing it to be shared with
/// whatever owns the frame loop. Resource handles it returns are opaque
/// IDs; the wgpu objects behind them can be fetched for draw recording
/// via [`get_wgpu_texture`](Self::get_wgpu_texture) and
/// [`get_wgpu_buffer`](Self::get_wgpu_buffer).
#[derive(Clone, Debug)]
pub struct WgpuGraphicsContext {
    internal: Arc<WgpuGraphicsContextInternal>,
}

impl WgpuGraphicsContext {
    /// Wraps an initialized [`WgpuContext`].
    pub fn new(context: WgpuContext) -> Self {
        Self {
            internal: Arc::new(WgpuGraphicsContextInternal {
                context,
                buffers: Mutex::new(HashMap::new()),
                textures: Mutex::new(HashMap::new()),
                next_buffer_id: AtomicUsize::new(0),
                next_texture_id: AtomicUsize::new(0),
                vram_allocated_bytes: AtomicUsize::new(0),
                vram_peak_bytes: AtomicU64::new(0),
            }),
        }
    }

    // --- ID Generation Helpers ---

    fn generate_buffer_id(&self) -> BufferId {
        BufferId(self.internal.next_buffer_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_texture_id(&self) -> TextureId {
        TextureId(
            self.internal
                .next_texture_id
                .fetch_add(1, Ordering::Relaxed),
        )
    }

    fn track_vram_allocation(&self, size: u64) {
        self.internal
            .vram_allocated_bytes
            .fetch_add(size as usize, Ordering::Relaxed);
        let current_vram = self.internal.vram_allocated_bytes.load(Ordering::Relaxed) as u64;
        self.internal
            .vram_peak_bytes
            .fetch_max(current_vram, Ordering::Relaxed);
    }

    /// Retrieves a reference-counted pointer to the internal WGPU texture.
    /// Returns `None` if the ID is invalid.
    pub fn get_wgpu_texture(&self, id: TextureId) -> Option<Arc<wgpu::Texture>> {
        let textures = self.internal.textures.lock().unwrap();
        textures
            .get(&id)
            .map(|entry| Arc::clone(&entry.wgpu_texture))
    }

    /// Retrieves a reference-counted pointer to the internal WGPU buffer.
    /// Returns `None` if the ID is invalid.
    pub fn get_wgpu_buffer(&self, id: BufferId) -> Option<Arc<wgpu::Buffer>> {
        let buffers = self.internal.buffers.lock().unwrap();
        buffers.get(&id).map(|entry| Arc::clone(&entry.wgpu_buffer))
    }

    /// The number of bytes of VRAM currently attributed to live resources.
    pub fn vram_allocated_bytes(&self) -> usize {
        self.internal.vram_allocated_bytes.load(Ordering::Relaxed)
    }

    /// The high-water mark of attributed VRAM since creation.
    pub fn vram_peak_bytes(&self) -> u64 {
        self.internal.vram_peak_bytes.load(Ordering::Relaxed)
    }

    fn create_buffer_with_data(
        &self,
        label: &str,
        usage: BufferUsage,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let wgpu_buffer = self.internal.context.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(label),
                contents: data,
                usage: usage.into_wgpu(),
            },
        );

        let id = self.generate_buffer_id();
        let buffer_size = data.len() as u64;
        self.track_vram_allocation(buffer_size);

        self.internal.buffers.lock().unwrap().insert(
            id,
            WgpuBufferEntry {
                wgpu_buffer: Arc::new(wgpu_buffer),
                size: buffer_size,
            },
        );

        log::debug!("Created buffer '{label}' with ID: {id:?}, size: {buffer_size} bytes");
        Ok(id)
    }
}

impl GraphicsContext for WgpuGraphicsContext {
    fn create_texture(&self, image: &PremultipliedImage) -> Result<TextureId, ResourceError> {
        let device = &self.internal.context.device;
        let size = image.size();

        let wgpu_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Raster Tile Texture"),
            size: size.into_wgpu(),
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: RASTER_TEXTURE_FORMAT.into_wgpu(),
            usage: (TextureUsage::COPY_DST | TextureUsage::TEXTURE_BINDING).into_wgpu(),
            view_formats: &[],
        });

        self.internal.context.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &wgpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            image.pixels(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: None,
            },
            size.into_wgpu(),
        );

        let id = self.generate_texture_id();
        let size_in_bytes = size.area() * RASTER_TEXTURE_FORMAT.bytes_per_pixel() as u64;
        self.track_vram_allocation(size_in_bytes);

        self.internal.textures.lock().unwrap().insert(
            id,
            WgpuTextureEntry {
                wgpu_texture: Arc::new(wgpu_texture),
                size: size_in_bytes,
            },
        );

        log::debug!(
            "Created texture with ID: {:?}, {}x{} ({} bytes)",
            id,
            size.width,
            size.height,
            size_in_bytes
        );
        Ok(id)
    }

    fn create_vertex_buffer(&self, vertices: Vec<RasterVertex>) -> Result<BufferId, ResourceError> {
        self.create_buffer_with_data(
            "Raster Vertex Buffer",
            BufferUsage::VERTEX | BufferUsage::COPY_DST,
            bytemuck::cast_slice(&vertices),
        )
    }

    fn create_index_buffer(&self, indices: Vec<u16>) -> Result<BufferId, ResourceError> {
        self.create_buffer_with_data(
            "Raster Index Buffer",
            BufferUsage::INDEX | BufferUsage::COPY_DST,
            bytemuck::cast_slice(&indices),
        )
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        let mut textures = self.internal.textures.lock().unwrap();

        if let Some(entry) = textures.remove(&id) {
            self.internal
                .vram_allocated_bytes
                .fetch_sub(entry.size as usize, Ordering::Relaxed);
            log::debug!("Destroyed texture with ID: {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound)
        }
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        let mut buffers = self.internal.buffers.lock().unwrap();

        if let Some(entry) = buffers.remove(&id) {
            self.internal
                .vram_allocated_bytes
                .fetch_sub(entry.size as usize, Ordering::Relaxed);
            log::debug!("Destroyed buffer with ID: {id:?}");
            Ok(())
        } else {
            Err(ResourceError::NotFound)
        }
    }
}
