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

use anyhow::{anyhow, Result};

use crate::graphics::wgpu::conversions::IntoWgpu;

/// Which adapter class to prefer when several are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PowerPreference {
    /// Prefer an integrated / low-power adapter.
    LowPower,
    /// Prefer a discrete / high-performance adapter.
    #[default]
    HighPerformance,
}

/// Settings for bootstrapping the wgpu context.
#[derive(Debug, Clone)]
pub struct ContextSettings {
    /// Which adapter class to request.
    pub power_preference: PowerPreference,
    /// Accept a software fallback adapter if no hardware one exists.
    pub allow_fallback_adapter: bool,
    /// Debug label given to the logical device.
    pub device_label: String,
}

impl Default for ContextSettings {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::default(),
            allow_fallback_adapter: false,
            device_label: "Carto Logical Device".to_string(),
        }
    }
}

/// Holds the core WGPU state objects required for resource creation.
///
/// This structure manages the connection to the graphics API. It is
/// headless: the embedding application owns windowing and surfaces, so
/// tile resource uploads never need one.
#[derive(Debug)]
pub struct WgpuContext {
    #[allow(dead_code)]
    pub(crate) adapter: wgpu::Adapter,
    pub(crate) device: wgpu::Device,
    pub(crate) queue: wgpu::Queue,

    // Store info for easy access
    pub(crate) adapter_name: String,
    pub(crate) adapter_backend: wgpu::Backend,
}

impl WgpuContext {
    /// Asynchronously initializes the graphics context.
    ///
    /// ## Arguments
    /// * `settings` - Adapter and device selection settings.
    ///
    /// ## Returns
    /// * `Result<Self>` - The initialized context or an error.
    pub async fn new(settings: &ContextSettings) -> Result<Self> {
        log::info!("Initializing WGPU context...");

        let instance =
            wgpu::Instance::new(wgpu::InstanceDescriptor::new_without_display_handle());

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: settings.power_preference.into_wgpu(),
                compatible_surface: None,
                force_fallback_adapter: settings.allow_fallback_adapter,
            })
            .await
            .map_err(|e| anyhow!("Failed to find a suitable graphics adapter: {e}"))?;

        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?})",
            adapter_info.name,
            adapter_info.backend
        );

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some(settings.device_label.as_str()),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create logical device: {e}"))?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(std::sync::Arc::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        Ok(Self {
            adapter,
            device,
            queue,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
        })
    }

    /// Blocking wrapper around [`Self::new`] for callers without an
    /// executor.
    pub fn new_blocking(settings: &ContextSettings) -> Result<Self> {
        pollster::block_on(Self::new(settings))
    }

    /// The human-readable name of the selected adapter.
    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    /// The backend API the selected adapter runs on.
    pub fn adapter_backend(&self) -> wgpu::Backend {
        self.adapter_backend
    }
}
