use bytemuck::Pod;
use common::span;
use tokio::runtime::Runtime;
use tracing::{debug, error, info, warn};
use wgpu::{
    Adapter, Backends, Color, CommandEncoderDescriptor, CompositeAlphaMode, Device,
    DeviceDescriptor, ErrorFilter, Features, Instance, Maintain, PowerPreference, PresentMode,
    Queue, RequestAdapterOptions, Surface, SurfaceConfiguration, SurfaceError, TextureUsages,
};
use winit::window::Window;

use crate::{render::texture::Texture, types::U32x2};

use super::{
    buffer::{Bufferable, Consts},
    error::RenderError,
    pipelines::GlobalsBindGroup,
    shader::ShaderModules,
    RenderMode,
};

use {drawer::Drawer, layouts::Layouts, pipelines::Pipelines};

pub mod binding;
pub mod drawer;
pub mod layouts;
pub mod pipelines;

/// Owns everything needed to talk to the GPU: device, surface, shaders and
/// the pipeline the shapes are drawn with.
pub struct Renderer {
    // wgpu related
    pub device: Device,
    pub queue: Queue,
    surface: Surface,
    pub config: SurfaceConfiguration,

    // Inner state
    resolution: U32x2,
    is_minimized: bool,

    depth_texture: Texture,

    _shaders: ShaderModules,
    layouts: Layouts,
    pipelines: Pipelines,

    #[cfg(feature = "overlay")]
    egui_render_pass: egui_wgpu_backend::RenderPass,

    /// Backend API. Used for debug purposes
    graphics_backend: String,
    /// Adapter name. Used for debug purposes
    adapter_name: String,
}

impl Renderer {
    pub fn new(
        window: &Window,
        render_mode: RenderMode,
        candidates: &[Backends],
        runtime: &Runtime,
    ) -> Result<Self, RenderError> {
        span!(_guard, "Renderer::new");

        let size = window.inner_size();

        let (surface, adapter) = candidates
            .iter()
            .find_map(|&backends| {
                let found = Self::request_adapter(window, backends, runtime);
                if found.is_none() {
                    warn!(?backends, "No compatible graphic device");
                }
                found
            })
            .ok_or_else(|| {
                RenderError::AdapterNotFound(
                    candidates
                        .iter()
                        .fold(Backends::empty(), |all, &backends| all | backends),
                )
            })?;

        let info = adapter.get_info();
        info!(
            ?info.name,
            ?info.vendor,
            ?info.backend,
            ?info.device_type,
            "Selected graphic device"
        );
        let graphics_backend = format!("{:?}", info.backend);
        let adapter_name = info.name.clone();

        let (device, queue) = runtime.block_on(adapter.request_device(
            &DeviceDescriptor {
                label: Some("GraphicDevice"),
                features: Features::empty(),
                limits: adapter.limits(),
            },
            None,
        ))?;

        // Errors outside of explicit scopes are reported and the demo keeps going
        device.on_uncaptured_error(|err| error!("Uncaptured GPU error: {err}"));

        let surface_format = *surface
            .get_supported_formats(&adapter)
            .first()
            .ok_or(RenderError::NoCompatibleSurfaceFormat)?;
        info!("Using {surface_format:?} as surface format");

        let present_mode = if surface
            .get_supported_present_modes(&adapter)
            .contains(&render_mode.present_mode)
        {
            render_mode.present_mode
        } else {
            warn!(
                requested = ?render_mode.present_mode,
                "Present mode unsupported, falling back to vsync"
            );
            PresentMode::Fifo
        };

        let config = SurfaceConfiguration {
            usage: TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode: CompositeAlphaMode::Auto,
        };
        surface.configure(&device, &config);

        let depth_texture = Texture::new_depth(&device, &config, "Depth Texture");

        // Compile and link inside a validation scope: a broken shader is
        // reported here and rendering continues with whatever got created
        device.push_error_scope(ErrorFilter::Validation);
        let shaders = ShaderModules::init_all(&device);
        let layouts = Layouts::new(&device);
        let pipelines = Pipelines::create(&device, &layouts, &shaders, &config);
        match runtime.block_on(device.pop_error_scope()) {
            Some(err) => error!("Shader compilation failed: {err}"),
            None => debug!("Shaders compiled"),
        }

        #[cfg(feature = "overlay")]
        let egui_render_pass = egui_wgpu_backend::RenderPass::new(&device, config.format, 1);

        Ok(Self {
            device,
            queue,
            surface,
            config,

            resolution: U32x2::new(size.width, size.height),
            is_minimized: size.width == 0 || size.height == 0,

            depth_texture,

            _shaders: shaders,
            layouts,
            pipelines,

            #[cfg(feature = "overlay")]
            egui_render_pass,

            graphics_backend,
            adapter_name,
        })
    }

    /// Open a surface on `window` and pick an adapter able to present to it
    fn request_adapter(
        window: &Window,
        backends: Backends,
        runtime: &Runtime,
    ) -> Option<(Surface, Adapter)> {
        let instance = Instance::new(backends);
        // Unsafe, because we use raw window handle between winit and wgpu
        let surface = unsafe { instance.create_surface(window) };

        instance
            .enumerate_adapters(backends)
            .enumerate()
            .for_each(|(id, adapter)| {
                let info = adapter.get_info();
                debug!(
                    ?info.name,
                    ?info.backend,
                    ?info.device_type,
                    "Graphic device #{id}"
                );
            });

        let adapter = runtime.block_on(instance.request_adapter(&RequestAdapterOptions {
            power_preference: PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))?;

        Some((surface, adapter))
    }

    /// Get graphic backend API being used
    pub fn graphics_backend(&self) -> &str {
        &self.graphics_backend
    }

    pub fn adapter_name(&self) -> &str {
        &self.adapter_name
    }

    /// Get current renderer resolution
    pub fn resolution(&self) -> U32x2 {
        self.resolution
    }

    pub fn create_consts<T: Copy + Pod + Bufferable>(&self, values: &[T]) -> Consts<T> {
        Consts::new(&self.device, &self.queue, values)
    }

    /// Update constant buffer
    pub fn update_consts<T: Copy + Pod + Bufferable>(&self, consts: &Consts<T>, values: &[T]) {
        consts.update(&self.queue, values)
    }

    /// Resize surface to match window dimensions
    pub fn on_resize(&mut self, new: U32x2) {
        // Resize with 0 width and height is used by winit to signal a minimize event on Windows.
        // See: https://github.com/rust-windowing/winit/issues/208
        // Also avoids panic on texture with size of 0,0
        if new.x != 0 && new.y != 0 {
            self.is_minimized = false;

            self.resolution = new;
            self.config.width = self.resolution.x;
            self.config.height = self.resolution.y;
            self.surface.configure(&self.device, &self.config);

            self.depth_texture = Texture::new_depth(&self.device, &self.config, "Depth Texture");
        } else {
            self.is_minimized = true;
        }
    }

    /// Start frame rendering and create `Drawer`.
    /// If there is an intermittent issue with the surface
    /// then Ok(None) will be returned
    pub fn start_frame<'a>(
        &'a mut self,
        globals: &'a GlobalsBindGroup,
        clear_color: Color,
    ) -> Result<Option<Drawer<'a>>, RenderError> {
        span!(_guard, "Renderer::start_frame");

        if self.is_minimized {
            return Ok(None);
        }

        let encoder = self
            .device
            .create_command_encoder(&CommandEncoderDescriptor {
                label: Some("FrameEncoder"),
            });

        let texture = match self.surface.get_current_texture() {
            Ok(tex) => tex,
            // If surface lost or outdated, try to recover it by reconfiguring
            Err(err @ (SurfaceError::Lost | SurfaceError::Outdated)) => {
                warn!("{} Recreating surface (frame will be missed)", err);
                self.on_resize(self.resolution);
                return Ok(None);
            }
            Err(SurfaceError::Timeout) => {
                // This will be resolved on the next frame
                return Ok(None);
            }
            Err(err) => return Err(err.into()),
        };

        Ok(Some(Drawer::new(encoder, self, texture, globals, clear_color)))
    }

    /// Block until the GPU has finished all submitted work
    pub fn wait_idle(&self) {
        self.device.poll(Maintain::Wait);
    }
}
