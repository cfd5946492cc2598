use std::iter::once;

use wgpu::{
    Color, CommandEncoder, IndexFormat, LoadOp, Operations, Queue, RenderPass,
    RenderPassColorAttachment, RenderPassDepthStencilAttachment, RenderPassDescriptor,
    SurfaceTexture, TextureView, TextureViewDescriptor,
};

use crate::render::{model::Model, pipelines::GlobalsBindGroup, texture::Texture};

use super::{pipelines::Pipelines, Renderer};

#[cfg(feature = "overlay")]
use {
    crate::render::error::RenderError,
    egui::FullOutput,
    egui_wgpu_backend::{BackendError, ScreenDescriptor},
    egui_winit_platform::Platform,
    wgpu::{Device, SurfaceConfiguration},
};

struct RendererBorrow<'frame> {
    #[cfg(feature = "overlay")]
    device: &'frame Device,
    queue: &'frame Queue,
    pipelines: &'frame Pipelines,
    depth_texture: &'frame Texture,
    #[cfg(feature = "overlay")]
    surface_config: &'frame SurfaceConfiguration,
    #[cfg(feature = "overlay")]
    egui_render_pass: &'frame mut egui_wgpu_backend::RenderPass,
}

/// Used to draw on current frame.
///
/// Draw calls will be submitted and the frame presented when the object is dropped.
pub struct Drawer<'frame> {
    encoder: Option<CommandEncoder>,
    renderer: RendererBorrow<'frame>,
    output_texture: Option<SurfaceTexture>,
    output_view: TextureView,
    globals: &'frame GlobalsBindGroup,
    clear_color: Color,
}

impl<'frame> Drawer<'frame> {
    pub fn new(
        encoder: CommandEncoder,
        renderer: &'frame mut Renderer,
        output_texture: SurfaceTexture,
        globals: &'frame GlobalsBindGroup,
        clear_color: Color,
    ) -> Self {
        let output_view = output_texture
            .texture
            .create_view(&TextureViewDescriptor::default());

        Self {
            encoder: Some(encoder),
            renderer: RendererBorrow {
                #[cfg(feature = "overlay")]
                device: &renderer.device,
                queue: &renderer.queue,
                pipelines: &renderer.pipelines,
                depth_texture: &renderer.depth_texture,
                #[cfg(feature = "overlay")]
                surface_config: &renderer.config,
                #[cfg(feature = "overlay")]
                egui_render_pass: &mut renderer.egui_render_pass,
            },
            output_texture: Some(output_texture),
            output_view,
            globals,
            clear_color,
        }
    }

    /// Returns sub drawer for the scene pass
    pub fn first_pass(&mut self) -> FirstPassDrawer {
        let clear_color = self.clear_color;
        let globals = self.globals;
        let pipelines = self.renderer.pipelines;
        let depth_view = &self.renderer.depth_texture.view;
        let output_view = &self.output_view;

        let mut render_pass = self
            .encoder
            .as_mut()
            .expect("encoder is taken only on drop")
            .begin_render_pass(&RenderPassDescriptor {
                label: Some("FirstPass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(clear_color),
                        store: true,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: depth_view,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: true,
                    }),
                    stencil_ops: None,
                }),
            });

        render_pass.set_pipeline(&pipelines.shape.inner);
        render_pass.set_bind_group(0, &globals.inner, &[]);

        FirstPassDrawer { render_pass }
    }

    /// Draw the GUI on top of the scene
    #[cfg(feature = "overlay")]
    pub fn draw_overlay(
        &mut self,
        platform: &mut Platform,
        scale_factor: f32,
    ) -> Result<(), RenderError> {
        let FullOutput {
            textures_delta,
            shapes,
            ..
        } = platform.end_frame(None);

        let paint_jobs = platform.context().tessellate(shapes);

        let screen_descriptor = ScreenDescriptor {
            physical_width: self.renderer.surface_config.width,
            physical_height: self.renderer.surface_config.height,
            scale_factor,
        };

        let overlay_error = |err: BackendError| RenderError::OverlayError(format!("{err:?}"));

        self.renderer
            .egui_render_pass
            .add_textures(self.renderer.device, self.renderer.queue, &textures_delta)
            .map_err(overlay_error)?;
        self.renderer.egui_render_pass.update_buffers(
            self.renderer.device,
            self.renderer.queue,
            &paint_jobs,
            &screen_descriptor,
        );

        let encoder = self
            .encoder
            .as_mut()
            .expect("encoder is taken only on drop");
        self.renderer
            .egui_render_pass
            .execute(
                encoder,
                &self.output_view,
                &paint_jobs,
                &screen_descriptor,
                None,
            )
            .map_err(overlay_error)?;

        self.renderer
            .egui_render_pass
            .remove_textures(textures_delta)
            .map_err(overlay_error)?;

        Ok(())
    }
}

impl<'frame> Drop for Drawer<'frame> {
    fn drop(&mut self) {
        if let Some(encoder) = self.encoder.take() {
            self.renderer.queue.submit(once(encoder.finish()));
        }

        if let Some(output_texture) = self.output_texture.take() {
            output_texture.present();
        }
    }
}

/// Sub drawer that records the scene pass
#[must_use]
pub struct FirstPassDrawer<'pass> {
    render_pass: RenderPass<'pass>,
}

impl<'pass> FirstPassDrawer<'pass> {
    /// Draw every part of `model` with its own color binding
    pub fn draw_model(&mut self, model: &'pass Model) {
        self.render_pass.set_vertex_buffer(0, model.vertices.slice());
        self.render_pass
            .set_index_buffer(model.indices.slice(), IndexFormat::Uint32);

        for part in &model.parts {
            self.render_pass.set_bind_group(1, &part.bind_group, &[]);
            self.render_pass.draw_indexed(part.part.range(), 0, 0..1);
        }
    }
}
