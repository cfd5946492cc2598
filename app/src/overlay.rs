use common::clock::ClockStats;
use egui::{
    global_dark_light_mode_switch, CollapsingHeader, Context, FontDefinitions, RadioButton, Slider,
    Style, TopBottomPanel, Window,
};
use egui_winit_platform::{Platform, PlatformDescriptor};
use winit::{event::WindowEvent, window::Window as WinitWindow};

use crate::{
    render::renderer::Renderer,
    scene::{controls::Controls, shape::Shape, Scene},
    types::WEvent,
};

/// Handles everything related to GUI drawing
pub struct Overlay {
    pub platform: Platform,
    state: OverlayState,
}

impl Overlay {
    pub fn new(window: &WinitWindow) -> Self {
        let size = window.inner_size();

        Self {
            platform: Platform::new(PlatformDescriptor {
                physical_width: size.width,
                physical_height: size.height,
                scale_factor: window.scale_factor(),
                font_definitions: FontDefinitions::default(),
                style: Style::default(),
            }),
            state: OverlayState::default(),
        }
    }

    /// Feed a winit event to egui.
    ///
    /// Returns `true` when the GUI consumed the event, so the application must
    /// not act on it.
    pub fn handle_event(&mut self, event: &WEvent) -> bool {
        self.platform.handle_event(event);

        let ctx = self.platform.context();
        match event {
            WEvent::WindowEvent {
                event: window_event,
                ..
            } => match window_event {
                WindowEvent::KeyboardInput { .. } | WindowEvent::ReceivedCharacter(_) => {
                    ctx.wants_keyboard_input()
                }
                WindowEvent::MouseInput { .. } | WindowEvent::MouseWheel { .. } => {
                    ctx.wants_pointer_input()
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Lay out the GUI for this frame
    pub fn update(&mut self, elapsed: f64, payload: OverlayPayload) {
        // Update internal egui time (used for animations)
        self.platform.update_time(elapsed);

        self.platform.begin_frame();
        self.state.draw(&self.platform.context(), payload);
    }
}

pub struct OverlayPayload<'a> {
    pub scene: &'a mut Scene,
    pub renderer: &'a Renderer,
    pub stats: ClockStats,
}

/// Represents overlay state (windows, buttons, etc.)
pub struct OverlayState {
    controls_opened: bool,
    stats_opened: bool,
}

impl Default for OverlayState {
    fn default() -> Self {
        Self {
            controls_opened: true,
            stats_opened: false,
        }
    }
}

impl OverlayState {
    pub fn draw(&mut self, ctx: &Context, payload: OverlayPayload) {
        let OverlayPayload {
            scene,
            renderer,
            stats,
        } = payload;

        TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            ui.horizontal_wrapped(|ui| {
                global_dark_light_mode_switch(ui);
                ui.separator();
                ui.menu_button("View", |menu| {
                    if menu.button("Controls").clicked() {
                        self.controls_opened = true;
                    }
                    if menu.button("Stats").clicked() {
                        self.stats_opened = true;
                    }
                });
                ui.menu_button("Scene", |menu| {
                    if menu.button("Reset transform").clicked() {
                        scene.controls.reset_transform();
                    }
                });
                ui.separator();
                ui.label("F1 hides this overlay, Esc quits");
            })
        });

        let mut load_requested = false;

        Window::new("Controls")
            .open(&mut self.controls_opened)
            .resizable(false)
            .show(ctx, |ui| {
                let available = Shape::ALL.map(|shape| scene.can_show(shape));
                let controls = &mut scene.controls;

                ui.horizontal(|ui| {
                    for (shape, enabled) in Shape::ALL.into_iter().zip(available) {
                        let radio = RadioButton::new(controls.shape == shape, shape.name());
                        if ui
                            .add_enabled(enabled, radio)
                            .on_disabled_hover_text("Load a model first")
                            .clicked()
                        {
                            controls.shape = shape;
                        }
                    }
                });
                ui.separator();

                ui.horizontal(|ui| {
                    ui.color_edit_button_rgba_unmultiplied(&mut controls.color);
                    ui.label("Color");
                });
                ui.add_enabled(
                    controls.shape == Shape::Model,
                    egui::Checkbox::new(&mut controls.use_part_colors, "Use part colors"),
                );

                let (min_scale, max_scale) = Controls::SCALE_RANGE;
                ui.add(Slider::new(&mut controls.scale, min_scale..=max_scale).text("Scale"));
                ui.add(Slider::new(&mut controls.rotation.x, 0.0..=360.0).text("Rotation X"));
                ui.add(Slider::new(&mut controls.rotation.y, 0.0..=360.0).text("Rotation Y"));
                ui.add(Slider::new(&mut controls.rotation.z, 0.0..=360.0).text("Rotation Z"));

                ui.horizontal(|ui| {
                    ui.checkbox(&mut controls.auto_rotate, "Auto-rotate");
                    ui.add_enabled(
                        controls.auto_rotate,
                        Slider::new(&mut controls.spin_speed, -360.0..=360.0).suffix("°/s"),
                    );
                });

                ui.horizontal(|ui| {
                    ui.color_edit_button_rgba_unmultiplied(&mut controls.background);
                    ui.label("Background");
                });
                ui.separator();

                ui.horizontal(|ui| {
                    ui.label("Model");
                    let field = ui.text_edit_singleline(&mut controls.model_path);
                    let submitted =
                        field.lost_focus() && ui.input().key_pressed(egui::Key::Enter);
                    if ui.button("Load").clicked() || submitted {
                        load_requested = true;
                    }
                });
                if let Some(status) = scene.status() {
                    ui.label(status);
                }

                if let Some(loaded) = scene.loaded() {
                    CollapsingHeader::new(format!("Parts ({})", loaded.mesh.parts.len()))
                        .default_open(false)
                        .show(ui, |ui| {
                            ui.label(format!("Source: {}", loaded.path.display()));
                            for (id, part) in loaded.mesh.parts.iter().enumerate() {
                                let [r, g, b, a] = part.color;
                                ui.label(format!(
                                    "#{id}: indices {}..{} rgba({r:.2}, {g:.2}, {b:.2}, {a:.2})",
                                    part.index_offset,
                                    part.index_offset + part.index_count,
                                ));
                            }
                        });
                }
            });

        if load_requested {
            scene.load_model(renderer);
        }

        Window::new("Stats")
            .open(&mut self.stats_opened)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(format!(
                    "Backend: {}\n\
                    Adapter: {}\n\
                    Resolution: {}x{}\n\
                    FPS: {:.1}\n\
                    Frame time: {:.2} ms",
                    renderer.graphics_backend(),
                    renderer.adapter_name(),
                    renderer.resolution().x,
                    renderer.resolution().y,
                    stats.avg_fps,
                    stats.avg_frame_dur.as_secs_f64() * 1000.0,
                ));
                if let Some(model) = scene.active_model() {
                    ui.label(format!(
                        "Drawing {} triangles in {} parts",
                        model.triangle_count(),
                        model.parts.len()
                    ));
                }
            });
    }
}
