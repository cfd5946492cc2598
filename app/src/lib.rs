use common::{clock::Clock, prof, span};
use tracing::{debug, error, info};
use winit::event_loop::ControlFlow;

pub mod bootstrap;
pub mod consts;
pub mod error;
pub mod mesh;
#[cfg(feature = "overlay")]
pub mod overlay;
pub mod render;
pub mod scene;
pub mod settings;
pub mod types;
pub mod utils;
pub mod window;

#[cfg(feature = "overlay")]
use crate::overlay::{Overlay, OverlayPayload};

use crate::{
    consts::BACKGROUND_FPS,
    scene::Scene,
    settings::Settings,
    types::{EventLoop, WEvent},
    utils::ExitCode,
    window::Window,
};

/// Application instance: owns the window, the GPU context and the GUI
pub struct App {
    pub window: Window,
    pub clock: Clock,
    pub settings: Settings,

    #[cfg(feature = "overlay")]
    pub overlay: Overlay,
}

impl App {
    pub fn new(window: Window, settings: Settings) -> Self {
        span!(_guard, "App::new");

        info!("Creating application instance");

        #[cfg(feature = "overlay")]
        let overlay = {
            info!("Initializing overlay");
            Overlay::new(window.inner())
        };

        Self {
            clock: Clock::new(Self::frame_target(&settings, true)),
            window,
            settings,
            #[cfg(feature = "overlay")]
            overlay,
        }
    }

    /// With vsync the swap already waits, so the clock only measures
    fn frame_target(settings: &Settings, focused: bool) -> std::time::Duration {
        if !focused {
            Clock::fps_to_duration(BACKGROUND_FPS)
        } else if settings.vsync {
            Clock::fps_to_duration(0)
        } else {
            Clock::fps_to_duration(settings.target_fps)
        }
    }

    /// Run one frame: events, state, render, pacing
    pub fn tick(&mut self, control_flow: &mut ControlFlow, scene: &mut Scene) {
        span!(_guard, "App::tick");

        let events = self.window.fetch();
        let exit = scene.handle_events(events);
        if exit {
            control_flow.set_exit_with_code(ExitCode::Ok.as_int());
        }

        #[cfg(feature = "overlay")]
        if scene.show_overlay {
            self.overlay.update(
                self.clock.stats().total.as_secs_f64(),
                OverlayPayload {
                    scene: &mut *scene,
                    renderer: self.window.renderer(),
                    stats: self.clock.stats(),
                },
            );
        }

        {
            span!(_guard, "StateTick");
            scene.update(self.window.renderer(), self.clock.duration());
        }

        {
            span!(_guard, "Render");

            #[cfg(feature = "overlay")]
            let scale_factor = self.window.inner().scale_factor() as f32;

            let clear_color = scene.clear_color();
            match self
                .window
                .renderer_mut()
                .start_frame(&scene.globals_bind_group, clear_color)
            {
                Ok(Some(mut drawer)) => {
                    prof!(guard, "Render::FirstPass");
                    scene.draw(drawer.first_pass());
                    drop(guard);

                    #[cfg(feature = "overlay")]
                    if scene.show_overlay {
                        if let Err(err) =
                            drawer.draw_overlay(&mut self.overlay.platform, scale_factor)
                        {
                            error!("{err}");
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => error!("Frame skipped: {err}"),
            }
        }

        if !exit {
            span!(_guard, "Sleep");
            self.clock.target = Self::frame_target(&self.settings, self.window.focused);
            self.clock.tick();
        }
    }

    pub fn run(self, event_loop: EventLoop) -> ! {
        debug!("Initializing scene");
        let scene = Scene::new(self.window.renderer(), &self.settings);

        let mut state = Some((self, scene));

        debug!("Entering main loop");
        event_loop.run(move |event, _, control_flow| {
            // Continuous rendering
            control_flow.set_poll();

            if let WEvent::LoopDestroyed = event {
                if let Some((app, scene)) = state.take() {
                    app.clean(scene);
                }
                return;
            }

            let Some((app, scene)) = state.as_mut() else {
                return;
            };

            #[cfg(feature = "overlay")]
            {
                // Let the overlay swallow input it is using
                if scene.show_overlay && app.overlay.handle_event(&event) {
                    return;
                }
            }

            match event {
                WEvent::WindowEvent { event, .. } => {
                    span!(_guard, "WindowEvent");
                    app.window.handle_window_event(event)
                }
                WEvent::MainEventsCleared => app.tick(control_flow, scene),
                _ => {}
            }
        });
    }

    /// Release GPU resources, then the window
    pub fn clean(self, scene: Scene) {
        span!(_guard, "App::clean");

        info!("Releasing GPU resources");
        drop(scene);
        self.window.destroy();
        info!("Shut down");
    }
}
