use std::{path::PathBuf, time::Duration};

use common::span;
use tracing::info;
use winit::event::VirtualKeyCode;

use crate::{
    mesh::{import, Mesh},
    render::{
        model::Model,
        pipelines::{GlobalModel, Globals, GlobalsBindGroup, Locals},
        renderer::{drawer::FirstPassDrawer, Renderer},
    },
    settings::Settings,
    window::event::Event,
};

use self::{
    camera::Camera,
    controls::Controls,
    loader::{LoadedMesh, ModelLoader},
    shape::Shape,
};

pub mod camera;
pub mod controls;
pub mod loader;
pub mod shape;

/// Everything that is drawn, plus the state the overlay edits
pub struct Scene {
    // Render
    pub global_model: GlobalModel,
    pub globals_bind_group: GlobalsBindGroup,

    pub camera: Camera,
    pub controls: Controls,

    // Objects
    triangle: Model,
    quad: Model,
    model: Option<Model>,
    loader: ModelLoader,

    pub show_overlay: bool,
}

impl Scene {
    pub fn new(renderer: &Renderer, settings: &Settings) -> Self {
        span!(_guard, "Scene::new");

        let resolution = renderer.resolution();
        let global_model = renderer.create_global_model();
        let globals_bind_group = renderer.bind_globals(&global_model);

        let mut scene = Self {
            global_model,
            globals_bind_group,

            camera: Camera::new(Camera::aspect_of(resolution.x, resolution.y)),
            controls: Controls::new(settings),

            triangle: renderer.create_model(&Mesh::triangle()),
            quad: renderer.create_model(&Mesh::quad()),
            model: None,
            loader: ModelLoader::default(),

            show_overlay: true,
        };

        if scene.controls.shape == Shape::Model {
            scene.load_model(renderer);
        }

        scene
    }

    /// Import the model at `controls.model_path`, replacing the current one.
    ///
    /// Failures are logged and reported through [`Scene::status`]; the
    /// previously loaded model stays in place.
    pub fn load_model(&mut self, renderer: &Renderer) -> bool {
        let path = PathBuf::from(self.controls.model_path.trim());
        let result = import::load_file(&path).map(|mut mesh| {
            mesh.normalize();
            mesh
        });

        match self.loader.apply(path, result, &mut self.controls) {
            Some(mesh) => {
                self.model = Some(renderer.create_model(mesh));
                true
            }
            None => false,
        }
    }

    pub fn loaded(&self) -> Option<&LoadedMesh> {
        self.loader.current()
    }

    /// Result of the last model import
    pub fn status(&self) -> Option<&str> {
        self.loader.status()
    }

    /// Whether `shape` has something to draw
    pub fn can_show(&self, shape: Shape) -> bool {
        self.loader.can_show(shape)
    }

    /// Model for the selected shape, if there is one to draw
    pub fn active_model(&self) -> Option<&Model> {
        match self.controls.shape {
            Shape::Triangle => Some(&self.triangle),
            Shape::Quad => Some(&self.quad),
            Shape::Model => self.model.as_ref(),
        }
    }

    /// React to window events. Returns `true` when the application should exit
    pub fn handle_events(&mut self, events: Vec<Event>) -> bool {
        let mut exit = false;

        for event in events {
            match event {
                Event::Close => {
                    info!("Exit requested");
                    exit = true;
                }
                Event::Resize(size) => self.camera.aspect = Camera::aspect_of(size.x, size.y),
                Event::KeyPressed(VirtualKeyCode::F1) => {
                    self.show_overlay = !self.show_overlay
                }
                Event::KeyPressed(_) | Event::Focused(_) => {}
            }
        }

        exit
    }

    /// Advance animation and write uniforms for the next frame
    pub fn update(&mut self, renderer: &Renderer, dt: Duration) {
        self.controls.advance(dt.as_secs_f32());

        renderer.update_consts(
            &self.global_model.globals,
            &[Globals::new(
                self.camera.proj_mat(),
                self.camera.view_mat(),
                self.controls.model_mat(),
            )],
        );

        if let Some(model) = self.active_model() {
            for part in &model.parts {
                renderer.update_consts(
                    &part.locals,
                    &[Locals::new(self.controls.part_color(&part.part))],
                );
            }
        }
    }

    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.controls.background;
        wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: a as f64,
        }
    }

    /// Draw the selected shape
    pub fn draw<'a>(&'a self, mut drawer: FirstPassDrawer<'a>) {
        if let Some(model) = self.active_model() {
            drawer.draw_model(model);
        }
    }
}
