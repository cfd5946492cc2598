use tokio::runtime::Runtime;
use winit::{dpi::LogicalSize, window::{Window as WinitWindow, WindowBuilder}};

use crate::{
    consts::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH},
    error::Error,
    render::{renderer::Renderer, RenderMode},
    settings::Settings,
    types::EventLoop,
    utils::VERSION,
};

use event::Event;

pub mod event;

/// Handler for winit window and the renderer drawing into it
pub struct Window {
    /// winit window handle
    inner: WinitWindow,

    renderer: Renderer,

    pub focused: bool,

    events: Vec<Event>,

    // Deduplicated events
    resized: bool,
}

impl Window {
    pub const INITIAL_WIDTH: u32 = 1280;
    pub const INITIAL_HEIGHT: u32 = 720;

    /// Open the window and create the GPU context for it
    pub fn new(settings: &Settings, runtime: &Runtime) -> Result<(Self, EventLoop), Error> {
        let event_loop = EventLoop::new();

        let window = WindowBuilder::new()
            .with_resizable(true)
            .with_min_inner_size(LogicalSize::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT))
            .with_title(format!("Prism v{VERSION}"))
            .with_inner_size(LogicalSize::new(Self::INITIAL_WIDTH, Self::INITIAL_HEIGHT))
            .build(&event_loop)?;

        let renderer = Renderer::new(
            &window,
            RenderMode::new(settings.vsync),
            &settings.backend_candidates(),
            runtime,
        )?;

        Ok((
            Self {
                inner: window,
                renderer,
                focused: true,
                events: Vec::new(),
                resized: false,
            },
            event_loop,
        ))
    }

    pub fn inner(&self) -> &WinitWindow {
        &self.inner
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Tear down the GPU context before the window goes away
    pub fn destroy(self) {
        self.renderer.wait_idle();
        drop(self.renderer);
        drop(self.inner);
    }
}
