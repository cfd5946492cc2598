use wgpu::PresentMode;

pub mod buffer;
pub mod error;
pub mod model;
pub mod pipelines;
pub mod primitives;
pub mod renderer;
pub mod shader;
pub mod texture;

/// Surface presentation settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderMode {
    pub present_mode: PresentMode,
}

impl RenderMode {
    pub fn new(vsync: bool) -> Self {
        Self {
            // Fifo waits for vertical sync and is supported everywhere
            present_mode: if vsync {
                PresentMode::Fifo
            } else {
                PresentMode::Immediate
            },
        }
    }
}

impl Default for RenderMode {
    fn default() -> Self {
        Self::new(true)
    }
}
