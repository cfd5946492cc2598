use wgpu::Device;

use crate::render::pipelines::{GlobalLayout, LocalLayout};

pub struct Layouts {
    pub globals: GlobalLayout,
    pub locals: LocalLayout,
}

impl Layouts {
    pub fn new(device: &Device) -> Self {
        Self {
            globals: GlobalLayout::new(device),
            locals: LocalLayout::new(device),
        }
    }
}
