use wgpu::{Device, SurfaceConfiguration};

use crate::render::{pipelines::shape::ShapePipeline, shader::ShaderModules};

use super::layouts::Layouts;

pub struct Pipelines {
    pub shape: ShapePipeline,
}

impl Pipelines {
    pub fn create(
        device: &Device,
        layouts: &Layouts,
        shaders: &ShaderModules,
        config: &SurfaceConfiguration,
    ) -> Self {
        Self {
            shape: ShapePipeline::new(
                device,
                config,
                &shaders.shape,
                &layouts.globals,
                &layouts.locals,
            ),
        }
    }
}
