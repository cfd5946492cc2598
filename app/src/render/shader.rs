use std::borrow::Cow;

use wgpu::{Device, ShaderModule, ShaderModuleDescriptor, ShaderSource};

/// Consts for declaring shaders
pub trait Shader {
    const DESCRIPTOR: ShaderModuleDescriptor<'static>;

    fn init(device: &Device) -> ShaderModule {
        device.create_shader_module(Self::DESCRIPTOR)
    }
}

/// Stores all shaders
pub struct ShaderModules {
    pub shape: ShaderModule,
}

impl ShaderModules {
    pub fn init_all(device: &Device) -> Self {
        Self {
            shape: ShapeShader::init(device),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Pipeline Shaders
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Flat colored shape: transforms positions, fills with the part color
pub struct ShapeShader;

impl Shader for ShapeShader {
    const DESCRIPTOR: ShaderModuleDescriptor<'static> = ShaderModuleDescriptor {
        label: Some("Shader: Shape"),
        source: ShaderSource::Wgsl(Cow::Borrowed(include_str!(
            "../../../assets/shaders/shape.wgsl"
        ))),
    };
}
