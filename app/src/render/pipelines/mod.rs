use bytemuck::{Pod, Zeroable};
use wgpu::{
    BindGroup, BindGroupDescriptor, BindGroupEntry, BindGroupLayout, BindGroupLayoutDescriptor,
    BindGroupLayoutEntry, BindingType, BufferBindingType, Device, ShaderStages,
};

use crate::{
    assert_buffer_align,
    types::{Color, Matrix4, RawMatrix4},
};

use super::buffer::{Bufferable, Consts};

pub mod shape;

const fn uniform_entry(visibility: ShaderStages) -> BindGroupLayoutEntry {
    BindGroupLayoutEntry {
        binding: 0,
        visibility,
        ty: BindingType::Buffer {
            ty: BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Globals
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Per-frame transforms shared by every draw call
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug)]
pub struct Globals {
    /// Projection matrix
    proj_mat: RawMatrix4,
    /// Camera view matrix
    view_mat: RawMatrix4,
    /// Shape scale and rotation
    model_mat: RawMatrix4,
    /// proj_mat * view_mat * model_mat
    all_mat: RawMatrix4,
}

impl Bufferable for Globals {
    const LABEL: &'static str = "Uniform: Globals";
}

impl Globals {
    pub fn new(proj_mat: Matrix4, view_mat: Matrix4, model_mat: Matrix4) -> Self {
        Self {
            proj_mat: proj_mat.to_cols_array_2d(),
            view_mat: view_mat.to_cols_array_2d(),
            model_mat: model_mat.to_cols_array_2d(),
            all_mat: (proj_mat * view_mat * model_mat).to_cols_array_2d(),
        }
    }

    pub fn all_mat(&self) -> Matrix4 {
        Matrix4::from_cols_array_2d(&self.all_mat)
    }
}

impl Default for Globals {
    fn default() -> Self {
        Self::new(Matrix4::IDENTITY, Matrix4::IDENTITY, Matrix4::IDENTITY)
    }
}

assert_buffer_align!(Globals);

/// Global scene data
pub struct GlobalModel {
    pub globals: Consts<Globals>,
}

/// Represent bind group for `Globals`
pub struct GlobalsBindGroup {
    pub inner: BindGroup,
}

/// Represents created layouts on the GPU
pub struct GlobalLayout {
    pub globals: BindGroupLayout,
}

impl GlobalLayout {
    const ENTRIES: &'static [BindGroupLayoutEntry] = &[uniform_entry(ShaderStages::VERTEX)];

    const DESC: BindGroupLayoutDescriptor<'static> = BindGroupLayoutDescriptor {
        label: Some("BindGroupLayout: Globals"),
        entries: Self::ENTRIES,
    };

    pub fn new(device: &Device) -> Self {
        Self {
            globals: device.create_bind_group_layout(&Self::DESC),
        }
    }

    pub fn bind_globals(&self, device: &Device, global_model: &GlobalModel) -> GlobalsBindGroup {
        GlobalsBindGroup {
            inner: device.create_bind_group(&BindGroupDescriptor {
                label: Some("BindGroup: Globals"),
                layout: &self.globals,
                entries: &[BindGroupEntry {
                    binding: 0,
                    resource: global_model.globals.buffer().as_entire_binding(),
                }],
            }),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// Locals
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Per-part draw data
#[repr(C)]
#[derive(Pod, Zeroable, Clone, Copy, Debug, PartialEq)]
pub struct Locals {
    color: Color,
}

impl Bufferable for Locals {
    const LABEL: &'static str = "Uniform: Locals";
}

impl Locals {
    pub const fn new(color: Color) -> Self {
        Self { color }
    }
}

assert_buffer_align!(Locals);

/// Layout of the per-part bind group
pub struct LocalLayout {
    pub locals: BindGroupLayout,
}

impl LocalLayout {
    const ENTRIES: &'static [BindGroupLayoutEntry] = &[uniform_entry(ShaderStages::FRAGMENT)];

    const DESC: BindGroupLayoutDescriptor<'static> = BindGroupLayoutDescriptor {
        label: Some("BindGroupLayout: Locals"),
        entries: Self::ENTRIES,
    };

    pub fn new(device: &Device) -> Self {
        Self {
            locals: device.create_bind_group_layout(&Self::DESC),
        }
    }

    pub fn bind_locals(&self, device: &Device, locals: &Consts<Locals>) -> BindGroup {
        device.create_bind_group(&BindGroupDescriptor {
            label: Some("BindGroup: Locals"),
            layout: &self.locals,
            entries: &[BindGroupEntry {
                binding: 0,
                resource: locals.buffer().as_entire_binding(),
            }],
        })
    }
}

#[cfg(test)]
mod tests {
    use glam::{Vec3, Vec4};

    use super::*;

    #[test]
    fn all_mat_is_product_in_order() {
        let proj = Matrix4::from_scale(Vec3::new(2.0, 2.0, 1.0));
        let view = Matrix4::from_translation(Vec3::new(0.0, 0.0, -1.0));
        let model = Matrix4::from_translation(Vec3::new(1.0, 0.0, 0.0));

        let globals = Globals::new(proj, view, model);
        let clip = globals.all_mat() * Vec4::new(0.0, 0.0, 0.0, 1.0);

        // Model moves first, view second, projection scales last
        assert_eq!(clip, Vec4::new(2.0, 0.0, -1.0, 1.0));
    }

    #[test]
    fn default_globals_are_identity() {
        assert_eq!(Globals::default().all_mat(), Matrix4::IDENTITY);
    }
}
