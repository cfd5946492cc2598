use wgpu::BufferUsages;

use crate::{
    mesh::Mesh,
    render::{
        buffer::Buffer,
        model::{Model, ModelPart},
        pipelines::{GlobalModel, Globals, GlobalsBindGroup, Locals},
    },
};

use super::Renderer;

impl Renderer {
    pub fn create_global_model(&self) -> GlobalModel {
        GlobalModel {
            globals: self.create_consts(&[Globals::default()]),
        }
    }

    pub fn bind_globals(&self, global_model: &GlobalModel) -> GlobalsBindGroup {
        self.layouts
            .globals
            .bind_globals(&self.device, global_model)
    }

    /// Upload `mesh` and create one color binding per part
    pub fn create_model(&self, mesh: &Mesh) -> Model {
        let parts = mesh
            .parts
            .iter()
            .map(|&part| {
                let locals = self.create_consts(&[Locals::new(part.color)]);
                let bind_group = self.layouts.locals.bind_locals(&self.device, &locals);

                ModelPart {
                    part,
                    locals,
                    bind_group,
                }
            })
            .collect();

        Model {
            vertices: Buffer::new(&self.device, &mesh.vertices, BufferUsages::VERTEX),
            indices: Buffer::new(&self.device, &mesh.indices, BufferUsages::INDEX),
            parts,
        }
    }
}
