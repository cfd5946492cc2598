use wgpu::BindGroup;

use crate::mesh::MeshPart;

use super::{
    buffer::{Buffer, Consts},
    pipelines::Locals,
    primitives::vertex::Vertex,
};

/// GPU copy of a [`Mesh`](crate::mesh::Mesh)
pub struct Model {
    pub vertices: Buffer<Vertex>,
    pub indices: Buffer<u32>,
    pub parts: Vec<ModelPart>,
}

/// One index range with its own color uniform
pub struct ModelPart {
    pub part: MeshPart,
    pub locals: Consts<Locals>,
    pub bind_group: BindGroup,
}

impl Model {
    pub fn triangle_count(&self) -> usize {
        self.indices.length() / 3
    }
}
