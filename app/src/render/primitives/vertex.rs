use std::mem::size_of;

use bytemuck::{Pod, Zeroable};
use wgpu::{vertex_attr_array, BufferAddress, VertexAttribute, VertexBufferLayout, VertexStepMode};

use crate::{assert_buffer_align, render::buffer::Bufferable, types::F32x3};

/// Represents vertex data sent to vertex buffer (positions only)
#[repr(C)]
#[derive(Pod, Zeroable, Copy, Clone, Debug, PartialEq)]
pub struct Vertex {
    pub position: F32x3,
}

impl Bufferable for Vertex {
    const LABEL: &'static str = "VertexBuffer";
}

assert_buffer_align!(Vertex);

impl Vertex {
    #[rustfmt::skip]
    pub const TRIANGLE: &'static [Self] = &[
        Self::new(F32x3::new(-0.5, -0.5, 0.0)),
        Self::new(F32x3::new(0.5, -0.5, 0.0)),
        Self::new(F32x3::new(0.0, 0.5, 0.0)),
    ];

    #[rustfmt::skip]
    pub const QUAD: &'static [Self] = &[
        Self::new(F32x3::new(-0.5, -0.5, 0.0)), // Left bottom
        Self::new(F32x3::new(0.5, -0.5, 0.0)),  // Right bottom
        Self::new(F32x3::new(0.5, 0.5, 0.0)),   // Right top
        Self::new(F32x3::new(-0.5, 0.5, 0.0)),  // Left top
    ];

    #[rustfmt::skip]
    pub const QUAD_INDICES: &'static [u32] = &[
        0, 1, 2, // First polygon
        0, 2, 3, // Second polygon
    ];

    pub const ATTRS: [VertexAttribute; 1] = vertex_attr_array![0 => Float32x3];

    pub const LAYOUT: VertexBufferLayout<'static> = VertexBufferLayout {
        array_stride: size_of::<Self>() as BufferAddress,
        step_mode: VertexStepMode::Vertex,
        attributes: &Self::ATTRS,
    };

    #[inline]
    pub const fn new(position: F32x3) -> Self {
        Self { position }
    }
}

impl From<[f32; 3]> for Vertex {
    fn from(position: [f32; 3]) -> Self {
        Self::new(F32x3::from(position))
    }
}
