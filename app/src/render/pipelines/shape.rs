use common::span;
use wgpu::{
    BlendState, ColorTargetState, ColorWrites, CompareFunction, DepthBiasState, DepthStencilState,
    Device, FragmentState, FrontFace, MultisampleState, PipelineLayoutDescriptor, PolygonMode,
    PrimitiveState, PrimitiveTopology, RenderPipeline, RenderPipelineDescriptor, ShaderModule,
    StencilState, SurfaceConfiguration, VertexState,
};

use crate::render::{primitives::vertex::Vertex, texture::Texture};

use super::{GlobalLayout, LocalLayout};

/// The single pipeline of the demo: flat colored triangles with depth test
pub struct ShapePipeline {
    pub inner: RenderPipeline,
}

impl ShapePipeline {
    pub fn new(
        device: &Device,
        config: &SurfaceConfiguration,
        shader: &ShaderModule,
        globals_layout: &GlobalLayout,
        locals_layout: &LocalLayout,
    ) -> Self {
        span!(_guard, "ShapePipeline::new");

        let layout = device.create_pipeline_layout(&PipelineLayoutDescriptor {
            label: Some("PipelineLayout: Shape"),
            bind_group_layouts: &[&globals_layout.globals, &locals_layout.locals],
            push_constant_ranges: &[],
        });

        Self {
            inner: device.create_render_pipeline(&RenderPipelineDescriptor {
                label: Some("RenderPipeline: Shape"),
                layout: Some(&layout),
                vertex: VertexState {
                    module: shader,
                    entry_point: "vs_main",
                    buffers: &[Vertex::LAYOUT],
                },
                primitive: PrimitiveState {
                    topology: PrimitiveTopology::TriangleList,
                    strip_index_format: None,
                    front_face: FrontFace::Ccw,
                    // Imported models come with either winding
                    cull_mode: None,
                    unclipped_depth: false,
                    polygon_mode: PolygonMode::Fill,
                    conservative: false,
                },
                depth_stencil: Some(DepthStencilState {
                    format: Texture::DEPTH_FORMAT,
                    depth_write_enabled: true,
                    depth_compare: CompareFunction::Less,
                    stencil: StencilState::default(),
                    bias: DepthBiasState::default(),
                }),
                multisample: MultisampleState {
                    count: 1,
                    mask: !0,
                    alpha_to_coverage_enabled: false,
                },
                fragment: Some(FragmentState {
                    module: shader,
                    entry_point: "fs_main",
                    targets: &[Some(ColorTargetState {
                        format: config.format,
                        blend: Some(BlendState::ALPHA_BLENDING),
                        write_mask: ColorWrites::ALL,
                    })],
                }),
                multiview: None,
            }),
        }
    }
}
