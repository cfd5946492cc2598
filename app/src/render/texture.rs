use tracing::debug;
use wgpu::{
    Device, Extent3d, SurfaceConfiguration, Texture as WTexture, TextureDescriptor,
    TextureDimension, TextureFormat, TextureUsages, TextureView, TextureViewDescriptor,
};

/// Represents image that has been uploaded to the GPU
pub struct Texture {
    pub texture: WTexture,
    pub view: TextureView,
    pub size: Extent3d,
    pub format: TextureFormat,
}

impl Texture {
    pub const DEPTH_FORMAT: TextureFormat = TextureFormat::Depth32Float;

    /// Depth attachment matching the surface size
    pub fn new_depth(device: &Device, config: &SurfaceConfiguration, label: &str) -> Self {
        let size = Extent3d {
            width: config.width.max(1),
            height: config.height.max(1),
            depth_or_array_layers: 1,
        };

        debug!(texture = label, ?size, "Creating new depth texture");
        let texture = device.create_texture(&TextureDescriptor {
            label: Some(label),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: TextureDimension::D2,
            format: Self::DEPTH_FORMAT,
            usage: TextureUsages::RENDER_ATTACHMENT,
        });

        let view = texture.create_view(&TextureViewDescriptor::default());

        Self {
            texture,
            view,
            size,
            format: Self::DEPTH_FORMAT,
        }
    }
}
