use thiserror::Error;
use wgpu::{RequestDeviceError, SurfaceError};

/// Represents one of renderer errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to request a device: {0}")]
    RequestDeviceError(#[from] RequestDeviceError),
    #[error("Supported adapters not found for {0:?}")]
    AdapterNotFound(wgpu::Backends),
    #[error("Compatible surface format not found")]
    NoCompatibleSurfaceFormat,
    #[error("Surface error: {0}")]
    SurfaceError(#[from] SurfaceError),
    #[error("Overlay rendering failed: {0}")]
    OverlayError(String),
}
