use thiserror::Error;

use crate::{bootstrap::BootstrapError, render::error::RenderError, settings::SettingsError};

#[derive(Error, Debug)]
pub enum Error {
    /// Error related to bootstrapping
    #[error(transparent)]
    BootstrapError(#[from] BootstrapError),
    /// Invalid configuration
    #[error(transparent)]
    SettingsError(#[from] SettingsError),
    /// GPU initialization failed
    #[error(transparent)]
    RenderError(#[from] RenderError),
    /// The window could not be created
    #[error("Failed to create window: {0}")]
    WindowError(#[from] winit::error::OsError),
    /// The async runtime used for GPU requests could not start
    #[error("Failed to start runtime: {0}")]
    RuntimeError(#[from] std::io::Error),
}
