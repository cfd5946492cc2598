use std::{env::var, path::PathBuf};

use thiserror::Error;
use wgpu::Backends;

use crate::{
    consts::{DEFAULT_MODEL_PATH, DEFAULT_TARGET_FPS},
    scene::shape::Shape,
};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Unknown graphics backend {0:?} (expected gl, vulkan, metal, dx12, primary or all)")]
    Backend(String),
    #[error("Can't parse {key} as a boolean (found: {value:?})")]
    Bool { key: &'static str, value: String },
    #[error("Can't parse {key} as a positive frame rate (found: {value:?})")]
    Fps { key: &'static str, value: String },
    #[error("Unknown shape {0:?} (expected triangle, quad or model)")]
    Shape(String),
}

/// Startup configuration read from the environment
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Graphics APIs wgpu may pick an adapter from. `None` when not set
    /// explicitly, see [`Settings::backend_candidates`]
    pub backends: Option<Backends>,
    /// Wait for vertical sync on present
    pub vsync: bool,
    /// Frame limit used when vsync is off
    pub target_fps: u32,
    /// Primitive shown on startup
    pub shape: Shape,
    /// Model imported on startup or when the overlay asks for it
    pub model_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            backends: None,
            vsync: true,
            target_fps: DEFAULT_TARGET_FPS,
            shape: Shape::Model,
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
        }
    }
}

impl Settings {
    pub const BACKEND: &'static str = "PRISM_BACKEND";
    pub const VSYNC: &'static str = "PRISM_VSYNC";
    pub const FPS: &'static str = "PRISM_FPS";
    pub const SHAPE: &'static str = "PRISM_SHAPE";
    pub const MODEL: &'static str = "PRISM_MODEL";

    pub const DEFAULT_BACKENDS: Backends = Backends::GL;

    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Build settings from `lookup`, falling back to defaults for missing keys
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let mut settings = Self::default();

        if let Some(value) = lookup(Self::BACKEND) {
            settings.backends = Some(parse_backends(&value)?);
        }
        if let Some(value) = lookup(Self::VSYNC) {
            settings.vsync = parse_bool(Self::VSYNC, &value)?;
        }
        if let Some(value) = lookup(Self::FPS) {
            settings.target_fps = match value.trim().parse::<u32>() {
                Ok(fps) if fps > 0 => fps,
                _ => return Err(SettingsError::Fps { key: Self::FPS, value }),
            };
        }
        if let Some(value) = lookup(Self::SHAPE) {
            settings.shape = value.parse()?;
        }
        if let Some(value) = lookup(Self::MODEL) {
            if !value.trim().is_empty() {
                settings.model_path = PathBuf::from(value);
            }
        }

        Ok(settings)
    }

    /// Backend sets to try in order. OpenGL is preferred, but when nothing
    /// was requested the native API is tried if no GL adapter shows up.
    pub fn backend_candidates(&self) -> Vec<Backends> {
        match self.backends {
            Some(backends) => vec![backends],
            None => vec![Self::DEFAULT_BACKENDS, Backends::PRIMARY],
        }
    }
}

fn parse_backends(value: &str) -> Result<Backends, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "gl" | "opengl" | "gles" => Ok(Backends::GL),
        "vulkan" | "vk" => Ok(Backends::VULKAN),
        "metal" => Ok(Backends::METAL),
        "dx12" | "d3d12" => Ok(Backends::DX12),
        "primary" => Ok(Backends::PRIMARY),
        "all" => Ok(Backends::all()),
        _ => Err(SettingsError::Backend(value.to_owned())),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, SettingsError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Ok(true),
        "0" | "false" | "off" | "no" => Ok(false),
        _ => Err(SettingsError::Bool {
            key,
            value: value.to_owned(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, SettingsError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(settings(&[]).unwrap(), Settings::default());
    }

    #[test]
    fn reads_every_key() {
        let settings = settings(&[
            ("PRISM_BACKEND", "Vulkan"),
            ("PRISM_VSYNC", "off"),
            ("PRISM_FPS", "144"),
            ("PRISM_SHAPE", "quad"),
            ("PRISM_MODEL", "models/teapot.glb"),
        ])
        .unwrap();

        assert_eq!(settings.backends, Some(Backends::VULKAN));
        assert!(!settings.vsync);
        assert_eq!(settings.target_fps, 144);
        assert_eq!(settings.shape, Shape::Quad);
        assert_eq!(settings.model_path, PathBuf::from("models/teapot.glb"));
    }

    #[test]
    fn blank_model_path_keeps_default() {
        let settings = settings(&[("PRISM_MODEL", "  ")]).unwrap();
        assert_eq!(settings.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn rejects_bad_values() {
        assert_eq!(
            settings(&[("PRISM_BACKEND", "glide")]),
            Err(SettingsError::Backend("glide".into()))
        );
        assert_eq!(
            settings(&[("PRISM_VSYNC", "maybe")]),
            Err(SettingsError::Bool {
                key: Settings::VSYNC,
                value: "maybe".into()
            })
        );
        assert_eq!(
            settings(&[("PRISM_FPS", "0")]),
            Err(SettingsError::Fps {
                key: Settings::FPS,
                value: "0".into()
            })
        );
        assert_eq!(
            settings(&[("PRISM_SHAPE", "circle")]),
            Err(SettingsError::Shape("circle".into()))
        );
    }

    #[test]
    fn unset_backend_falls_back_to_primary() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.backends, None);
        assert_eq!(
            settings.backend_candidates(),
            vec![Backends::GL, Backends::PRIMARY]
        );
    }

    #[test]
    fn explicit_backend_has_no_fallback() {
        let gl = settings(&[("PRISM_BACKEND", "gl")]).unwrap();
        assert_eq!(gl.backends, Some(Backends::GL));
        assert_eq!(gl.backend_candidates(), vec![Backends::GL]);

        let metal = settings(&[("PRISM_BACKEND", "metal")]).unwrap();
        assert_eq!(metal.backend_candidates(), vec![Backends::METAL]);
    }
}
