use std::env::var;

use thiserror::Error;
use tracing_subscriber::fmt::fmt;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Can't parse log level (found: {0:?})")]
    LogLevelError(Option<String>),
}

/// Install the global tracing subscriber.
///
/// `LOG_LEVEL` picks the level for the application; wgpu and naga are capped
/// so their per-frame chatter doesn't drown the demo's own output.
pub fn bootstrap() -> Result<(), BootstrapError> {
    fmt()
        .with_env_filter(format!(
            "{},wgpu_core=warn,wgpu_hal=warn,naga=info",
            log_level(var("LOG_LEVEL").ok())?
        ))
        .init();

    Ok(())
}

fn log_level(value: Option<String>) -> Result<String, BootstrapError> {
    match value {
        Some(level) => match level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => Ok(level),
            _ => Err(BootstrapError::LogLevelError(Some(level))),
        },
        #[cfg(debug_assertions)]
        None => Ok(String::from("trace")),
        #[cfg(not(debug_assertions))]
        None => Ok(String::from("info")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_levels_in_any_case() {
        assert_eq!(log_level(Some("WARN".into())).unwrap(), "WARN");
        assert_eq!(log_level(Some("debug".into())).unwrap(), "debug");
    }

    #[test]
    fn rejects_unknown_level() {
        assert!(matches!(
            log_level(Some("verbose".into())),
            Err(BootstrapError::LogLevelError(Some(level))) if level == "verbose"
        ));
    }

    #[test]
    fn defaults_by_build_profile() {
        let level = log_level(None).unwrap();
        if cfg!(debug_assertions) {
            assert_eq!(level, "trace");
        } else {
            assert_eq!(level, "info");
        }
    }
}
