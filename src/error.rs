//! Configuration error types
//!
//! The simulation itself has no recoverable failures; errors only surface when
//! a host hands us settings we cannot use.

use std::io;

/// Errors produced while loading or validating [`crate::Settings`]
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid settings: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "missing");
        let error: ConfigError = io_error.into();
        assert!(matches!(error, ConfigError::Io(_)));
    }

    #[test]
    fn test_config_error_from_parse_error() {
        let parse_error = serde_json::from_str::<u32>("not json").unwrap_err();
        let error: ConfigError = parse_error.into();
        assert!(matches!(error, ConfigError::Parse(_)));
        assert!(error.to_string().starts_with("Settings parse error"));
    }
}
