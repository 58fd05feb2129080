//! Configuration management for the call insight batch
//!
//! Supports loading configuration from:
//! - YAML/TOML files under `config/`
//! - Environment variables (CALL_INSIGHTS_ prefix, `__` separator)
//! - Runtime overrides from the command line

pub mod settings;

pub use settings::{
    load_settings, load_settings_from, AnalyzerBackend, AnalyzerSettings, IoConfig,
    ObservabilityConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
