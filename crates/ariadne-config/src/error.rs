//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use ariadne_router::{MethodSetError, PatternError};

/// Errors that can occur while loading or validating routing configuration.
///
/// All of these are startup-time and fatal: the application must refuse to
/// start rather than silently drop a malformed route.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Configuration file not found.
    #[error("configuration file not found: {path}")]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Failed to read the configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The file extension names no supported format.
    #[error("unsupported configuration format: {path} (expected .toml or .json)")]
    UnsupportedFormat {
        /// Path to the file.
        path: PathBuf,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing or deserialization error.
    #[error("failed to parse configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A route pattern failed to compile.
    #[error("invalid route pattern: {0}")]
    Pattern(#[from] PatternError),

    /// A method constraint string failed to parse.
    #[error("invalid method constraint: {0}")]
    Methods(#[from] MethodSetError),

    /// Environment variable override could not be applied.
    #[error("failed to apply environment override {var}: {reason}")]
    EnvOverride {
        /// The environment variable name.
        var: String,
        /// Explanation of the failure.
        reason: String,
    },

    /// Validation failed after loading.
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl ConfigError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
