//! Error types for the alttext captioning pipeline.
//!
//! Errors are organized by stage so messages carry the relevant context
//! (file paths, HTTP status codes, timeout budgets).

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for alttext operations.
#[derive(Error, Debug)]
pub enum AltTextError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Captioning errors
    #[error("Caption error: {0}")]
    Caption(#[from] CaptionError),

    /// General I/O errors (report writing)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Per-image captioning errors.
#[derive(Error, Debug)]
pub enum CaptionError {
    /// Root directory for discovery does not exist
    #[error("Root directory not found: {0}")]
    RootNotFound(PathBuf),

    /// Reading the image file failed
    #[error("Failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },

    /// The captioning API call failed.
    ///
    /// `status_code` is set when the provider returned an HTTP error, so
    /// retry classification can be structured rather than string-matched.
    #[error("LLM error: {message}")]
    Llm {
        message: String,
        status_code: Option<u16>,
    },

    /// The captioning call exceeded its time budget
    #[error("Timeout for {path} after {timeout_ms}ms")]
    Timeout { path: PathBuf, timeout_ms: u64 },
}

/// Convenience type alias for alttext results.
pub type Result<T> = std::result::Result<T, AltTextError>;

/// Convenience type alias for captioning-stage results.
pub type CaptionResult<T> = std::result::Result<T, CaptionError>;
