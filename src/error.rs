//! Error types for the fingerprint comparison
//!
//! This module defines all error types used throughout the crate,
//! one enum per stage of the pipeline plus an umbrella type for the driver.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Main error type for a comparison run
#[derive(Debug, Error)]
pub enum CompareError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Figure rendering errors
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    /// Writing user-facing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization errors
    #[cfg(feature = "diagnostics")]
    #[error("Report error: {0}")]
    Report(String),
}

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Analysed duration must be positive
    #[error("Invalid fingerprint length: {0} seconds")]
    InvalidLength(u32),

    /// Figure too small to hold three panels
    #[error("Invalid figure dimensions: {width}x{height} pixels")]
    InvalidDimensions { width: u32, height: u32 },

    /// No fingerprinting executable given
    #[error("Fingerprint tool name is empty")]
    EmptyTool,

    /// Configured font file is missing
    #[error("Font file not found: {}", .0.display())]
    FontNotFound(PathBuf),
}

/// Fingerprint extraction errors
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The tool could not be started at all
    #[error("failed to run {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: std::io::Error,
    },

    /// The tool ran but reported failure
    #[error("command returned {status}{}", stderr_suffix(.stderr))]
    ExitStatus { status: ExitStatus, stderr: String },

    /// No `FINGERPRINT=` line in the tool output
    #[error("no FINGERPRINT line in tool output")]
    MissingFingerprint,

    /// The payload was present but empty
    #[error("FINGERPRINT line has no values")]
    EmptyFingerprint,

    /// A payload value is not a 32-bit integer
    #[error("invalid fingerprint value {value:?} at index {index}")]
    InvalidValue { index: usize, value: String },
}

/// Figure rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    /// Drawing backend failure (encoding, unsupported format, font layout)
    #[error("Drawing backend error: {0}")]
    Backend(String),

    /// File system failure while preparing the output
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The platform image viewer could not be launched
    #[error("failed to launch viewer {viewer}: {source}")]
    Viewer {
        viewer: String,
        #[source]
        source: std::io::Error,
    },
}

fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Specialized result types for different modules
pub type CompareResult<T> = std::result::Result<T, CompareError>;
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
pub type ExtractResult<T> = std::result::Result<T, ExtractError>;
pub type RenderResult<T> = std::result::Result<T, RenderError>;
