//! CLI error types.

use thiserror::Error;

/// Errors reported by the `rastelev` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error from the elevation library.
    #[error(transparent)]
    Elevation(#[from] rastelev_core::ElevationError),

    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML (de)serialization error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension does not name a supported properties format.
    #[error("Unsupported properties file '{0}' (expected .yaml, .yml or .xml)")]
    UnsupportedFormat(String),

    /// An XML properties file without an `<elevation>` element.
    #[error("No <elevation> element found in {0}")]
    MissingElevationElement(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;
