use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for helmgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// An application folder cannot be mapped to an identity or build config.
    #[error("Cannot resolve application at '{}': {reason}", path.display())]
    Configuration { path: PathBuf, reason: String },

    /// Application folders were selected without a root directory to resolve them against.
    #[error("Cannot resolve application folders: {0}")]
    PathResolution(String),

    /// The assembled deployment configuration or a supplied answer is invalid.
    #[error("Invalid deployment configuration: {0}")]
    Validation(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// A value could not be serialized for output.
    #[error("Failed to serialize {what}: {details}")]
    Serialize { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Interactive prompt failed or was aborted.
    #[error("Prompt failed: {0}")]
    Prompt(String),

    /// Chart template could not be registered or rendered.
    #[error("Template error: {0}")]
    Template(String),
}

impl AppError {
    pub fn configuration<P: Into<PathBuf>, S: Into<String>>(path: P, reason: S) -> Self {
        AppError::Configuration { path: path.into(), reason: reason.into() }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        AppError::Validation(message.into())
    }

    pub fn parse<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::ParseError { what: what.into(), details: details.to_string() }
    }

    pub fn serialize<W: Into<String>, D: ToString>(what: W, details: D) -> Self {
        AppError::Serialize { what: what.into(), details: details.to_string() }
    }

    /// Whether this error was raised before anything was written, by one of the
    /// pipeline's own consistency checks rather than by the environment.
    pub fn is_pipeline_rejection(&self) -> bool {
        matches!(
            self,
            AppError::Configuration { .. } | AppError::PathResolution(_) | AppError::Validation(_)
        )
    }
}
