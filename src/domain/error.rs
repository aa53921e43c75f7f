use std::io;

use thiserror::Error;

/// Library-wide error type for sandbox-setup operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// No configuration document at the expected location.
    #[error("Configuration not found at {0}. Run 'sandbox-setup init' first.")]
    ConfigMissing(String),

    /// A configuration document already exists and would be overwritten.
    #[error("Configuration already exists at {0}. Use --force to overwrite.")]
    ConfigExists(String),

    /// Tool name is not present in the catalog.
    #[error("Tool '{0}' not found in configuration")]
    ToolNotFound(String),

    /// Download failed.
    #[error("Download of {url} failed: {details}")]
    Network { url: String, details: String },

    /// User input could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Settings file contains invalid values.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Parse error.
    #[error("Failed to parse {what}: {details}")]
    ParseError { what: String, details: String },

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),

    /// Embedded asset or template failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn network<U: Into<String>, D: Into<String>>(url: U, details: D) -> Self {
        AppError::Network { url: url.into(), details: details.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers expecting legacy behavior.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::InvalidInput(_)
            | AppError::InvalidSettings(_)
            | AppError::ParseError { .. }
            | AppError::TomlParseError(_) => io::ErrorKind::InvalidInput,
            AppError::ConfigMissing(_) | AppError::ToolNotFound(_) => io::ErrorKind::NotFound,
            AppError::ConfigExists(_) => io::ErrorKind::AlreadyExists,
            AppError::Network { .. } | AppError::Internal(_) => io::ErrorKind::Other,
        }
    }
}
