//! Error types for extdoctor operations.
//!
//! This module defines [`DoctorError`], the primary error type used throughout
//! the library, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `DoctorError` for domain-specific errors that need distinct handling
//! - Use `anyhow::Error` (via `DoctorError::Other`) for unexpected errors
//! - Collaborator failures arrive as [`HostError`](crate::host::HostError) and
//!   are wrapped in [`DoctorError::Host`] with the operation that failed

use std::path::PathBuf;
use thiserror::Error;

use crate::host::HostError;

/// Core error type for extdoctor operations.
#[derive(Debug, Error)]
pub enum DoctorError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// A component manifest could not be parsed as structured data.
    #[error("Failed to parse manifest of '{component}': {message}")]
    ManifestParse { component: String, message: String },

    /// A host collaborator call failed.
    #[error("{operation} failed: {source}")]
    Host {
        operation: &'static str,
        #[source]
        source: HostError,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DoctorError {
    /// Wrap a collaborator failure with the operation that produced it.
    pub fn host(operation: &'static str, source: HostError) -> Self {
        Self::Host { operation, source }
    }
}

/// Result type alias for extdoctor operations.
pub type Result<T> = std::result::Result<T, DoctorError>;
