//! Error types for CSI topology translation
//!
//! Every failure is a value-level error. Nothing here is transient: inputs are
//! plain data, so retrying a failed translation produces the same error.

use thiserror::Error;

/// Unified error type for topology translation
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unsupported topology key: {key}")]
    UnsupportedKey { key: String },

    // =========================================================================
    // Region Errors
    // =========================================================================
    #[error("Zone {zone:?} in unexpected format: {reason}")]
    InvalidZone { zone: String, reason: String },

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Translator config parse error: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
}

impl Error {
    /// Check if this error is retryable
    ///
    /// Translation is deterministic, so the answer is always `false`.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Check if this error was caused by the PV or topology data itself
    /// rather than by translator configuration
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidInput(_) | Error::UnsupportedKey { .. } | Error::InvalidZone { .. }
        )
    }
}

/// Result type alias for topology translation
pub type Result<T> = std::result::Result<T, Error>;
