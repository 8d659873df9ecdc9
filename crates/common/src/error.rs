//! Error taxonomy shared across crates.

use thiserror::Error;

/// Message surfaced to anything outside the process when an operation fails.
///
/// The specific variant and its detail are logged server-side only.
pub const PUBLIC_FAILURE_MESSAGE: &str = "failed to process secure data";

/// Failure kinds produced by the secure-data primitives.
///
/// None of these are transient. Retrying with the same inputs fails the same
/// way, so callers must not retry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecureDataError {
    /// The shared secret is missing or empty.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// An empty plaintext or envelope was passed to the cipher.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// The envelope is not three non-empty base64 segments.
    #[error("invalid envelope format: {0}")]
    Format(String),

    /// Tag verification failed: tampering, wrong key, or corrupted data.
    #[error("authentication failed")]
    Authentication,

    /// Any other failure in the underlying primitives.
    #[error("unexpected failure: {0}")]
    Unknown(String),
}

impl SecureDataError {
    /// Short machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            SecureDataError::Configuration(_) => "configuration_error",
            SecureDataError::EmptyInput(_) => "empty_input",
            SecureDataError::Format(_) => "format_error",
            SecureDataError::Authentication => "authentication_error",
            SecureDataError::Unknown(_) => "unknown_error",
        }
    }

    /// The generic message safe to show to external callers.
    pub fn public_message(&self) -> &'static str {
        PUBLIC_FAILURE_MESSAGE
    }
}
