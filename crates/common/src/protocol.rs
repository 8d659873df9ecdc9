//! Result and error bodies printed by the `secure-data` CLI.
//!
//! These are serialised as JSON when the caller asks for machine-readable
//! output. Error bodies never carry the internal failure detail.

use serde::{Deserialize, Serialize};

use crate::error::SecureDataError;

// ---------------------------------------------------------------------------
// Success
// ---------------------------------------------------------------------------

/// Body for a successful operation.
///
/// `result` is an envelope, a plaintext, a digest, a masked string, or the
/// textual form of a boolean, depending on the operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OperationResponse {
    /// Name of the operation that ran (e.g. `"encrypt"`).
    pub operation: String,
    /// Operation output.
    pub result: String,
}

impl OperationResponse {
    /// Construct an [`OperationResponse`].
    pub fn new(operation: impl Into<String>, result: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            result: result.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error body returned on any failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"format_error"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&SecureDataError> for ErrorResponse {
    fn from(err: &SecureDataError) -> Self {
        Self::new(err.code(), err.public_message())
    }
}
