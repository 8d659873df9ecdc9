//! Offloads key derivation to Tokio's blocking pool for async callers.
//!
//! Every encrypt/decrypt runs 100 000 PBKDF2 iterations unless the key cache
//! is enabled. Running that directly on an async worker thread stalls every
//! other task scheduled on it.

use common::SecureDataError;

use crate::crypto::AuthenticatedCipher;

/// Async front for an [`AuthenticatedCipher`].
#[derive(Clone, Debug)]
pub struct BlockingCipher {
    inner: AuthenticatedCipher,
}

impl BlockingCipher {
    /// Wrap `cipher`.
    pub fn new(cipher: AuthenticatedCipher) -> Self {
        Self { inner: cipher }
    }

    /// [`AuthenticatedCipher::encrypt`] on the blocking pool.
    ///
    /// # Errors
    ///
    /// The cipher's errors, or [`SecureDataError::Unknown`] if the blocking
    /// task panicked or was cancelled.
    pub async fn encrypt(&self, plaintext: String) -> Result<String, SecureDataError> {
        let cipher = self.inner.clone();
        tokio::task::spawn_blocking(move || cipher.encrypt(&plaintext))
            .await
            .map_err(|e| SecureDataError::Unknown(format!("blocking task failed: {e}")))?
    }

    /// [`AuthenticatedCipher::decrypt`] on the blocking pool.
    ///
    /// # Errors
    ///
    /// As for [`BlockingCipher::encrypt`].
    pub async fn decrypt(&self, envelope: String) -> Result<String, SecureDataError> {
        let cipher = self.inner.clone();
        tokio::task::spawn_blocking(move || cipher.decrypt(&envelope))
            .await
            .map_err(|e| SecureDataError::Unknown(format!("blocking task failed: {e}")))?
    }
}
