//! AES-256-GCM encryption and decryption of individual secrets.
//!
//! **Algorithm choice:** AES-256-GCM with a 128-bit IV and a detached 128-bit
//! tag. The IV is drawn fresh from the OS CSPRNG on every call, so identical
//! plaintexts produce different envelopes.
//!
//! **Never reuse an IV under the same key.** GCM nonce reuse is catastrophic:
//! it breaks both confidentiality and authentication.

use aes_gcm::{
    aead::{consts::U16, AeadInPlace, KeyInit, OsRng},
    aes::Aes256,
    AesGcm, Nonce, Tag,
};
use common::SecureDataError;
use tracing::warn;

use super::envelope::Envelope;
use crate::key::{DerivedKey, KeyDeriver};

/// Byte length of the initialisation vector (16 bytes = 128 bits).
pub const IV_LEN: usize = 16;

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// AES-256-GCM with a 16-byte nonce.
type Aes256Gcm16 = AesGcm<Aes256, U16>;

/// Authenticated symmetric cipher producing and consuming textual envelopes.
///
/// Holds no mutable state; safe to share across threads and call
/// concurrently.
#[derive(Clone, Debug)]
pub struct AuthenticatedCipher {
    keys: KeyDeriver,
}

impl AuthenticatedCipher {
    /// Create a cipher that derives its key through `keys`.
    pub fn new(keys: KeyDeriver) -> Self {
        Self { keys }
    }

    /// Convenience constructor for a bare shared secret without caching.
    pub fn from_secret(secret: impl Into<String>) -> Self {
        Self::new(KeyDeriver::new(secret))
    }

    /// The key deriver backing this cipher.
    pub fn keys(&self) -> &KeyDeriver {
        &self.keys
    }

    /// Encrypt `plaintext` into an envelope string.
    ///
    /// # Errors
    ///
    /// Returns [`SecureDataError::EmptyInput`] if `plaintext` is empty,
    /// [`SecureDataError::Configuration`] if no shared secret is configured,
    /// and [`SecureDataError::Unknown`] on an internal AEAD error (should be
    /// unreachable with a valid key).
    pub fn encrypt(&self, plaintext: &str) -> Result<String, SecureDataError> {
        if plaintext.is_empty() {
            return Err(SecureDataError::EmptyInput("plaintext"));
        }
        self.seal(plaintext.as_bytes())
            .map(|env| env.encode())
            .inspect_err(|e| warn!(code = e.code(), error = %e, "encryption failed"))
    }

    /// Decrypt an envelope string back to the original plaintext.
    ///
    /// # Errors
    ///
    /// Returns [`SecureDataError::EmptyInput`] if `envelope` is empty,
    /// [`SecureDataError::Format`] if it is not three base64 segments,
    /// [`SecureDataError::Configuration`] if no shared secret is configured,
    /// and [`SecureDataError::Authentication`] if the tag does not verify
    /// (tampering, wrong key, or corrupted data).
    pub fn decrypt(&self, envelope: &str) -> Result<String, SecureDataError> {
        if envelope.is_empty() {
            return Err(SecureDataError::EmptyInput("envelope"));
        }
        self.open_str(envelope)
            .inspect_err(|e| warn!(code = e.code(), error = %e, "decryption failed"))
    }

    fn seal(&self, plaintext: &[u8]) -> Result<Envelope, SecureDataError> {
        let key = self.keys.derive()?;
        let cipher = build_cipher(&key)?;

        // Use OsRng for a cryptographically secure random IV.
        use aes_gcm::aead::rand_core::RngCore;
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);

        let mut buffer = plaintext.to_vec();
        let tag = cipher
            .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
            .map_err(|_| SecureDataError::Unknown("aead encryption failed".into()))?;

        Ok(Envelope {
            iv: iv.to_vec(),
            tag: tag.to_vec(),
            ciphertext: buffer,
        })
    }

    fn open_str(&self, envelope: &str) -> Result<String, SecureDataError> {
        let parsed = Envelope::parse(envelope)?;
        let plaintext = self.open(&parsed)?;
        String::from_utf8(plaintext)
            .map_err(|_| SecureDataError::Unknown("decrypted data is not UTF-8".into()))
    }

    fn open(&self, envelope: &Envelope) -> Result<Vec<u8>, SecureDataError> {
        let key = self.keys.derive()?;
        // A truncated or padded IV/tag can never verify.
        if envelope.iv.len() != IV_LEN || envelope.tag.len() != TAG_LEN {
            return Err(SecureDataError::Authentication);
        }
        let cipher = build_cipher(&key)?;
        let mut buffer = envelope.ciphertext.clone();
        cipher
            .decrypt_in_place_detached(
                Nonce::<U16>::from_slice(&envelope.iv),
                b"",
                &mut buffer,
                Tag::from_slice(&envelope.tag),
            )
            .map_err(|_| SecureDataError::Authentication)?;
        Ok(buffer)
    }
}

fn build_cipher(key: &DerivedKey) -> Result<Aes256Gcm16, SecureDataError> {
    Aes256Gcm16::new_from_slice(key.as_bytes())
        .map_err(|_| SecureDataError::Unknown("invalid key length".into()))
}
