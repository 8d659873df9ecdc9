//! Symmetric key derivation from the process-wide shared secret.
//!
//! # Scheme
//!
//! PBKDF2-HMAC-SHA256 over the shared secret with a fixed, application-wide
//! salt and 100 000 iterations, producing a 32-byte AES-256 key.
//!
//! The salt is fixed, so every installation configured with the same shared
//! secret derives the same key. Existing envelopes depend on this: changing
//! [`KDF_SALT`] or [`KDF_ITERATIONS`] makes every stored envelope
//! undecryptable.
//!
//! # Security invariants
//!
//! - The derived key is **never** written to disk, logged, or included in traces.
//! - The shared secret is held as a [`SecretString`] and is only exposed to the
//!   KDF itself.

pub mod store;

pub use store::{DerivedKey, KeyCache, KEY_LEN};

use std::sync::Arc;

use common::SecureDataError;
use hmac::Hmac;
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;

use crate::config::Config;

/// Application-wide PBKDF2 salt.
pub const KDF_SALT: &[u8] = b"openpanel-encryption-salt-v1";

/// PBKDF2 iteration count.
pub const KDF_ITERATIONS: u32 = 100_000;

/// Derive the 32-byte symmetric key for `secret`.
///
/// Pure function of its input: the same secret yields the same key across
/// process restarts.
///
/// # Errors
///
/// Returns [`SecureDataError::Configuration`] if `secret` is empty.
pub fn derive_key(secret: &str) -> Result<DerivedKey, SecureDataError> {
    if secret.is_empty() {
        return Err(SecureDataError::Configuration(
            "shared secret is empty".into(),
        ));
    }
    let mut key = DerivedKey::zeroed();
    pbkdf2::pbkdf2::<Hmac<Sha256>>(
        secret.as_bytes(),
        KDF_SALT,
        KDF_ITERATIONS,
        key.as_mut_bytes(),
    )
    .map_err(|e| SecureDataError::Unknown(format!("key derivation failed: {e}")))?;
    Ok(key)
}

/// Derives the cipher key from an injected shared secret.
///
/// Re-derives on every call unless built [`with_cache`](Self::with_cache).
/// Cheap to clone; clones share the secret and the cache.
#[derive(Clone, Debug)]
pub struct KeyDeriver {
    secret: Option<Arc<SecretString>>,
    cache: Option<KeyCache>,
}

impl KeyDeriver {
    /// A deriver for `secret`. An empty secret is accepted here and reported
    /// on first use.
    pub fn new(secret: impl Into<String>) -> Self {
        Self::from_secret(Some(SecretString::from(secret.into())))
    }

    /// A deriver for an optional secret. `None` fails every derivation with
    /// [`SecureDataError::Configuration`].
    pub fn from_secret(secret: Option<SecretString>) -> Self {
        Self {
            secret: secret.map(Arc::new),
            cache: None,
        }
    }

    /// Build from loaded configuration, enabling the key cache when
    /// `CACHE_DERIVED_KEY` is set.
    pub fn from_config(cfg: &Config) -> Self {
        let secret = cfg
            .shared_secret()
            .map(|s| SecretString::from(s.expose_secret().to_owned()));
        let deriver = Self::from_secret(secret);
        if cfg.cache_derived_key {
            deriver.with_cache()
        } else {
            deriver
        }
    }

    /// Keep the key for the process lifetime after the first successful
    /// derivation.
    pub fn with_cache(mut self) -> Self {
        self.cache = Some(KeyCache::new());
        self
    }

    /// Returns `true` if a non-empty secret is configured.
    pub fn is_configured(&self) -> bool {
        self.secret
            .as_ref()
            .is_some_and(|s| !s.expose_secret().is_empty())
    }

    /// Derive (or fetch from cache) the symmetric key.
    ///
    /// # Errors
    ///
    /// Returns [`SecureDataError::Configuration`] if the secret is absent or
    /// empty.
    pub fn derive(&self) -> Result<Arc<DerivedKey>, SecureDataError> {
        match &self.cache {
            Some(cache) => cache.get_or_try_init(|| self.derive_uncached()),
            None => self.derive_uncached().map(Arc::new),
        }
    }

    fn derive_uncached(&self) -> Result<DerivedKey, SecureDataError> {
        let secret = self.secret.as_ref().ok_or_else(|| {
            SecureDataError::Configuration("shared secret is not configured".into())
        })?;
        derive_key(secret.expose_secret())
    }
}
