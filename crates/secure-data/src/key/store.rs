//! [`DerivedKey`] buffer and the optional process-lifetime [`KeyCache`].

use std::sync::Arc;

use arc_swap::ArcSwapOption;
use zeroize::Zeroize;

/// Byte length of the derived AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// Heap-allocated so moves don't scatter copies of the key across the stack.
/// The bytes are zeroed on drop.
#[derive(Clone)]
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    /// An all-zero key, to be filled in place by the KDF.
    pub(crate) fn zeroed() -> Self {
        Self(Box::new([0u8; KEY_LEN]))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    pub(crate) fn as_mut_bytes(&mut self) -> &mut [u8; KEY_LEN] {
        &mut self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material, not even in debug builds.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Holds the derived key for the lifetime of the process once it has been
/// computed successfully.
///
/// Backed by [`ArcSwapOption`] so the encrypt/decrypt hot path reads the key
/// without taking a lock. Clones share the same slot.
#[derive(Clone, Debug, Default)]
pub struct KeyCache {
    inner: Arc<ArcSwapOption<DerivedKey>>,
}

impl KeyCache {
    /// Create a new, empty [`KeyCache`].
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached key, if any.
    pub fn current(&self) -> Option<Arc<DerivedKey>> {
        self.inner.load_full()
    }

    /// Return the cached key, or run `derive` and cache its result.
    ///
    /// Failures are returned to the caller and never cached, so a later call
    /// retries the derivation. Two threads racing on an empty cache may both
    /// derive; derivation is deterministic, so whichever store lands last is
    /// identical to the other.
    pub fn get_or_try_init<E>(
        &self,
        derive: impl FnOnce() -> Result<DerivedKey, E>,
    ) -> Result<Arc<DerivedKey>, E> {
        if let Some(key) = self.current() {
            return Ok(key);
        }
        let key = Arc::new(derive()?);
        self.inner.store(Some(Arc::clone(&key)));
        Ok(key)
    }
}
