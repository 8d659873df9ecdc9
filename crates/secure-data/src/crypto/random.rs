//! Random hex tokens.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

/// Default token length in characters.
pub const DEFAULT_RANDOM_LEN: usize = 32;

/// A string of `len` lowercase hex characters drawn from the OS CSPRNG.
pub fn generate_random_string(len: usize) -> String {
    let mut bytes = vec![0u8; len.div_ceil(2)];
    OsRng.fill_bytes(&mut bytes);
    let mut out = hex::encode(bytes);
    out.truncate(len);
    out
}
