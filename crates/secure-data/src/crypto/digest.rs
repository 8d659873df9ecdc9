//! One-way SHA-256 digests for equality checks on stored credentials.

use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

/// Length of a hex-encoded digest.
pub const DIGEST_HEX_LEN: usize = 64;

/// SHA-256 of the UTF-8 bytes of `text`, as 64 lowercase hex characters.
///
/// Accepts the empty string.
pub fn digest(text: &str) -> String {
    hex::encode(Sha256::digest(text.as_bytes()))
}

/// Compare `digest(text)` against a stored hex digest in constant time.
///
/// A `known_digest` that is not 64 hex characters is a non-match, not an
/// error. Hex decoding is case-insensitive.
pub fn compare_digest(text: &str, known_digest: &str) -> bool {
    if known_digest.len() != DIGEST_HEX_LEN {
        return false;
    }
    let Ok(known) = hex::decode(known_digest) else {
        return false;
    };
    let actual = Sha256::digest(text.as_bytes());
    actual.as_slice().ct_eq(&known).into()
}
