//! Display-safe renderings of secrets.
//!
//! Nothing here is cryptographic. A masked string is for showing to people
//! and must never be fed back into encryption or comparison.

pub mod sanitize;

pub use sanitize::{is_sensitive_field, mask_sensitive, sanitize_for_logging};

/// Character used to hide secret content.
pub const BULLET: char = '•';

/// Number of trailing characters left visible by [`mask_default`].
pub const DEFAULT_VISIBLE_SUFFIX: usize = 4;

/// Minimum number of bullets in any non-empty masked output.
const MIN_HIDDEN: usize = 6;

/// Hide all but the last `visible_suffix_len` characters of `secret`.
///
/// - Empty input renders as an empty string.
/// - Input no longer than `visible_suffix_len` renders as six bullets, so
///   short secrets are never shown.
/// - Otherwise the output is `max(len - visible, 6)` bullets followed by the
///   visible suffix. It can be longer than the input.
///
/// Lengths are counted in `char`s.
pub fn mask(secret: &str, visible_suffix_len: usize) -> String {
    if secret.is_empty() {
        return String::new();
    }
    let len = secret.chars().count();
    if len <= visible_suffix_len {
        return bullets(MIN_HIDDEN);
    }
    let hidden = (len - visible_suffix_len).max(MIN_HIDDEN);
    let mut out = bullets(hidden);
    out.extend(secret.chars().skip(len - visible_suffix_len));
    out
}

/// [`mask`] with the default visible suffix of four characters.
pub fn mask_default(secret: &str) -> String {
    mask(secret, DEFAULT_VISIBLE_SUFFIX)
}

fn bullets(n: usize) -> String {
    std::iter::repeat(BULLET).take(n).collect()
}
