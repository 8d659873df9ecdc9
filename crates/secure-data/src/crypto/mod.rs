//! AES-256-GCM envelopes, SHA-256 digests, and random tokens.
//!
//! This module is intentionally free of configuration and I/O. Keys come in
//! through [`crate::key::KeyDeriver`].
//!
//! # Envelope format
//!
//! ```text
//! <base64(iv)>:<base64(tag)>:<base64(ciphertext)>
//! ```
//!
//! Standard padded base64 throughout. There is no version marker: envelopes
//! written by earlier deployments share this exact layout and must keep
//! decrypting.

pub mod cipher;
pub mod digest;
pub mod envelope;
pub mod random;

pub use cipher::{AuthenticatedCipher, IV_LEN, TAG_LEN};
pub use digest::{compare_digest, digest, DIGEST_HEX_LEN};
pub use envelope::{is_valid_envelope_format, Envelope};
pub use random::{generate_random_string, DEFAULT_RANDOM_LEN};
