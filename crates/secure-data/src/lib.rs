//! Protection of credential material at rest: key derivation from a shared
//! secret, AES-256-GCM envelopes, SHA-256 digests, and display masking.
//!
//! ```no_run
//! use secure_data::{crypto::AuthenticatedCipher, key::KeyDeriver};
//!
//! let cipher = AuthenticatedCipher::new(KeyDeriver::new("shared-secret"));
//! let envelope = cipher.encrypt("sk-live-1234").unwrap();
//! assert_eq!(cipher.decrypt(&envelope).unwrap(), "sk-live-1234");
//! ```

pub mod cli;
pub mod config;
pub mod crypto;
pub mod key;
pub mod mask;
pub mod payload;
pub mod telemetry;
pub mod worker;

pub use common::{SecureDataError, PUBLIC_FAILURE_MESSAGE};
