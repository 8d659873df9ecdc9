//! Error taxonomy and response bodies shared across `secure-data` crates.

pub mod error;
pub mod protocol;

pub use error::{SecureDataError, PUBLIC_FAILURE_MESSAGE};
