//! `secure-data` command-line interface.

use std::io::Read;

use clap::{Parser, Subcommand};
use common::SecureDataError;

use crate::crypto::{self, AuthenticatedCipher, DEFAULT_RANDOM_LEN};
use crate::mask::{self, DEFAULT_VISIBLE_SUFFIX};

/// Encrypt, digest and mask credential material.
#[derive(Debug, Parser)]
#[command(name = "secure-data", version, about)]
pub struct Cli {
    /// Print a JSON result or error body instead of plain text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line.
///
/// Inputs left off the command line are read from stdin, with one trailing
/// newline removed.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Encrypt a plaintext secret into an envelope.
    Encrypt { plaintext: Option<String> },
    /// Decrypt an envelope back to its plaintext.
    Decrypt { envelope: Option<String> },
    /// Print the SHA-256 digest of the input.
    Digest { text: Option<String> },
    /// Check the input against a stored digest.
    Compare {
        /// Known digest, 64 hex characters.
        digest: String,
        text: Option<String>,
    },
    /// Render the input with all but a short suffix hidden.
    Mask {
        /// Trailing characters left visible.
        #[arg(short, long, default_value_t = DEFAULT_VISIBLE_SUFFIX)]
        visible: usize,
        secret: Option<String>,
    },
    /// Check whether the input has the shape of an envelope.
    Validate { envelope: Option<String> },
    /// Print a random hex token.
    Random {
        #[arg(default_value_t = DEFAULT_RANDOM_LEN)]
        length: usize,
    },
}

impl Command {
    /// Operation name used in JSON output.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Encrypt { .. } => "encrypt",
            Command::Decrypt { .. } => "decrypt",
            Command::Digest { .. } => "digest",
            Command::Compare { .. } => "compare",
            Command::Mask { .. } => "mask",
            Command::Validate { .. } => "validate",
            Command::Random { .. } => "random",
        }
    }

    /// Run the operation.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`SecureDataError`], or
    /// [`SecureDataError::Unknown`] if stdin cannot be read.
    pub fn run(self, cipher: &AuthenticatedCipher) -> Result<String, SecureDataError> {
        match self {
            Command::Encrypt { plaintext } => cipher.encrypt(&input_or_stdin(plaintext)?),
            Command::Decrypt { envelope } => cipher.decrypt(&input_or_stdin(envelope)?),
            Command::Digest { text } => Ok(crypto::digest(&input_or_stdin(text)?)),
            Command::Compare { digest, text } => {
                Ok(crypto::compare_digest(&input_or_stdin(text)?, &digest).to_string())
            }
            Command::Mask { visible, secret } => Ok(mask::mask(&input_or_stdin(secret)?, visible)),
            Command::Validate { envelope } => {
                Ok(crypto::is_valid_envelope_format(&input_or_stdin(envelope)?).to_string())
            }
            Command::Random { length } => Ok(crypto::generate_random_string(length)),
        }
    }
}

fn input_or_stdin(arg: Option<String>) -> Result<String, SecureDataError> {
    match arg {
        Some(value) => Ok(value),
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| SecureDataError::Unknown(format!("failed to read stdin: {e}")))?;
            Ok(strip_trailing_newline(buf))
        }
    }
}

fn strip_trailing_newline(mut s: String) -> String {
    if s.ends_with('\n') {
        s.pop();
        if s.ends_with('\r') {
            s.pop();
        }
    }
    s
}
