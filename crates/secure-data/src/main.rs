//! `secure-data` — command-line entry point.
//!
//! Startup sequence:
//! 1. Parse arguments.
//! 2. Load and validate [`Config`] from environment variables.
//! 3. Initialise structured logging.
//! 4. Build the cipher from the configured shared secret and run the command.
//!
//! Failures print only the generic public message (or the JSON error body);
//! the detail goes to the log.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use common::protocol::{ErrorResponse, OperationResponse};
use tracing::{debug, warn};

use secure_data::cli::Cli;
use secure_data::config::Config;
use secure_data::crypto::AuthenticatedCipher;
use secure_data::key::KeyDeriver;
use secure_data::telemetry;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    telemetry::init(&cfg.log_level)?;

    let keys = KeyDeriver::from_config(&cfg);
    debug!(
        version = env!("CARGO_PKG_VERSION"),
        secret_configured = keys.is_configured(),
        cache_derived_key = cfg.cache_derived_key,
        "secure-data starting"
    );
    let cipher = AuthenticatedCipher::new(keys);

    let operation = cli.command.name();
    match cli.command.run(&cipher) {
        Ok(result) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::to_string(&OperationResponse::new(operation, result))?
                );
            } else {
                println!("{result}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            warn!(operation, code = e.code(), error = %e, "operation failed");
            if cli.json {
                println!("{}", serde_json::to_string(&ErrorResponse::from(&e))?);
            } else {
                eprintln!("error: {}", e.public_message());
            }
            Ok(ExitCode::FAILURE)
        }
    }
}
