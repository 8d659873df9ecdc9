//! Configuration loading and validation.
//!
//! All values are read from environment variables. A missing shared secret is
//! **not** a load error: it surfaces as a configuration error on the first
//! cryptographic operation. Call [`Config::require_shared_secret`] at startup
//! to fail fast instead.

use anyhow::{Context, Result};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer};

/// Validated service configuration.
#[derive(Debug, Deserialize)]
pub struct Config {
    /// Shared secret. Takes precedence over `ENCRYPTION_KEY` when both are set.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub jwt_secret: Option<SecretString>,

    /// Shared secret, used when `JWT_SECRET` is absent or empty.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub encryption_key: Option<SecretString>,

    /// Keep the derived key for the process lifetime after first use.
    #[serde(default)]
    pub cache_derived_key: bool,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".into()
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        Self::from_environment(config::Environment::default())
    }

    pub(crate) fn from_environment(env: config::Environment) -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(env)
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The effective shared secret: `JWT_SECRET` if non-empty, otherwise
    /// `ENCRYPTION_KEY` if non-empty.
    pub fn shared_secret(&self) -> Option<&SecretString> {
        [&self.jwt_secret, &self.encryption_key]
            .into_iter()
            .flatten()
            .find(|s| !s.expose_secret().is_empty())
    }

    /// Fail unless a non-empty shared secret is configured.
    ///
    /// # Errors
    ///
    /// Returns an error naming both accepted variables.
    pub fn require_shared_secret(&self) -> Result<()> {
        if self.shared_secret().is_none() {
            anyhow::bail!("JWT_SECRET or ENCRYPTION_KEY is required and must not be empty");
        }
        Ok(())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.log_level.trim().is_empty() {
            anyhow::bail!("LOG_LEVEL must not be empty");
        }
        Ok(())
    }
}
