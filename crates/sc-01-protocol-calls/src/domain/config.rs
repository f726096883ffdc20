//! Execution configuration with validation.

use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;

/// What to do when the gasless relay is unavailable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum RelayFallback {
    /// Report the relay failure to the caller.
    #[default]
    Fail,
    /// Retry once through the self-signed path. Only taken when the relay
    /// reported it was unavailable, so nothing was submitted.
    SelfSigned,
}

/// Protocol call execution configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutionConfig {
    /// Relay fallback policy (default: fail)
    pub relay_fallback: RelayFallback,
    /// Relayed transactions allowed to await settlement at once
    pub max_pending_transactions: usize,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        Self {
            relay_fallback: RelayFallback::Fail,
            max_pending_transactions: 256,
        }
    }
}

impl ExecutionConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SC_RELAY_FALLBACK`: `fail` or `self-signed` (default: fail)
    /// - `SC_MAX_PENDING_TRANSACTIONS`: queue capacity (default: 256)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("SC_RELAY_FALLBACK") {
            config.relay_fallback = match value.to_lowercase().as_str() {
                "fail" => RelayFallback::Fail,
                "self-signed" | "self_signed" => RelayFallback::SelfSigned,
                other => return Err(ConfigError::InvalidRelayFallback(other.to_string())),
            };
        }

        if let Some(value) = lookup("SC_MAX_PENDING_TRANSACTIONS") {
            config.max_pending_transactions = value
                .parse()
                .map_err(|_| ConfigError::InvalidLimit(format!("not a number: {value}")))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_pending_transactions == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_pending_transactions cannot be 0".into(),
            ));
        }
        Ok(())
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Invalid relay fallback: {0}")]
    InvalidRelayFallback(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}
