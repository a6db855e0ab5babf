//! Configuration for the token service.
//!
//! Loaded from environment variables and validated at startup. A missing or
//! empty secret refuses to start rather than signing with weak key material.

use crate::error::TokenError;
use secrecy::{ExposeSecret, SecretString};
use std::env;

/// Environment variable holding the HMAC secret.
pub const SECRET_VAR: &str = "JWT_SECRET";

/// Token service configuration.
#[derive(Debug)]
pub struct Config {
    /// Symmetric signing secret
    pub token_secret: SecretString,
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Emit logs as JSON
    pub log_json: bool,
}

impl Config {
    /// Build a configuration around an explicit secret.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Config`] if the secret is empty.
    pub fn new(secret: impl Into<String>) -> Result<Self, TokenError> {
        Ok(Self {
            token_secret: parse_secret(Some(secret.into()))?,
            log_level: "info".to_string(),
            log_json: false,
        })
    }

    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, TokenError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns an error if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TokenError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token_secret = parse_secret(lookup(SECRET_VAR))?;
        let log_level = lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string());
        let log_json = parse_var(&lookup, "LOG_JSON", false)?;

        Ok(Self {
            token_secret,
            log_level,
            log_json,
        })
    }

    /// Raw secret bytes for constructing a signer.
    #[must_use]
    pub fn secret_bytes(&self) -> &[u8] {
        self.token_secret.expose_secret().as_bytes()
    }

    /// Override the log level.
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Enable JSON log output.
    #[must_use]
    pub const fn with_json_logs(mut self) -> Self {
        self.log_json = true;
        self
    }
}

fn parse_secret(raw: Option<String>) -> Result<SecretString, TokenError> {
    match raw {
        Some(secret) if !secret.trim().is_empty() => Ok(SecretString::from(secret)),
        Some(_) => Err(TokenError::config(format!("{SECRET_VAR} must not be empty"))),
        None => Err(TokenError::config(format!("{SECRET_VAR} is required"))),
    }
}

/// Parse a variable with a default value.
fn parse_var<F, T>(lookup: &F, name: &str, default: T) -> Result<T, TokenError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(val) => val
            .parse()
            .map_err(|e| TokenError::config(format!("Invalid {name}: {e}"))),
        None => Ok(default),
    }
}
