//! Error types for token minting, verification and request authentication.
//!
//! The two decode failures are deliberately coarse: neither carries any
//! detail about the token that was rejected.

use thiserror::Error;

/// Errors produced by [`TokenService`](crate::TokenService) and its configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Token is not three non-empty `.`-separated segments.
    #[error("Invalid token format")]
    InvalidFormat,

    /// Embedded signature does not match the recomputed MAC.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Payload could not be serialized while minting a token.
    #[error("Token encoding error: {0}")]
    Encoding(String),

    /// Startup configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl TokenError {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an encoding error.
    #[must_use]
    pub fn encoding(msg: impl Into<String>) -> Self {
        Self::Encoding(msg.into())
    }

    /// Verification is deterministic, so nothing here is worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// True for the outcomes a caller must treat as "unauthenticated".
    #[must_use]
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self, Self::InvalidFormat | Self::InvalidSignature)
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::InvalidFormat => TOKEN_INVALID_FORMAT,
            Self::InvalidSignature => TOKEN_INVALID_SIGNATURE,
            Self::Encoding(_) => TOKEN_ENCODING_ERROR,
            Self::Config(_) => TOKEN_CONFIG_ERROR,
        }
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}

/// Errors produced by the bearer authentication gate.
///
/// Every rejection collapses into [`AuthError::Unauthenticated`]; callers
/// cannot tell a forged token from an unknown subject.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Request is not authenticated.
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Subject lookup failed for reasons unrelated to the token.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Backend failures may clear up; authentication decisions never do.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Internal(_))
    }

    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => AUTH_UNAUTHENTICATED,
            Self::Internal(_) => AUTH_INTERNAL,
        }
    }

    /// Message safe to return to an API client.
    #[must_use]
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "Unauthorized",
            Self::Internal(_) => "Internal server error",
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        if err.is_auth_failure() {
            Self::Unauthenticated
        } else {
            Self::Internal(err.code().to_string())
        }
    }
}

// Error codes for API responses
/// Token does not have three non-empty segments.
pub const TOKEN_INVALID_FORMAT: &str = "TOKEN_INVALID_FORMAT";
/// Token signature mismatch.
pub const TOKEN_INVALID_SIGNATURE: &str = "TOKEN_INVALID_SIGNATURE";
/// Payload serialization failure.
pub const TOKEN_ENCODING_ERROR: &str = "TOKEN_ENCODING_ERROR";
/// Invalid configuration.
pub const TOKEN_CONFIG_ERROR: &str = "TOKEN_CONFIG_ERROR";
/// Request rejected as unauthenticated.
pub const AUTH_UNAUTHENTICATED: &str = "AUTH_UNAUTHENTICATED";
/// Subject lookup failure.
pub const AUTH_INTERNAL: &str = "AUTH_INTERNAL";
