//! Token minting and verification.
//!
//! [`TokenService`] is immutable after construction and holds no per-call
//! state, so one instance can be shared by every request handler.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{encode_segment, signing_input, Header, ALGORITHM};
use crate::config::Config;
use crate::error::TokenError;
use crate::metrics;
use crate::signer::HmacSigner;
use crate::token::{Token, Verified};

/// Untyped payload: string keys to JSON values.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Payload carried by session tokens: the authenticated user's id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectClaims {
    /// User identifier
    pub uid: String,
}

impl SubjectClaims {
    /// Claims for the given user id.
    #[must_use]
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Mints and verifies compact HMAC-SHA256 signed tokens.
#[derive(Debug)]
pub struct TokenService {
    signer: HmacSigner,
    header_b64: String,
}

impl TokenService {
    /// Create a service over `secret`.
    ///
    /// The secret must already have been validated as non-empty; use
    /// [`TokenService::from_config`] at startup.
    #[must_use]
    pub fn new(secret: impl AsRef<[u8]>) -> Self {
        Self {
            signer: HmacSigner::new(secret.as_ref()),
            header_b64: Header::default().encoded(),
        }
    }

    /// Create a service from validated configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.secret_bytes())
    }

    /// Algorithm written into token headers.
    #[must_use]
    pub const fn algorithm(&self) -> &'static str {
        ALGORITHM
    }

    /// Encode `payload` into a signed token.
    ///
    /// Identical payloads always produce identical tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if the payload cannot be serialized.
    pub fn encode<P>(&self, payload: &P) -> Result<String, TokenError>
    where
        P: Serialize + ?Sized,
    {
        let payload_b64 = encode_segment(serde_json::to_vec(payload)?);
        let signature = self
            .signer
            .sign(signing_input(&self.header_b64, &payload_b64).as_bytes());

        metrics::record_token_issued(ALGORITHM);
        debug!(algorithm = ALGORITHM, "token issued");

        Ok(format!(
            "{}.{payload_b64}.{}",
            self.header_b64,
            encode_segment(signature)
        ))
    }

    /// Mint a session token for a user id.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Encoding`] if serialization fails.
    pub fn issue_for_subject(&self, uid: impl Into<String>) -> Result<String, TokenError> {
        self.encode(&SubjectClaims::new(uid))
    }

    /// Check structure and signature without reading the payload.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidFormat`] or [`TokenError::InvalidSignature`].
    pub fn verify<'a>(&self, token: &'a str) -> Result<Token<'a, Verified>, TokenError> {
        let result = Token::parse(token).and_then(|parsed| parsed.verify(&self.signer));
        if let Err(ref err) = result {
            record_rejection(err);
        }
        result
    }

    /// Verify `token` and deserialize its payload.
    ///
    /// The payload is only parsed after the signature has been verified.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidFormat`] or [`TokenError::InvalidSignature`].
    pub fn decode<P: DeserializeOwned>(&self, token: &str) -> Result<P, TokenError> {
        let verified = self.verify(token)?;

        match verified.claims() {
            Ok(payload) => {
                metrics::record_verification("valid");
                Ok(payload)
            }
            Err(err) => {
                record_rejection(&err);
                Err(err)
            }
        }
    }

    /// Verify `token` and return its payload as an untyped map.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidFormat`] or [`TokenError::InvalidSignature`].
    pub fn decode_payload(&self, token: &str) -> Result<Payload, TokenError> {
        self.decode(token)
    }
}

fn record_rejection(err: &TokenError) {
    let outcome = match err {
        TokenError::InvalidSignature => "invalid_signature",
        _ => "invalid_format",
    };
    metrics::record_verification(outcome);
    debug!(error_code = err.code(), "token rejected");
}
