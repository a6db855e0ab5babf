//! Type-state token with compile-time verification guarantees.
//!
//! A [`Token<Unverified>`] has no payload accessor. The payload can be
//! decoded exclusively from a [`Token<Verified>`], which is obtainable only
//! by passing the MAC check.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::codec::{decode_segment, signing_input};
use crate::error::TokenError;
use crate::signer::HmacSigner;

mod private {
    /// Sealed trait to prevent external implementations
    pub trait Sealed {}
}

/// Marker trait for token verification states.
pub trait TokenState: private::Sealed {}

/// Structurally valid, signature not yet checked.
#[derive(Debug)]
pub struct Unverified;
impl private::Sealed for Unverified {}
impl TokenState for Unverified {}

/// Signature checked against the service secret.
#[derive(Debug)]
pub struct Verified;
impl private::Sealed for Verified {}
impl TokenState for Verified {}

/// Borrowed view over the three segments of a token string.
#[derive(Debug)]
pub struct Token<'a, State: TokenState> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
    _state: PhantomData<State>,
}

impl<'a> Token<'a, Unverified> {
    /// Split a raw token into exactly three non-empty segments.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidFormat`] for any other shape. No decoding
    /// is attempted.
    pub fn parse(raw: &'a str) -> Result<Self, TokenError> {
        let mut parts = raw.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::InvalidFormat);
        };

        if header.is_empty() || payload.is_empty() || signature.is_empty() {
            return Err(TokenError::InvalidFormat);
        }

        Ok(Token {
            header,
            payload,
            signature,
            _state: PhantomData,
        })
    }

    /// Recompute the MAC over the received header and payload segments and
    /// compare it to the embedded signature in constant time.
    ///
    /// The header's declared algorithm is not read.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidSignature`] on any mismatch, including a
    /// signature segment that is not valid base64url.
    pub fn verify(self, signer: &HmacSigner) -> Result<Token<'a, Verified>, TokenError> {
        let input = signing_input(self.header, self.payload);
        let provided = decode_segment(self.signature).map_err(|_| TokenError::InvalidSignature)?;

        if !signer.verify(input.as_bytes(), &provided) {
            return Err(TokenError::InvalidSignature);
        }

        Ok(Token {
            header: self.header,
            payload: self.payload,
            signature: self.signature,
            _state: PhantomData,
        })
    }
}

impl Token<'_, Verified> {
    /// Deserialize the authenticated payload.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::InvalidFormat`] if the payload segment is not
    /// base64url JSON that parses into `P`.
    pub fn claims<P: DeserializeOwned>(&self) -> Result<P, TokenError> {
        let bytes = decode_segment(self.payload).map_err(|_| TokenError::InvalidFormat)?;
        serde_json::from_slice(&bytes).map_err(|_| TokenError::InvalidFormat)
    }
}
