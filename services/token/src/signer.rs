//! HMAC-SHA256 token signing.
//!
//! The algorithm is fixed.

use crate::codec::ALGORITHM;
use ring::hmac;
use std::fmt;
use subtle::ConstantTimeEq;

/// HMAC-SHA256 signer over a single symmetric secret.
pub struct HmacSigner {
    key: hmac::Key,
}

impl HmacSigner {
    /// Create a signer from raw secret bytes.
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        Self {
            key: hmac::Key::new(hmac::HMAC_SHA256, secret),
        }
    }

    /// Sign data and return the raw MAC bytes.
    #[must_use]
    pub fn sign(&self, data: &[u8]) -> Vec<u8> {
        hmac::sign(&self.key, data).as_ref().to_vec()
    }

    /// Check `signature` against a freshly computed MAC in constant time.
    #[must_use]
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        constant_time_eq(&self.sign(data), signature)
    }
}

impl fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacSigner")
            .field("algorithm", &ALGORITHM)
            .finish_non_exhaustive()
    }
}

/// Byte equality whose timing does not depend on where the inputs differ.
///
/// Lengths are compared first; a length mismatch reveals nothing about
/// content.
#[must_use]
pub fn constant_time_eq(expected: &[u8], actual: &[u8]) -> bool {
    if expected.len() != actual.len() {
        return false;
    }

    expected.ct_eq(actual).into()
}
