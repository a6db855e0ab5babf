//! base64url segment encoding and the fixed token header.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Algorithm name written into every header.
pub const ALGORITHM: &str = "HS256";
/// Token type tag written into every header.
pub const TOKEN_TYPE: &str = "JWT";

/// Fixed token header. Written on encode, never consulted on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Signing algorithm
    pub alg: &'static str,
    /// Token type
    pub typ: &'static str,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM,
            typ: TOKEN_TYPE,
        }
    }
}

impl Header {
    /// Canonical JSON: members in `alg`, `typ` order, no whitespace.
    #[must_use]
    pub fn canonical_json(&self) -> String {
        format!(r#"{{"alg":"{}","typ":"{}"}}"#, self.alg, self.typ)
    }

    /// Canonical base64url form: `eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9`.
    #[must_use]
    pub fn encoded(&self) -> String {
        encode_segment(self.canonical_json())
    }
}

/// base64url without padding.
#[must_use]
pub fn encode_segment(bytes: impl AsRef<[u8]>) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Inverse of [`encode_segment`]. Padding and the standard alphabet are rejected.
///
/// # Errors
///
/// Returns the underlying decode error for non-canonical input.
pub fn decode_segment(segment: &str) -> Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(segment)
}

/// Signing input: `header_b64 "." payload_b64`.
#[must_use]
pub fn signing_input(header_b64: &str, payload_b64: &str) -> String {
    let mut input = String::with_capacity(header_b64.len() + payload_b64.len() + 1);
    input.push_str(header_b64);
    input.push('.');
    input.push_str(payload_b64);
    input
}
