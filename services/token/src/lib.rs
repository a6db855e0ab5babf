//! Token service library for the HR administration backend.
//!
//! Mints and verifies compact HMAC-SHA256 signed tokens
//! (`header.payload.signature`, base64url without padding) and provides the
//! bearer authentication gate used in front of protected routes.
//!
//! ```
//! use hr_token::{SubjectClaims, TokenError, TokenService};
//!
//! let service = TokenService::new("mysecretkey");
//! let token = service.issue_for_subject("12345").unwrap();
//!
//! let claims: SubjectClaims = service.decode(&token).unwrap();
//! assert_eq!(claims.uid, "12345");
//!
//! assert_eq!(
//!     service.decode::<SubjectClaims>("invalidtoken").unwrap_err(),
//!     TokenError::InvalidFormat,
//! );
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod codec;
pub mod config;
pub mod error;
pub mod metrics;
pub mod service;
pub mod signer;
pub mod telemetry;
pub mod token;

// Re-exports for convenience
pub use auth::{BearerAuthenticator, SubjectResolver};
pub use config::Config;
pub use error::{AuthError, TokenError};
pub use service::{Payload, SubjectClaims, TokenService};
pub use signer::HmacSigner;
