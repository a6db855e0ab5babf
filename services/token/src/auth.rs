//! Bearer-token authentication gate.
//!
//! Extracts the token from an `Authorization: Bearer <token>` header value,
//! verifies it, and resolves the embedded subject through the repository
//! layer. Every rejection is reported as [`AuthError::Unauthenticated`].

use std::future::Future;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::AuthError;
use crate::metrics;
use crate::service::{SubjectClaims, TokenService};

/// Authorization scheme prefix, including the separating space.
pub const BEARER_PREFIX: &str = "Bearer ";

/// Looks up the record behind a verified subject id.
///
/// Uses native async (no async-trait crate).
pub trait SubjectResolver: Send + Sync {
    /// Resolved record type.
    type Subject: Send;
    /// Backend failure type.
    type Error: std::error::Error + Send;

    /// Fetch the subject, or `None` if it no longer exists.
    fn resolve(
        &self,
        uid: &str,
    ) -> impl Future<Output = Result<Option<Self::Subject>, Self::Error>> + Send;
}

/// Token substring after `"Bearer "`, passed on verbatim.
#[must_use]
pub fn extract_bearer(authorization: Option<&str>) -> Option<&str> {
    authorization
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .filter(|token| !token.is_empty())
}

/// Authenticates requests against a shared [`TokenService`].
pub struct BearerAuthenticator<R> {
    tokens: Arc<TokenService>,
    resolver: R,
}

impl<R: SubjectResolver> BearerAuthenticator<R> {
    /// Create an authenticator.
    #[must_use]
    pub const fn new(tokens: Arc<TokenService>, resolver: R) -> Self {
        Self { tokens, resolver }
    }

    /// Shared token service.
    #[must_use]
    pub const fn tokens(&self) -> &Arc<TokenService> {
        &self.tokens
    }

    /// Authenticate a request from its raw `Authorization` header value.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Unauthenticated`] for a missing or malformed
    /// header, a token that fails verification, or an unknown subject.
    /// Returns [`AuthError::Internal`] if the resolver itself fails.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<R::Subject, AuthError> {
        let result = self.authenticate_inner(authorization).await;

        let decision = match &result {
            Ok(_) => "authenticated",
            Err(AuthError::Unauthenticated) => "unauthenticated",
            Err(AuthError::Internal(_)) => "error",
        };
        metrics::record_auth_decision(decision);

        result
    }

    async fn authenticate_inner(&self, authorization: Option<&str>) -> Result<R::Subject, AuthError> {
        let Some(token) = extract_bearer(authorization) else {
            debug!("no bearer token provided");
            return Err(AuthError::Unauthenticated);
        };

        let claims: SubjectClaims = self.tokens.decode(token)?;

        match self.resolver.resolve(&claims.uid).await {
            Ok(Some(subject)) => Ok(subject),
            Ok(None) => {
                debug!("token subject not found");
                Err(AuthError::Unauthenticated)
            }
            Err(err) => {
                warn!(error = %err, "subject lookup failed");
                Err(AuthError::internal(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_bearer() {
        assert_eq!(extract_bearer(Some("Bearer abc.def.ghi")), Some("abc.def.ghi"));
        assert_eq!(extract_bearer(Some("Bearer ")), None);
        assert_eq!(extract_bearer(Some("bearer abc")), None);
        assert_eq!(extract_bearer(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(Some("abc.def.ghi")), None);
        assert_eq!(extract_bearer(None), None);
    }

    #[test]
    fn test_extract_bearer_is_verbatim() {
        // Trailing content stays attached; decode rejects it
        assert_eq!(extract_bearer(Some("Bearer a.b.c extra")), Some("a.b.c extra"));
    }
}
