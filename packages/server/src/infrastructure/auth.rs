//! Opaque bearer-token verifier.
//!
//! The authentication subsystem that issues and validates tokens is outside
//! this service. This implementation reproduces the accepted contract at the
//! session boundary: a connection must present some credential, but the
//! credential itself is treated as opaque. A real identity-provider client
//! replaces this type behind the `TokenVerifier` trait.

use async_trait::async_trait;

use crate::domain::{AuthError, TokenVerifier, UserIdentity};

pub struct OpaqueTokenVerifier;

#[async_trait]
impl TokenVerifier for OpaqueTokenVerifier {
    async fn verify(&self, token: Option<&str>) -> Result<UserIdentity, AuthError> {
        match token {
            None => Err(AuthError::MissingToken),
            Some(t) if t.trim().is_empty() => Err(AuthError::MissingToken),
            Some(_) => Ok(UserIdentity::anonymous()),
        }
    }
}
