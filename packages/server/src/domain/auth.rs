//! Token verification seam.
//!
//! Token issuance and validation belong to the authentication subsystem,
//! which is outside this service. The session layer only depends on this
//! trait; the bundled implementation accepts any non-empty bearer token.

use async_trait::async_trait;

use super::error::AuthError;
use super::value_object::Username;

/// Identity attached to an authenticated connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserIdentity {
    /// Display name asserted by the verifier, when it knows one.
    pub display_name: Option<Username>,
}

impl UserIdentity {
    /// An identity with no asserted display name; the join request's
    /// username (or the guest fallback) applies.
    pub fn anonymous() -> Self {
        Self { display_name: None }
    }
}

#[async_trait]
pub trait TokenVerifier: Send + Sync {
    /// Verify the credential supplied at connection time.
    ///
    /// `None` means no credential was supplied; the connection must be
    /// refused before any room interaction.
    async fn verify(&self, token: Option<&str>) -> Result<UserIdentity, AuthError>;
}
