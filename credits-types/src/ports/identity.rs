//! Identity verification port trait.

use crate::domain::UserId;
use crate::error::AuthError;

/// Maps a bearer credential to a verified user identifier.
///
/// The ledger never accepts a raw token as an identity; whatever trust
/// model is in force lives behind this trait. Production deployments
/// verify an identity token and derive the user id from its claims.
#[async_trait::async_trait]
pub trait IdentityVerifier: Send + Sync + 'static {
    /// Resolves a bearer credential to a user id, or rejects it.
    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}
