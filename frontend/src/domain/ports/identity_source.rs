//! Capability consulted by the access and anonymous guards.

use async_trait::async_trait;

use crate::domain::{ApiError, Identity};

/// Resolves the identity behind the current session.
///
/// Implementations must not cache: guards rely on every call reaching the
/// backend so that server-side session revocation applies at the next
/// navigation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Current identity, or the failure that proves there is none.
    async fn identity(&self) -> Result<Identity, ApiError>;
}
