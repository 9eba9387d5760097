//! Driving port for account operations.

use async_trait::async_trait;

use crate::domain::{AuthToken, Error, LoginPayload, RegisterPayload, UpdateUserPayload, UserProfile};

/// Account use cases for inbound adapters.
#[async_trait]
pub trait UserAccounts: Send + Sync {
    /// Create an account.
    async fn register(&self, payload: RegisterPayload) -> Result<UserProfile, Error>;

    /// Exchange credentials for a new bearer token, revoking the previous one.
    async fn login(&self, payload: LoginPayload) -> Result<AuthToken, Error>;

    /// Profile of the caller.
    async fn current(&self, credential: Option<&str>) -> Result<UserProfile, Error>;

    /// Change the caller's display name and/or password.
    async fn update(
        &self,
        credential: Option<&str>,
        payload: UpdateUserPayload,
    ) -> Result<UserProfile, Error>;

    /// Revoke the caller's token.
    async fn logout(&self, credential: Option<&str>) -> Result<(), Error>;
}
