//! Port for account persistence.

use async_trait::async_trait;

use crate::domain::{TokenDigest, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// Another account already uses the username.
        DuplicateUsername { username: String } => "username {username} is already registered",
    }
}

/// Storage for accounts and their single active token.
///
/// The token is only written through [`UserRepository::set_token`] and
/// cleared through [`UserRepository::clear_token`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new account.
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Fetch an account by its exact username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError>;

    /// Fetch the account whose stored token digest equals `digest`.
    async fn find_by_token(&self, digest: &TokenDigest)
    -> Result<Option<User>, UserRepositoryError>;

    /// Persist the display name and password hash of `user`.
    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError>;

    /// Replace any previous token with `digest`.
    async fn set_token(&self, id: &UserId, digest: &TokenDigest) -> Result<(), UserRepositoryError>;

    /// Remove the stored token.
    async fn clear_token(&self, id: &UserId) -> Result<(), UserRepositoryError>;
}
