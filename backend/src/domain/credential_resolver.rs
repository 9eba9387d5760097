//! Resolves a presented bearer credential to exactly one account.

use std::sync::Arc;

use tracing::warn;

use super::ports::{UserRepository, UserRepositoryError};
use super::{Error, TokenDigest, User};

/// Map user repository failures onto domain errors.
pub(crate) fn map_user_error(error: UserRepositoryError) -> Error {
    match error {
        UserRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserRepositoryError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserRepositoryError::DuplicateUsername { .. } => Error::conflict("username already exists"),
    }
}

/// Extract the token from an `Authorization` header value.
///
/// Accepts both a bare token and the `Bearer <token>` form; surrounding
/// whitespace is ignored. Returns `None` when nothing usable remains.
///
/// # Examples
/// ```
/// use contact_directory::domain::bearer_value;
///
/// assert_eq!(bearer_value(Some("Bearer abc")), Some("abc"));
/// assert_eq!(bearer_value(Some("abc")), Some("abc"));
/// assert_eq!(bearer_value(Some("  ")), None);
/// ```
pub fn bearer_value(raw: Option<&str>) -> Option<&str> {
    let trimmed = raw?.trim();
    if trimmed.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = match trimmed.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("bearer ") => trimmed.get(7..)?.trim(),
        _ => trimmed,
    };
    (!token.is_empty()).then_some(token)
}

/// Credential resolver shared by every protected operation.
#[derive(Clone)]
pub struct CredentialResolver<U> {
    users: Arc<U>,
}

impl<U> CredentialResolver<U> {
    /// Create a resolver over the given user repository.
    pub fn new(users: Arc<U>) -> Self {
        Self { users }
    }
}

impl<U: UserRepository> CredentialResolver<U> {
    /// Resolve `credential` to the account holding it.
    ///
    /// Absent, blank and unknown tokens all fail with
    /// [`ErrorCode::Unauthorized`](super::ErrorCode::Unauthorized).
    pub async fn resolve(&self, credential: Option<&str>) -> Result<User, Error> {
        let Some(token) = bearer_value(credential) else {
            warn!("request rejected: no credential supplied");
            return Err(Error::unauthorized("login required"));
        };
        let digest = TokenDigest::of(token);
        match self.users.find_by_token(&digest).await.map_err(map_user_error)? {
            Some(user) => Ok(user),
            None => {
                warn!("request rejected: unknown credential");
                Err(Error::unauthorized("invalid token"))
            }
        }
    }
}
