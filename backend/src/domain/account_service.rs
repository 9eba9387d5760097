//! Account use cases: registration, login, profile and logout.
//!
//! This service owns the only code paths that write a user's token.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::credential_resolver::{CredentialResolver, map_user_error};
use super::ports::{PasswordHashError, PasswordHasher, UserAccounts, UserRepository};
use super::{
    AuthToken, Error, LoginCredentials, LoginPayload, ProfileUpdate, RegisterPayload,
    Registration, UpdateUserPayload, User, UserId, UserProfile,
};

const LOGIN_FAILED: &str = "username or password wrong";

/// Account service implementing [`UserAccounts`].
#[derive(Clone)]
pub struct AccountService<U, H> {
    users: Arc<U>,
    hasher: Arc<H>,
    resolver: CredentialResolver<U>,
}

impl<U, H> AccountService<U, H> {
    /// Create a service over the user repository and password hasher.
    pub fn new(users: Arc<U>, hasher: Arc<H>) -> Self {
        Self {
            resolver: CredentialResolver::new(Arc::clone(&users)),
            users,
            hasher,
        }
    }
}

impl<U, H> AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    fn map_hash_error(error: PasswordHashError) -> Error {
        Error::internal(format!("password hashing failed: {error}"))
    }
}

#[async_trait]
impl<U, H> UserAccounts for AccountService<U, H>
where
    U: UserRepository,
    H: PasswordHasher,
{
    async fn register(&self, payload: RegisterPayload) -> Result<UserProfile, Error> {
        let registration = Registration::validate(payload)?;
        let hash = self
            .hasher
            .hash(registration.password())
            .map_err(Self::map_hash_error)?;
        let user = User::new(
            UserId::random(),
            registration.username(),
            registration.name(),
            hash,
        );
        self.users.insert(&user).await.map_err(map_user_error)?;
        info!(user_id = %user.id(), "account registered");
        Ok(UserProfile::from(&user))
    }

    async fn login(&self, payload: LoginPayload) -> Result<AuthToken, Error> {
        let credentials = LoginCredentials::validate(payload)?;
        let Some(user) = self
            .users
            .find_by_username(credentials.username())
            .await
            .map_err(map_user_error)?
        else {
            // Spend the same hashing work as a wrong password would.
            self.hasher
                .hash(credentials.password())
                .map_err(Self::map_hash_error)?;
            warn!("login rejected: unknown username");
            return Err(Error::unauthorized(LOGIN_FAILED));
        };
        let verified = self
            .hasher
            .verify(credentials.password(), user.password_hash())
            .map_err(Self::map_hash_error)?;
        if !verified {
            warn!(user_id = %user.id(), "login rejected: wrong password");
            return Err(Error::unauthorized(LOGIN_FAILED));
        }

        let token = AuthToken::generate();
        self.users
            .set_token(&user.id(), &token.digest())
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(token)
    }

    async fn current(&self, credential: Option<&str>) -> Result<UserProfile, Error> {
        let user = self.resolver.resolve(credential).await?;
        Ok(UserProfile::from(&user))
    }

    async fn update(
        &self,
        credential: Option<&str>,
        payload: UpdateUserPayload,
    ) -> Result<UserProfile, Error> {
        let user = self.resolver.resolve(credential).await?;
        let update = ProfileUpdate::validate(payload)?;
        let hash = update
            .password()
            .map(|password| self.hasher.hash(password))
            .transpose()
            .map_err(Self::map_hash_error)?;
        let updated = user.with_profile(update.name().map(str::to_owned), hash);
        self.users
            .update_profile(&updated)
            .await
            .map_err(map_user_error)?;
        Ok(UserProfile::from(&updated))
    }

    async fn logout(&self, credential: Option<&str>) -> Result<(), Error> {
        let user = self.resolver.resolve(credential).await?;
        self.users
            .clear_token(&user.id())
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "logged out");
        Ok(())
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
