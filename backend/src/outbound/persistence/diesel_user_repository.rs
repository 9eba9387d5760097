//! PostgreSQL-backed `UserRepository`.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{TokenDigest, User, UserId};

use super::diesel_basic_error_mapping::{is_unique_violation, map_diesel_error, map_pool_error};
use super::models::{NewUserRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel implementation of [`UserRepository`].
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> UserRepositoryError {
    map_pool_error(error, UserRepositoryError::connection)
}

fn diesel_error(error: &diesel::result::Error) -> UserRepositoryError {
    map_diesel_error(error, UserRepositoryError::query, UserRepositoryError::connection)
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewUserRow {
            id: *user.id().as_uuid(),
            username: user.username(),
            name: user.name(),
            password_hash: user.password_hash(),
        };
        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| {
                if is_unique_violation(&err) {
                    UserRepositoryError::duplicate_username(user.username())
                } else {
                    diesel_error(&err)
                }
            })
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::username.eq(username))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(User::from))
    }

    async fn find_by_token(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<User>, UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<UserRow> = users::table
            .filter(users::token_digest.eq(digest.as_str()))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(User::from))
    }

    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let changes = UserProfileUpdate {
            name: user.name(),
            password_hash: user.password_hash(),
            updated_at: Utc::now(),
        };
        diesel::update(users::table.find(*user.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| diesel_error(&err))
    }

    async fn set_token(&self, id: &UserId, digest: &TokenDigest) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(users::table.find(*id.as_uuid()))
            .set(users::token_digest.eq(Some(digest.as_str())))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| diesel_error(&err))
    }

    async fn clear_token(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::update(users::table.find(*id.as_uuid()))
            .set(users::token_digest.eq(None::<String>))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| diesel_error(&err))
    }
}
