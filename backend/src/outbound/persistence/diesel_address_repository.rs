//! PostgreSQL-backed `AddressRepository`.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{AddressRepository, AddressRepositoryError};
use crate::domain::{Address, AddressDraft, AddressId, ContactId};

use super::diesel_basic_error_mapping::{
    is_foreign_key_violation, map_diesel_error, map_pool_error,
};
use super::models::{AddressChangeset, AddressRow, NewAddressRow};
use super::pool::{DbPool, PoolError};
use super::schema::addresses;

/// Diesel implementation of [`AddressRepository`].
#[derive(Clone)]
pub struct DieselAddressRepository {
    pool: DbPool,
}

impl DieselAddressRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> AddressRepositoryError {
    map_pool_error(error, AddressRepositoryError::connection)
}

fn diesel_error(error: &diesel::result::Error) -> AddressRepositoryError {
    map_diesel_error(
        error,
        AddressRepositoryError::query,
        AddressRepositoryError::connection,
    )
}

#[async_trait]
impl AddressRepository for DieselAddressRepository {
    async fn insert(
        &self,
        contact: ContactId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let inserted = diesel::insert_into(addresses::table)
            .values(&NewAddressRow::new(contact, draft))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await;
        match inserted {
            Ok(row) => Ok(Some(Address::from(row))),
            Err(err) if is_foreign_key_violation(&err) => Ok(None),
            Err(err) => Err(diesel_error(&err)),
        }
    }

    async fn find_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<AddressRow> = addresses::table
            .filter(addresses::id.eq(id.get()))
            .filter(addresses::contact_id.eq(contact.get()))
            .select(AddressRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(Address::from))
    }

    async fn list_for_contact(
        &self,
        contact: ContactId,
    ) -> Result<Vec<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<AddressRow> = addresses::table
            .filter(addresses::contact_id.eq(contact.get()))
            .select(AddressRow::as_select())
            .order(addresses::id.asc())
            .load(&mut conn)
            .await
            .map_err(|err| diesel_error(&err))?;
        Ok(rows.into_iter().map(Address::from).collect())
    }

    async fn update_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = addresses::table
            .filter(addresses::id.eq(id.get()))
            .filter(addresses::contact_id.eq(contact.get()));
        let row: Option<AddressRow> = diesel::update(target)
            .set(&AddressChangeset::from(draft))
            .returning(AddressRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(Address::from))
    }

    async fn delete_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<bool, AddressRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let deleted = diesel::delete(
            addresses::table
                .filter(addresses::id.eq(id.get()))
                .filter(addresses::contact_id.eq(contact.get())),
        )
        .execute(&mut conn)
        .await
        .map_err(|err| diesel_error(&err))?;
        Ok(deleted > 0)
    }
}
