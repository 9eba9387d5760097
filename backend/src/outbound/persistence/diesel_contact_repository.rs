//! PostgreSQL-backed `ContactRepository`.
//!
//! Ownership is part of every `WHERE` clause, so a foreign contact simply
//! yields no row.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncConnection as _, RunQueryDsl};
use pagination::{Page, PageRequest};
use uuid::Uuid;

use crate::domain::ports::{ContactRepository, ContactRepositoryError};
use crate::domain::{Contact, ContactDraft, ContactId, ContactSearch, UserId, like_pattern};

use super::diesel_basic_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ContactChangeset, ContactRow, NewContactRow};
use super::pool::{DbPool, PoolError};
use super::schema::{addresses, contacts};

/// Diesel implementation of [`ContactRepository`].
#[derive(Clone)]
pub struct DieselContactRepository {
    pool: DbPool,
}

impl DieselContactRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ContactRepositoryError {
    map_pool_error(error, ContactRepositoryError::connection)
}

fn diesel_error(error: &diesel::result::Error) -> ContactRepositoryError {
    map_diesel_error(
        error,
        ContactRepositoryError::query,
        ContactRepositoryError::connection,
    )
}

/// `owner`'s contacts narrowed by every supplied criterion.
fn matching_contacts(owner: Uuid, search: &ContactSearch) -> contacts::BoxedQuery<'static, Pg> {
    let mut query = contacts::table
        .filter(contacts::user_id.eq(owner))
        .into_boxed();
    if let Some(name) = search.name() {
        let pattern = like_pattern(name);
        query = query.filter(
            contacts::first_name
                .ilike(pattern.clone())
                .or(contacts::last_name.ilike(pattern)),
        );
    }
    if let Some(email) = search.email() {
        query = query.filter(contacts::email.ilike(like_pattern(email)));
    }
    if let Some(phone) = search.phone() {
        query = query.filter(contacts::phone.like(like_pattern(phone)));
    }
    query
}

#[async_trait]
impl ContactRepository for DieselContactRepository {
    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        diesel::insert_into(contacts::table)
            .values(&NewContactRow::new(owner, draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .map(Contact::from)
            .map_err(|err| diesel_error(&err))
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<ContactRow> = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::user_id.eq(*owner.as_uuid()))
            .select(ContactRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(Contact::from))
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let target = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::user_id.eq(*owner.as_uuid()));
        let row: Option<ContactRow> = diesel::update(target)
            .set(&ContactChangeset::from(draft))
            .returning(ContactRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(|err| diesel_error(&err))?;
        Ok(row.map(Contact::from))
    }

    async fn delete_with_addresses(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<bool, ContactRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let owner = *owner.as_uuid();
        let contact_id = id.get();
        conn.transaction(|conn| {
            async move {
                // Lock the row so no address can be attached mid-delete.
                let locked: Option<i64> = contacts::table
                    .filter(contacts::id.eq(contact_id))
                    .filter(contacts::user_id.eq(owner))
                    .select(contacts::id)
                    .for_update()
                    .first(conn)
                    .await
                    .optional()?;
                if locked.is_none() {
                    return Ok(false);
                }
                diesel::delete(addresses::table.filter(addresses::contact_id.eq(contact_id)))
                    .execute(conn)
                    .await?;
                diesel::delete(contacts::table.filter(contacts::id.eq(contact_id)))
                    .execute(conn)
                    .await?;
                Ok(true)
            }
            .scope_boxed()
        })
        .await
        .map_err(|err: diesel::result::Error| diesel_error(&err))
    }

    async fn search(
        &self,
        owner: &UserId,
        search: &ContactSearch,
        request: PageRequest,
    ) -> Result<Page<Contact>, ContactRepositoryError> {
        let offset = i64::try_from(request.offset())
            .map_err(|_| ContactRepositoryError::query("page offset exceeds i64 range"))?;
        let limit = i64::from(request.limit());
        let owner = *owner.as_uuid();

        let mut conn = self.pool.get().await.map_err(pool_error)?;
        // Count and page share one snapshot so the envelope matches the items.
        let (total, rows) = conn
            .build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let total: i64 = matching_contacts(owner, search)
                        .count()
                        .get_result(conn)
                        .await?;
                    let rows: Vec<ContactRow> = matching_contacts(owner, search)
                        .select(ContactRow::as_select())
                        .order(contacts::id.asc())
                        .offset(offset)
                        .limit(limit)
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((total, rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(|err| diesel_error(&err))?;

        let items = rows.into_iter().map(Contact::from).collect();
        Ok(Page::new(
            items,
            request,
            u64::try_from(total).unwrap_or_default(),
        ))
    }
}
