//! Port for owner-scoped contact persistence.
//!
//! Every method takes the owning user so adapters can fold ownership into the
//! same lookup that finds the row; a contact owned by someone else is
//! indistinguishable from one that does not exist.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Contact, ContactDraft, ContactId, ContactSearch, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by contact repository adapters.
    pub enum ContactRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "contact repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "contact repository query failed: {message}",
    }
}

/// Owner-scoped contact storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Store a new contact for `owner` under a fresh serial id.
    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError>;

    /// Fetch a contact matching both `id` and `owner`.
    async fn find_owned(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Overwrite a contact matching both `id` and `owner`.
    async fn update_owned(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError>;

    /// Delete a contact and all of its addresses atomically.
    ///
    /// Returns `false` when no contact matched `id` and `owner`.
    async fn delete_with_addresses(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<bool, ContactRepositoryError>;

    /// Fetch one page of `owner`'s contacts matching `search`, ordered by id,
    /// together with the size of the whole filtered set.
    async fn search(
        &self,
        owner: &UserId,
        search: &ContactSearch,
        request: PageRequest,
    ) -> Result<Page<Contact>, ContactRepositoryError>;
}
