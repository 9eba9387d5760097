//! Port for address persistence scoped to a parent contact.

use async_trait::async_trait;

use crate::domain::{Address, AddressDraft, AddressId, ContactId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by address repository adapters.
    pub enum AddressRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "address repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "address repository query failed: {message}",
    }
}

/// Address storage keyed by `(contact, address)`.
///
/// Callers pass a contact id that already passed the ownership check, so an
/// address under a different contact is reported as missing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AddressRepository: Send + Sync {
    /// Store a new address under `contact`; `None` when the contact is gone.
    async fn insert(
        &self,
        contact: ContactId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError>;

    /// Fetch an address matching both ids.
    async fn find_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressRepositoryError>;

    /// Every address of `contact`, ordered by id.
    async fn list_for_contact(
        &self,
        contact: ContactId,
    ) -> Result<Vec<Address>, AddressRepositoryError>;

    /// Overwrite an address matching both ids.
    async fn update_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError>;

    /// Delete an address matching both ids; `false` when nothing matched.
    async fn delete_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<bool, AddressRepositoryError>;
}
