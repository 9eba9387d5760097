//! Ownership checks along the user → contact → address chain.
//!
//! Each check is a single storage lookup keyed by the child id *and* its
//! parent, so a resource owned by someone else fails exactly like a missing
//! one.

use std::sync::Arc;

use super::ports::{AddressRepository, AddressRepositoryError, ContactRepository, ContactRepositoryError};
use super::{Address, AddressId, Contact, ContactId, Error, User};

pub(crate) fn contact_not_found() -> Error {
    Error::not_found("contact is not found")
}

pub(crate) fn address_not_found() -> Error {
    Error::not_found("address is not found")
}

pub(crate) fn map_contact_error(error: ContactRepositoryError) -> Error {
    match error {
        ContactRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("contact repository unavailable: {message}"))
        }
        ContactRepositoryError::Query { message } => {
            Error::internal(format!("contact repository error: {message}"))
        }
    }
}

pub(crate) fn map_address_error(error: AddressRepositoryError) -> Error {
    match error {
        AddressRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("address repository unavailable: {message}"))
        }
        AddressRepositoryError::Query { message } => {
            Error::internal(format!("address repository error: {message}"))
        }
    }
}

/// Confirms that a resolved user transitively owns a contact or address.
#[derive(Clone)]
pub struct OwnershipGuard<C, A> {
    contacts: Arc<C>,
    addresses: Arc<A>,
}

impl<C, A> OwnershipGuard<C, A> {
    /// Create a guard over the contact and address repositories.
    pub fn new(contacts: Arc<C>, addresses: Arc<A>) -> Self {
        Self {
            contacts,
            addresses,
        }
    }
}

impl<C, A> OwnershipGuard<C, A>
where
    C: ContactRepository,
    A: AddressRepository,
{
    /// The contact `id`, provided `user` owns it.
    pub async fn require_contact(&self, user: &User, id: ContactId) -> Result<Contact, Error> {
        self.contacts
            .find_owned(&user.id(), id)
            .await
            .map_err(map_contact_error)?
            .ok_or_else(contact_not_found)
    }

    /// The address `id` under `contact`, provided `user` owns that contact.
    pub async fn require_address(
        &self,
        user: &User,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Address, Error> {
        let owned = self.require_contact(user, contact).await?;
        self.addresses
            .find_in_contact(owned.id, id)
            .await
            .map_err(map_address_error)?
            .ok_or_else(address_not_found)
    }
}
