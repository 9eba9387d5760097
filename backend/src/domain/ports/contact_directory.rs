//! Driving port for contact and address operations.
//!
//! Every method receives the raw credential exactly as supplied by the
//! caller; implementations resolve it before doing anything else.

use async_trait::async_trait;
use pagination::Page;

use crate::domain::{
    Address, AddressId, AddressPayload, Contact, ContactId, ContactPayload, ContactQuery, Error,
};

/// Contact directory use cases for inbound adapters.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    /// Create a contact owned by the caller.
    async fn create_contact(
        &self,
        credential: Option<&str>,
        payload: ContactPayload,
    ) -> Result<Contact, Error>;

    /// Fetch one of the caller's contacts.
    async fn get_contact(&self, credential: Option<&str>, id: ContactId)
    -> Result<Contact, Error>;

    /// Replace the fields of one of the caller's contacts.
    async fn update_contact(
        &self,
        credential: Option<&str>,
        id: ContactId,
        payload: ContactPayload,
    ) -> Result<Contact, Error>;

    /// Delete one of the caller's contacts together with its addresses.
    async fn delete_contact(&self, credential: Option<&str>, id: ContactId) -> Result<(), Error>;

    /// Search the caller's contacts.
    async fn list_contacts(
        &self,
        credential: Option<&str>,
        query: ContactQuery,
    ) -> Result<Page<Contact>, Error>;

    /// Add an address to one of the caller's contacts.
    async fn create_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        payload: AddressPayload,
    ) -> Result<Address, Error>;

    /// List every address of one of the caller's contacts.
    async fn list_addresses(
        &self,
        credential: Option<&str>,
        contact: ContactId,
    ) -> Result<Vec<Address>, Error>;

    /// Fetch an address through its owning contact.
    async fn get_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Address, Error>;

    /// Replace the fields of an address.
    async fn update_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
        payload: AddressPayload,
    ) -> Result<Address, Error>;

    /// Delete an address.
    async fn delete_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
    ) -> Result<(), Error>;
}
