//! Contact and address use cases.
//!
//! Every operation follows the same order: resolve the credential, validate
//! the payload when mutating, confirm ownership when addressing an existing
//! entity, then touch storage. A failure at any step short-circuits before
//! anything is written.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::Page;
use tracing::debug;

use super::credential_resolver::CredentialResolver;
use super::ownership::{
    OwnershipGuard, address_not_found, contact_not_found, map_address_error, map_contact_error,
};
use super::ports::{AddressRepository, ContactDirectory, ContactRepository, UserRepository};
use super::{
    Address, AddressDraft, AddressId, AddressPayload, Contact, ContactDraft, ContactId,
    ContactPayload, ContactQuery, Error,
};

/// Contact directory service implementing [`ContactDirectory`].
#[derive(Clone)]
pub struct DirectoryService<U, C, A> {
    resolver: CredentialResolver<U>,
    guard: OwnershipGuard<C, A>,
    contacts: Arc<C>,
    addresses: Arc<A>,
}

impl<U, C, A> DirectoryService<U, C, A> {
    /// Create a service over the given repositories.
    pub fn new(users: Arc<U>, contacts: Arc<C>, addresses: Arc<A>) -> Self {
        Self {
            resolver: CredentialResolver::new(users),
            guard: OwnershipGuard::new(Arc::clone(&contacts), Arc::clone(&addresses)),
            contacts,
            addresses,
        }
    }
}

#[async_trait]
impl<U, C, A> ContactDirectory for DirectoryService<U, C, A>
where
    U: UserRepository,
    C: ContactRepository,
    A: AddressRepository,
{
    async fn create_contact(
        &self,
        credential: Option<&str>,
        payload: ContactPayload,
    ) -> Result<Contact, Error> {
        let user = self.resolver.resolve(credential).await?;
        let draft = ContactDraft::validate(payload)?;
        let contact = self
            .contacts
            .insert(&user.id(), &draft)
            .await
            .map_err(map_contact_error)?;
        debug!(user_id = %user.id(), contact_id = %contact.id, "contact created");
        Ok(contact)
    }

    async fn get_contact(&self, credential: Option<&str>, id: ContactId) -> Result<Contact, Error> {
        let user = self.resolver.resolve(credential).await?;
        self.guard.require_contact(&user, id).await
    }

    async fn update_contact(
        &self,
        credential: Option<&str>,
        id: ContactId,
        payload: ContactPayload,
    ) -> Result<Contact, Error> {
        let user = self.resolver.resolve(credential).await?;
        let draft = ContactDraft::validate(payload)?;
        self.guard.require_contact(&user, id).await?;
        // A concurrent delete between the check and the write reads as missing.
        self.contacts
            .update_owned(&user.id(), id, &draft)
            .await
            .map_err(map_contact_error)?
            .ok_or_else(contact_not_found)
    }

    async fn delete_contact(&self, credential: Option<&str>, id: ContactId) -> Result<(), Error> {
        let user = self.resolver.resolve(credential).await?;
        self.guard.require_contact(&user, id).await?;
        let removed = self
            .contacts
            .delete_with_addresses(&user.id(), id)
            .await
            .map_err(map_contact_error)?;
        if !removed {
            return Err(contact_not_found());
        }
        debug!(user_id = %user.id(), contact_id = %id, "contact deleted with its addresses");
        Ok(())
    }

    async fn list_contacts(
        &self,
        credential: Option<&str>,
        query: ContactQuery,
    ) -> Result<Page<Contact>, Error> {
        let user = self.resolver.resolve(credential).await?;
        let (search, request) = query.into_parts();
        self.contacts
            .search(&user.id(), &search, request)
            .await
            .map_err(map_contact_error)
    }

    async fn create_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        payload: AddressPayload,
    ) -> Result<Address, Error> {
        let user = self.resolver.resolve(credential).await?;
        let draft = AddressDraft::validate(payload)?;
        let owned = self.guard.require_contact(&user, contact).await?;
        // The contact may be deleted between the check and the insert.
        self.addresses
            .insert(owned.id, &draft)
            .await
            .map_err(map_address_error)?
            .ok_or_else(contact_not_found)
    }

    async fn list_addresses(
        &self,
        credential: Option<&str>,
        contact: ContactId,
    ) -> Result<Vec<Address>, Error> {
        let user = self.resolver.resolve(credential).await?;
        let owned = self.guard.require_contact(&user, contact).await?;
        self.addresses
            .list_for_contact(owned.id)
            .await
            .map_err(map_address_error)
    }

    async fn get_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Address, Error> {
        let user = self.resolver.resolve(credential).await?;
        self.guard.require_address(&user, contact, id).await
    }

    async fn update_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
        payload: AddressPayload,
    ) -> Result<Address, Error> {
        let user = self.resolver.resolve(credential).await?;
        let draft = AddressDraft::validate(payload)?;
        self.guard.require_address(&user, contact, id).await?;
        self.addresses
            .update_in_contact(contact, id, &draft)
            .await
            .map_err(map_address_error)?
            .ok_or_else(address_not_found)
    }

    async fn delete_address(
        &self,
        credential: Option<&str>,
        contact: ContactId,
        id: AddressId,
    ) -> Result<(), Error> {
        let user = self.resolver.resolve(credential).await?;
        self.guard.require_address(&user, contact, id).await?;
        let removed = self
            .addresses
            .delete_in_contact(contact, id)
            .await
            .map_err(map_address_error)?;
        if removed {
            Ok(())
        } else {
            Err(address_not_found())
        }
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
