//! In-process storage adapter.
//!
//! Implements every storage port over mutex-guarded tables. It backs the
//! server when no database is configured and keeps HTTP tests hermetic.
//! Serial ids only ever increase, so a deleted id is never handed out again.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{
    AddressRepository, AddressRepositoryError, ContactRepository, ContactRepositoryError,
    UserRepository, UserRepositoryError,
};
use crate::domain::{
    Address, AddressDraft, AddressId, Contact, ContactDraft, ContactId, ContactSearch, TokenDigest,
    User, UserId,
};

struct UserRow {
    user: User,
    token: Option<TokenDigest>,
}

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserRow>,
    contacts: BTreeMap<ContactId, (UserId, Contact)>,
    addresses: BTreeMap<AddressId, (ContactId, Address)>,
    last_contact_id: i64,
    last_address_id: i64,
}

/// Storage adapter keeping users, contacts and addresses in memory.
#[derive(Default)]
pub struct InMemoryDirectoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryDirectoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "in-memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl UserRepository for InMemoryDirectoryStore {
    async fn insert(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        if tables
            .users
            .values()
            .any(|row| row.user.username() == user.username())
        {
            return Err(UserRepositoryError::duplicate_username(user.username()));
        }
        tables.users.insert(
            user.id(),
            UserRow {
                user: user.clone(),
                token: None,
            },
        );
        Ok(())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|row| row.user.username() == username)
            .map(|row| row.user.clone()))
    }

    async fn find_by_token(
        &self,
        digest: &TokenDigest,
    ) -> Result<Option<User>, UserRepositoryError> {
        let tables = self.lock().map_err(UserRepositoryError::query)?;
        Ok(tables
            .users
            .values()
            .find(|row| row.token.as_ref() == Some(digest))
            .map(|row| row.user.clone()))
    }

    async fn update_profile(&self, user: &User) -> Result<(), UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        let row = tables
            .users
            .get_mut(&user.id())
            .ok_or_else(|| UserRepositoryError::query("user not found"))?;
        row.user = user.clone();
        Ok(())
    }

    async fn set_token(&self, id: &UserId, digest: &TokenDigest) -> Result<(), UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        let row = tables
            .users
            .get_mut(id)
            .ok_or_else(|| UserRepositoryError::query("user not found"))?;
        row.token = Some(digest.clone());
        Ok(())
    }

    async fn clear_token(&self, id: &UserId) -> Result<(), UserRepositoryError> {
        let mut tables = self.lock().map_err(UserRepositoryError::query)?;
        if let Some(row) = tables.users.get_mut(id) {
            row.token = None;
        }
        Ok(())
    }
}

#[async_trait]
impl ContactRepository for InMemoryDirectoryStore {
    async fn insert(
        &self,
        owner: &UserId,
        draft: &ContactDraft,
    ) -> Result<Contact, ContactRepositoryError> {
        let mut tables = self.lock().map_err(ContactRepositoryError::query)?;
        if !tables.users.contains_key(owner) {
            return Err(ContactRepositoryError::query("owner does not exist"));
        }
        tables.last_contact_id += 1;
        let contact = Contact::from_draft(ContactId::new(tables.last_contact_id), draft.clone());
        tables
            .contacts
            .insert(contact.id, (*owner, contact.clone()));
        Ok(contact)
    }

    async fn find_owned(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let tables = self.lock().map_err(ContactRepositoryError::query)?;
        Ok(tables
            .contacts
            .get(&id)
            .filter(|(row_owner, _)| row_owner == owner)
            .map(|(_, contact)| contact.clone()))
    }

    async fn update_owned(
        &self,
        owner: &UserId,
        id: ContactId,
        draft: &ContactDraft,
    ) -> Result<Option<Contact>, ContactRepositoryError> {
        let mut tables = self.lock().map_err(ContactRepositoryError::query)?;
        Ok(tables
            .contacts
            .get_mut(&id)
            .filter(|(row_owner, _)| row_owner == owner)
            .map(|(_, contact)| {
                *contact = Contact::from_draft(id, draft.clone());
                contact.clone()
            }))
    }

    async fn delete_with_addresses(
        &self,
        owner: &UserId,
        id: ContactId,
    ) -> Result<bool, ContactRepositoryError> {
        // One guard spans both tables, so no reader sees a half-deleted contact.
        let mut tables = self.lock().map_err(ContactRepositoryError::query)?;
        let owned = tables
            .contacts
            .get(&id)
            .is_some_and(|(row_owner, _)| row_owner == owner);
        if !owned {
            return Ok(false);
        }
        tables.addresses.retain(|_, (contact, _)| *contact != id);
        tables.contacts.remove(&id);
        Ok(true)
    }

    async fn search(
        &self,
        owner: &UserId,
        search: &ContactSearch,
        request: PageRequest,
    ) -> Result<Page<Contact>, ContactRepositoryError> {
        let tables = self.lock().map_err(ContactRepositoryError::query)?;
        let matching: Vec<&Contact> = tables
            .contacts
            .values()
            .filter(|(row_owner, contact)| row_owner == owner && search.matches(contact))
            .map(|(_, contact)| contact)
            .collect();
        let total = u64::try_from(matching.len()).unwrap_or(u64::MAX);
        let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok(Page::new(items, request, total))
    }
}

#[async_trait]
impl AddressRepository for InMemoryDirectoryStore {
    async fn insert(
        &self,
        contact: ContactId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let mut tables = self.lock().map_err(AddressRepositoryError::query)?;
        if !tables.contacts.contains_key(&contact) {
            return Ok(None);
        }
        tables.last_address_id += 1;
        let address = Address::from_draft(AddressId::new(tables.last_address_id), draft.clone());
        tables
            .addresses
            .insert(address.id, (contact, address.clone()));
        Ok(Some(address))
    }

    async fn find_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let tables = self.lock().map_err(AddressRepositoryError::query)?;
        Ok(tables
            .addresses
            .get(&id)
            .filter(|(parent, _)| *parent == contact)
            .map(|(_, address)| address.clone()))
    }

    async fn list_for_contact(
        &self,
        contact: ContactId,
    ) -> Result<Vec<Address>, AddressRepositoryError> {
        let tables = self.lock().map_err(AddressRepositoryError::query)?;
        Ok(tables
            .addresses
            .values()
            .filter(|(parent, _)| *parent == contact)
            .map(|(_, address)| address.clone())
            .collect())
    }

    async fn update_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
        draft: &AddressDraft,
    ) -> Result<Option<Address>, AddressRepositoryError> {
        let mut tables = self.lock().map_err(AddressRepositoryError::query)?;
        Ok(tables
            .addresses
            .get_mut(&id)
            .filter(|(parent, _)| *parent == contact)
            .map(|(_, address)| {
                *address = Address::from_draft(id, draft.clone());
                address.clone()
            }))
    }

    async fn delete_in_contact(
        &self,
        contact: ContactId,
        id: AddressId,
    ) -> Result<bool, AddressRepositoryError> {
        let mut tables = self.lock().map_err(AddressRepositoryError::query)?;
        let matches = tables
            .addresses
            .get(&id)
            .is_some_and(|(parent, _)| *parent == contact);
        if matches {
            tables.addresses.remove(&id);
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use pagination::PageNumber;
    use rstest::{fixture, rstest};

    fn draft(i: i64) -> ContactDraft {
        ContactDraft {
            first_name: format!("test{i}"),
            last_name: Some(format!("test{i}")),
            email: Some(format!("test{i}@pzn.com")),
            phone: Some(format!("080900000{i}")),
        }
    }

    fn address_draft() -> AddressDraft {
        AddressDraft {
            street: None,
            city: None,
            province: None,
            country: "Indonesia".to_owned(),
            postal_code: "234234".to_owned(),
        }
    }

    async fn add_user(store: &InMemoryDirectoryStore, username: &str) -> UserId {
        let user = User::new(UserId::random(), username, username, "hash");
        UserRepository::insert(store, &user).await.expect("insert user");
        user.id()
    }

    #[fixture]
    fn store() -> InMemoryDirectoryStore {
        InMemoryDirectoryStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn usernames_are_unique(store: InMemoryDirectoryStore) {
        add_user(&store, "test").await;
        let clash = User::new(UserId::random(), "test", "other", "hash");
        let err = UserRepository::insert(&store, &clash)
            .await
            .expect_err("duplicate");
        assert!(matches!(err, UserRepositoryError::DuplicateUsername { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn a_new_token_replaces_the_previous_one(store: InMemoryDirectoryStore) {
        let id = add_user(&store, "test").await;
        let first = TokenDigest::of("first");
        let second = TokenDigest::of("second");
        store.set_token(&id, &first).await.expect("set");
        store.set_token(&id, &second).await.expect("set");

        assert!(store.find_by_token(&first).await.expect("lookup").is_none());
        assert!(store.find_by_token(&second).await.expect("lookup").is_some());

        store.clear_token(&id).await.expect("clear");
        assert!(store.find_by_token(&second).await.expect("lookup").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn search_pages_in_id_order(store: InMemoryDirectoryStore) {
        let owner = add_user(&store, "test").await;
        let other = add_user(&store, "other").await;
        for i in 0..15 {
            ContactRepository::insert(&store, &owner, &draft(i))
                .await
                .expect("insert");
        }
        ContactRepository::insert(&store, &other, &draft(1))
            .await
            .expect("insert foreign");

        let second = PageRequest::with_default_size(PageNumber::from_requested(Some(2)));
        let page = store
            .search(&owner, &ContactSearch::default(), second)
            .await
            .expect("search");
        assert_eq!(page.items().len(), 5);
        assert_eq!(page.paging().total_item(), 15);
        assert_eq!(page.items().first().map(|c| c.first_name.as_str()), Some("test10"));

        let by_name = store
            .search(
                &owner,
                &ContactSearch::new(Some("test1".to_owned()), None, None),
                PageRequest::default(),
            )
            .await
            .expect("search");
        assert_eq!(by_name.paging().total_item(), 6);
    }

    #[rstest]
    #[tokio::test]
    async fn deleting_a_contact_removes_its_addresses(store: InMemoryDirectoryStore) {
        let owner = add_user(&store, "test").await;
        let contact = ContactRepository::insert(&store, &owner, &draft(1))
            .await
            .expect("insert");
        let address = AddressRepository::insert(&store, contact.id, &address_draft())
            .await
            .expect("insert address")
            .expect("contact exists");

        assert!(store
            .delete_with_addresses(&owner, contact.id)
            .await
            .expect("delete"));
        assert!(store
            .find_in_contact(contact.id, address.id)
            .await
            .expect("lookup")
            .is_none());

        let next = ContactRepository::insert(&store, &owner, &draft(2))
            .await
            .expect("insert");
        assert!(next.id > contact.id, "ids are never reused");
    }

    #[rstest]
    #[tokio::test]
    async fn address_under_deleted_contact_is_not_stored(store: InMemoryDirectoryStore) {
        let owner = add_user(&store, "test").await;
        let contact = ContactRepository::insert(&store, &owner, &draft(1))
            .await
            .expect("insert");
        assert!(store
            .delete_with_addresses(&owner, contact.id)
            .await
            .expect("delete"));

        let inserted = AddressRepository::insert(&store, contact.id, &address_draft())
            .await
            .expect("insert address");
        assert!(inserted.is_none());
        assert!(store
            .list_for_contact(contact.id)
            .await
            .expect("list")
            .is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_owners_cannot_touch_contacts(store: InMemoryDirectoryStore) {
        let owner = add_user(&store, "test").await;
        let stranger = add_user(&store, "stranger").await;
        let contact = ContactRepository::insert(&store, &owner, &draft(1))
            .await
            .expect("insert");

        assert!(store.find_owned(&stranger, contact.id).await.expect("find").is_none());
        assert!(store
            .update_owned(&stranger, contact.id, &draft(9))
            .await
            .expect("update")
            .is_none());
        assert!(!store
            .delete_with_addresses(&stranger, contact.id)
            .await
            .expect("delete"));
    }
}
