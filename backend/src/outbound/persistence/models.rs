//! Internal Diesel row structs.
//!
//! These types never leave the persistence layer; adapters convert them to
//! domain entities before returning.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Address, AddressDraft, AddressId, Contact, ContactDraft, ContactId, User, UserId,
};

use super::schema::{addresses, contacts, users};

/// Row read from `users`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub password_hash: String,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User::new(
            UserId::from_uuid(row.id),
            row.username,
            row.name,
            row.password_hash,
        )
    }
}

/// Insertable account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
}

/// Profile changeset.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub name: &'a str,
    pub password_hash: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row read from `contacts`, without the owner column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = contacts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ContactRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<ContactRow> for Contact {
    fn from(row: ContactRow) -> Self {
        Contact {
            id: ContactId::new(row.id),
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            phone: row.phone,
        }
    }
}

/// Insertable contact.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = contacts)]
pub(crate) struct NewContactRow<'a> {
    pub user_id: Uuid,
    pub first_name: &'a str,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
}

impl<'a> NewContactRow<'a> {
    pub(crate) fn new(owner: &UserId, draft: &'a ContactDraft) -> Self {
        Self {
            user_id: *owner.as_uuid(),
            first_name: &draft.first_name,
            last_name: draft.last_name.as_deref(),
            email: draft.email.as_deref(),
            phone: draft.phone.as_deref(),
        }
    }
}

/// Full-replacement contact changeset; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = contacts)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ContactChangeset<'a> {
    pub first_name: &'a str,
    pub last_name: Option<&'a str>,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a ContactDraft> for ContactChangeset<'a> {
    fn from(draft: &'a ContactDraft) -> Self {
        Self {
            first_name: &draft.first_name,
            last_name: draft.last_name.as_deref(),
            email: draft.email.as_deref(),
            phone: draft.phone.as_deref(),
            updated_at: Utc::now(),
        }
    }
}

/// Row read from `addresses`, without the contact column.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = addresses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AddressRow {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<AddressRow> for Address {
    fn from(row: AddressRow) -> Self {
        Address {
            id: AddressId::new(row.id),
            street: row.street,
            city: row.city,
            province: row.province,
            country: row.country,
            postal_code: row.postal_code,
        }
    }
}

/// Insertable address.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = addresses)]
pub(crate) struct NewAddressRow<'a> {
    pub contact_id: i64,
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub province: Option<&'a str>,
    pub country: &'a str,
    pub postal_code: &'a str,
}

impl<'a> NewAddressRow<'a> {
    pub(crate) fn new(contact: ContactId, draft: &'a AddressDraft) -> Self {
        Self {
            contact_id: contact.get(),
            street: draft.street.as_deref(),
            city: draft.city.as_deref(),
            province: draft.province.as_deref(),
            country: &draft.country,
            postal_code: &draft.postal_code,
        }
    }
}

/// Full-replacement address changeset; `None` clears a column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = addresses)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct AddressChangeset<'a> {
    pub street: Option<&'a str>,
    pub city: Option<&'a str>,
    pub province: Option<&'a str>,
    pub country: &'a str,
    pub postal_code: &'a str,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a AddressDraft> for AddressChangeset<'a> {
    fn from(draft: &'a AddressDraft) -> Self {
        Self {
            street: draft.street.as_deref(),
            city: draft.city.as_deref(),
            province: draft.province.as_deref(),
            country: &draft.country,
            postal_code: &draft.postal_code,
            updated_at: Utc::now(),
        }
    }
}
