//! Contacts owned by a user.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{ValidationError, Validator};

/// Maximum length of first name, last name and email.
pub const CONTACT_TEXT_MAX: usize = 100;
/// Maximum length of a phone number.
pub const PHONE_MAX: usize = 20;

/// Serial contact identifier; never reused once deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct ContactId(i64);

impl ContactId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Contact as returned to its owner. The owner id is deliberately absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Identifier.
    pub id: ContactId,
    /// First name.
    #[schema(example = "Eko")]
    pub first_name: String,
    /// Last name.
    #[schema(example = "Khannedy")]
    pub last_name: Option<String>,
    /// Email address.
    #[schema(example = "eko@pzn.com")]
    pub email: Option<String>,
    /// Phone number.
    #[schema(example = "0899999999")]
    pub phone: Option<String>,
}

impl Contact {
    /// Attach an identifier to validated field values.
    pub fn from_draft(id: ContactId, draft: ContactDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone: draft.phone,
        }
    }
}

/// Raw contact body used by both create and update.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContactPayload {
    /// Required first name.
    pub first_name: Option<String>,
    /// Optional last name.
    pub last_name: Option<String>,
    /// Optional email address.
    pub email: Option<String>,
    /// Optional phone number.
    pub phone: Option<String>,
}

/// Contact fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: Option<String>,
    /// Email address.
    pub email: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
}

impl ContactDraft {
    /// Check the payload, reporting every violated rule.
    ///
    /// # Examples
    /// ```
    /// use contact_directory::domain::{ContactDraft, ContactPayload};
    ///
    /// let err = ContactDraft::validate(ContactPayload {
    ///     email: Some("not-an-email".into()),
    ///     ..ContactPayload::default()
    /// })
    /// .expect_err("first name is missing and email is malformed");
    /// assert_eq!(err.violations().len(), 2);
    /// ```
    pub fn validate(payload: ContactPayload) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();
        let first_name = validator.required("firstName", payload.first_name, CONTACT_TEXT_MAX);
        let last_name = validator.optional("lastName", payload.last_name, CONTACT_TEXT_MAX);
        let email = validator.optional_email("email", payload.email, CONTACT_TEXT_MAX);
        let phone = validator.optional("phone", payload.phone, PHONE_MAX);
        validator.finish(Self {
            first_name,
            last_name,
            email,
            phone,
        })
    }
}
