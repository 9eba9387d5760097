//! Postal addresses attached to a contact.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::validation::{ValidationError, Validator};

/// Maximum length of a street line.
pub const STREET_MAX: usize = 255;
/// Maximum length of city, province and country.
pub const REGION_MAX: usize = 100;
/// Maximum length of a postal code.
pub const POSTAL_CODE_MAX: usize = 10;

/// Serial address identifier; never reused once deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = i64, example = 1)]
pub struct AddressId(i64);

impl AddressId {
    /// Wrap a raw identifier.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw identifier.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for AddressId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Address as returned to the contact's owner, without the contact id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    /// Identifier.
    pub id: AddressId,
    /// Street line.
    #[schema(example = "Jalan Apa")]
    pub street: Option<String>,
    /// City.
    #[schema(example = "Jakarta")]
    pub city: Option<String>,
    /// Province or state.
    #[schema(example = "DKI Jakarta")]
    pub province: Option<String>,
    /// Country.
    #[schema(example = "Indonesia")]
    pub country: String,
    /// Postal code.
    #[schema(example = "234234")]
    pub postal_code: String,
}

impl Address {
    /// Attach an identifier to validated field values.
    pub fn from_draft(id: AddressId, draft: AddressDraft) -> Self {
        Self {
            id,
            street: draft.street,
            city: draft.city,
            province: draft.province,
            country: draft.country,
            postal_code: draft.postal_code,
        }
    }
}

/// Raw address body used by both create and update.
#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressPayload {
    /// Optional street line.
    pub street: Option<String>,
    /// Optional city.
    pub city: Option<String>,
    /// Optional province.
    pub province: Option<String>,
    /// Required country.
    pub country: Option<String>,
    /// Required postal code.
    pub postal_code: Option<String>,
}

/// Address fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressDraft {
    /// Street line.
    pub street: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Province.
    pub province: Option<String>,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
}

impl AddressDraft {
    /// Check the payload, reporting every violated rule.
    pub fn validate(payload: AddressPayload) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();
        let street = validator.optional("street", payload.street, STREET_MAX);
        let city = validator.optional("city", payload.city, REGION_MAX);
        let province = validator.optional("province", payload.province, REGION_MAX);
        let country = validator.required("country", payload.country, REGION_MAX);
        let postal_code = validator.required("postalCode", payload.postal_code, POSTAL_CODE_MAX);
        validator.finish(Self {
            street,
            city,
            province,
            country,
            postal_code,
        })
    }
}
