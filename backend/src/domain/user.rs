//! Directory account model.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::auth::{CREDENTIAL_MAX, Password};
use super::validation::{ValidationError, Validator};

/// Stable user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an identifier read back from storage.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered account.
///
/// ## Invariants
/// - `username` is unique across the directory.
/// - `password_hash` is a PHC string and never leaves the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: String,
    name: String,
    password_hash: String,
}

impl User {
    /// Assemble a user from stored parts.
    pub fn new(
        id: UserId,
        username: impl Into<String>,
        name: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            id,
            username: username.into(),
            name: name.into(),
            password_hash: password_hash.into(),
        }
    }

    /// Identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    /// Copy of the user with a profile update applied.
    #[must_use]
    pub fn with_profile(mut self, name: Option<String>, password_hash: Option<String>) -> Self {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        self
    }
}

/// Public view of an account: no identifiers, hashes or tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct UserProfile {
    /// Login name.
    #[schema(example = "khannedy")]
    pub username: String,
    /// Display name.
    #[schema(example = "Eko Khannedy")]
    pub name: String,
}

impl From<&User> for UserProfile {
    fn from(value: &User) -> Self {
        Self {
            username: value.username.clone(),
            name: value.name.clone(),
        }
    }
}

/// Raw registration request body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RegisterPayload {
    /// Desired login name.
    #[schema(example = "khannedy")]
    pub username: Option<String>,
    /// Plaintext password.
    #[schema(example = "rahasia")]
    pub password: Option<String>,
    /// Display name.
    #[schema(example = "Eko Khannedy")]
    pub name: Option<String>,
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct Registration {
    username: String,
    password: Password,
    name: String,
}

impl Registration {
    /// Check the payload, reporting every violated rule.
    pub fn validate(payload: RegisterPayload) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();
        let username = validator.required("username", payload.username, CREDENTIAL_MAX);
        let password = validator.secret("password", payload.password, CREDENTIAL_MAX);
        let name = validator.required("name", payload.name, CREDENTIAL_MAX);
        validator.finish(())?;
        Ok(Self {
            username,
            password: Password::new(password.unwrap_or_default()),
            name,
        })
    }

    /// Requested username.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Plaintext password to hash.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Raw profile update body; absent fields stay unchanged.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateUserPayload {
    /// New display name.
    pub name: Option<String>,
    /// New password.
    pub password: Option<String>,
}

/// Validated profile update.
#[derive(Debug, Clone)]
pub struct ProfileUpdate {
    name: Option<String>,
    password: Option<Password>,
}

impl ProfileUpdate {
    /// Check the payload, reporting every violated rule.
    pub fn validate(payload: UpdateUserPayload) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();
        let name = validator.optional("name", payload.name, CREDENTIAL_MAX);
        let password = match payload.password {
            Some(raw) => validator.secret("password", Some(raw), CREDENTIAL_MAX),
            None => None,
        };
        validator.finish(())?;
        Ok(Self {
            name,
            password: password.map(Password::new),
        })
    }

    /// Replacement display name.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Replacement password.
    pub fn password(&self) -> Option<&Password> {
        self.password.as_ref()
    }
}
