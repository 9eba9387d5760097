//! Credentials and bearer tokens.
//!
//! Plaintext passwords live only inside zeroizing buffers and bearer tokens
//! are persisted as SHA-256 digests, so neither survives in storage or logs.

use std::fmt;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use utoipa::ToSchema;
use uuid::Uuid;
use zeroize::Zeroizing;

use super::validation::{ValidationError, Validator};

/// Maximum length of usernames, display names and passwords.
pub const CREDENTIAL_MAX: usize = 100;

/// Plaintext password, wiped from memory on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    pub(crate) fn new(value: String) -> Self {
        Self(Zeroizing::new(value))
    }

    /// Borrow the plaintext for hashing or verification.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Raw login request body.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct LoginPayload {
    /// Account username.
    #[schema(example = "khannedy")]
    pub username: Option<String>,
    /// Account password.
    #[schema(example = "rahasia")]
    pub password: Option<String>,
}

/// Validated login credentials.
///
/// # Examples
/// ```
/// use contact_directory::domain::{LoginCredentials, LoginPayload};
///
/// let creds = LoginCredentials::validate(LoginPayload {
///     username: Some("khannedy".into()),
///     password: Some("rahasia".into()),
/// })
/// .expect("valid credentials");
/// assert_eq!(creds.username(), "khannedy");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Password,
}

impl LoginCredentials {
    /// Check the payload, reporting every violated rule.
    pub fn validate(payload: LoginPayload) -> Result<Self, ValidationError> {
        let mut validator = Validator::new();
        let username = validator.required("username", payload.username, CREDENTIAL_MAX);
        let password = validator.secret("password", payload.password, CREDENTIAL_MAX);
        validator.finish(())?;
        Ok(Self {
            username,
            password: Password::new(password.unwrap_or_default()),
        })
    }

    /// Username to look up.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Password to verify.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Bearer token handed to a client after login.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    /// Issue a fresh random token.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Token value as sent by clients.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digest under which this token is stored.
    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(&self.0)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

impl From<AuthToken> for String {
    fn from(value: AuthToken) -> Self {
        value.0
    }
}

/// Hex-encoded SHA-256 digest of a bearer token.
///
/// Equal tokens always produce equal digests, so comparing digests is the
/// same as comparing the tokens themselves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TokenDigest(String);

impl TokenDigest {
    /// Digest an arbitrary presented token.
    pub fn of(token: &str) -> Self {
        Self(hex::encode(Sha256::digest(token.as_bytes())))
    }

    /// Rehydrate a digest read back from storage.
    pub fn from_stored(hex: String) -> Self {
        Self(hex)
    }

    /// Hex representation.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}
