//! Domain primitives, ports and services.
//!
//! Purpose: define the contact directory's entities, validation rules and the
//! ownership-scoped use cases. Nothing in here knows about HTTP or SQL;
//! adapters reach the domain through [`ports`].
//!
//! Public surface:
//! - [`Error`] / [`ErrorCode`]: transport-agnostic failure payload.
//! - [`User`], [`Contact`], [`Address`] and their validated drafts.
//! - [`ContactSearch`]: normalised listing criteria.
//! - [`DirectoryService`] and [`AccountService`]: driving-port implementations.

pub mod account_service;
pub mod address;
pub mod auth;
pub mod contact;
pub mod contact_search;
pub mod credential_resolver;
pub mod directory_service;
pub mod error;
pub mod ownership;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::address::{Address, AddressDraft, AddressId, AddressPayload};
pub use self::auth::{AuthToken, LoginCredentials, LoginPayload, Password, TokenDigest};
pub use self::contact::{Contact, ContactDraft, ContactId, ContactPayload};
pub use self::contact_search::{ContactQuery, ContactSearch, like_pattern};
pub use self::credential_resolver::{CredentialResolver, bearer_value};
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::ownership::OwnershipGuard;
pub use self::trace_id::TraceId;
pub use self::user::{
    ProfileUpdate, RegisterPayload, Registration, UpdateUserPayload, User, UserId, UserProfile,
};
pub use self::validation::{ValidationError, Violation, ViolationCode};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use contact_directory::domain::{ApiResult, Error};
///
/// fn lookup() -> ApiResult<()> {
///     Err(Error::not_found("contact is not found"))
/// }
/// assert!(lookup().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
