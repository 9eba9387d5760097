//! Domain ports for the hexagonal boundary.
//!
//! Driven ports ([`UserRepository`], [`ContactRepository`],
//! [`AddressRepository`], [`PasswordHasher`]) are implemented by outbound
//! adapters. Driving ports ([`ContactDirectory`], [`UserAccounts`]) are
//! implemented by domain services and consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod address_repository;
mod contact_directory;
mod contact_repository;
mod password_hasher;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use address_repository::MockAddressRepository;
pub use address_repository::{AddressRepository, AddressRepositoryError};
pub use contact_directory::ContactDirectory;
#[cfg(test)]
pub use contact_repository::MockContactRepository;
pub use contact_repository::{ContactRepository, ContactRepositoryError};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
