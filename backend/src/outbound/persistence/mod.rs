//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories are thin translators between Diesel rows and domain
//! entities; row structs and table definitions stay private to this module.
//!
//! # Example
//!
//! ```no_run
//! use contact_directory::outbound::persistence::{DbPool, DieselContactRepository, PoolConfig};
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/directory")).await?;
//! let contacts = DieselContactRepository::new(pool);
//! # let _ = contacts;
//! # Ok(())
//! # }
//! ```

mod diesel_address_repository;
mod diesel_basic_error_mapping;
mod diesel_contact_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_address_repository::DieselAddressRepository;
pub use diesel_contact_repository::DieselContactRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_POOL_SIZE, DbPool, PoolConfig, PoolError};
