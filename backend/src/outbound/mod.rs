//! Outbound adapters implementing the domain's driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel.
//! - **memory**: in-process repositories used without a database.
//! - **hashing**: Argon2 password hashing.

pub mod hashing;
pub mod memory;
pub mod persistence;
