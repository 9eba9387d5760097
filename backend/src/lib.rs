//! Contact directory backend: a per-user address book over HTTP.
//!
//! The crate is laid out hexagonally: [`domain`] holds entities, ports and
//! use cases; [`inbound`] adapts HTTP requests onto the driving ports;
//! [`outbound`] implements the driven ports over PostgreSQL, memory and
//! Argon2.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
pub use domain::TraceId;
