//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they only
//! depend on driving ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{ContactDirectory, UserAccounts};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Contact and address use cases.
    pub directory: Arc<dyn ContactDirectory>,
    /// Account use cases.
    pub accounts: Arc<dyn UserAccounts>,
}

impl HttpState {
    /// Bundle the driving ports used by the handlers.
    pub fn new(directory: Arc<dyn ContactDirectory>, accounts: Arc<dyn UserAccounts>) -> Self {
        Self {
            directory,
            accounts,
        }
    }
}
