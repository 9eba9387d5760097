//! Wire driving ports to either PostgreSQL or the in-memory store.

use std::sync::Arc;

use tracing::{info, warn};

use contact_directory::domain::{AccountService, DirectoryService};
use contact_directory::inbound::http::state::HttpState;
use contact_directory::outbound::hashing::Argon2PasswordHasher;
use contact_directory::outbound::memory::InMemoryDirectoryStore;
use contact_directory::outbound::persistence::{
    DbPool, DieselAddressRepository, DieselContactRepository, DieselUserRepository,
    run_pending_migrations,
};

use super::DirectorySettings;

fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::new());
    HttpState::new(
        Arc::new(DirectoryService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
        )),
        Arc::new(AccountService::new(store, hasher)),
    )
}

fn diesel_state(pool: &DbPool) -> HttpState {
    let users = Arc::new(DieselUserRepository::new(pool.clone()));
    let hasher = Arc::new(Argon2PasswordHasher::new());
    HttpState::new(
        Arc::new(DirectoryService::new(
            Arc::clone(&users),
            Arc::new(DieselContactRepository::new(pool.clone())),
            Arc::new(DieselAddressRepository::new(pool.clone())),
        )),
        Arc::new(AccountService::new(users, hasher)),
    )
}

/// Build handler state for the configured storage backend.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations fail or the pool cannot be built.
pub async fn build_http_state(settings: &DirectorySettings) -> std::io::Result<HttpState> {
    let Some(config) = settings.pool_config() else {
        warn!("no database configured; contacts are kept in memory");
        return Ok(in_memory_state());
    };
    run_pending_migrations(config.database_url())
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    let pool = DbPool::new(config)
        .await
        .map_err(|err| std::io::Error::other(err.to_string()))?;
    info!("using PostgreSQL storage");
    Ok(diesel_state(&pool))
}
