//! Server settings loaded via OrthoConfig.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use contact_directory::outbound::persistence::{DEFAULT_POOL_SIZE, PoolConfig};

const DEFAULT_PORT: u16 = 8080;

/// Settings read from CLI flags, `DIRECTORY_*` environment variables and
/// the configuration file.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "DIRECTORY")]
pub struct DirectorySettings {
    /// Interface to bind; defaults to all IPv4 interfaces.
    pub host: Option<IpAddr>,
    /// TCP port to bind.
    pub port: Option<u16>,
    /// PostgreSQL connection string. Without one the in-memory store is used.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_size: Option<u32>,
}

impl DirectorySettings {
    /// Socket address the HTTP server binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(
            self.host.unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Pool configuration when a database URL is configured.
    pub fn pool_config(&self) -> Option<PoolConfig> {
        self.database_url.as_ref().map(|url| {
            PoolConfig::new(url.clone()).with_max_size(self.pool_size.unwrap_or(DEFAULT_POOL_SIZE))
        })
    }
}
