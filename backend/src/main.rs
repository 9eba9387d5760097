//! Backend entry-point: loads settings, wires storage and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use contact_directory::inbound::http::health::HealthState;
use server::{DirectorySettings, build_http_state, create_server};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = DirectorySettings::load_from_iter(std::env::args_os())
        .map_err(|err| std::io::Error::other(format!("invalid configuration: {err}")))?;
    let http_state = build_http_state(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, http_state, &settings)?;
    info!(addr = %settings.bind_addr(), "contact directory listening");
    server.await
}
