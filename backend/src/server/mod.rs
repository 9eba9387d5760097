//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::DirectorySettings;
pub use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use contact_directory::Trace;
#[cfg(debug_assertions)]
use contact_directory::doc::ApiDoc;
use contact_directory::inbound::http::configure_api;
use contact_directory::inbound::http::health::{HealthState, live, ready};
use contact_directory::inbound::http::request_config::not_found;
use contact_directory::inbound::http::state::HttpState;

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .configure(configure_api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app.default_service(web::to(not_found))
}

/// Construct the Actix HTTP server.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    settings: &DirectorySettings,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(http_state);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || build_app(server_health_state.clone(), http_state.clone()))
        .bind(settings.bind_addr())?
        .run();

    health_state.mark_ready();
    Ok(server)
}
