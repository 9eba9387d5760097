//! HTTP inbound adapter exposing the REST endpoints under `/api`.

pub mod addresses;
pub mod auth;
pub mod contacts;
pub mod error;
pub mod health;
pub mod request_config;
pub mod schemas;
pub mod state;
pub mod users;

pub use error::ApiResult;

use actix_web::web;

/// Register the `/api` scope with its extractor configuration.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use contact_directory::inbound::http::configure_api;
///
/// let app = App::new().configure(configure_api);
/// # let _ = app;
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(request_config::json_config())
            .app_data(request_config::query_config())
            .app_data(request_config::path_config())
            .service(users::register)
            .service(users::login)
            .service(users::current_user)
            .service(users::update_current_user)
            .service(users::logout)
            .service(contacts::create_contact)
            .service(contacts::search_contacts)
            .service(contacts::get_contact)
            .service(contacts::update_contact)
            .service(contacts::delete_contact)
            .service(addresses::create_address)
            .service(addresses::list_addresses)
            .service(addresses::get_address)
            .service(addresses::update_address)
            .service(addresses::delete_address),
    );
}
