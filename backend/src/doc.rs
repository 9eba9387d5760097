//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every HTTP endpoint from the inbound layer, the
//! schemas they reference and the bearer token security scheme. Swagger UI
//! serves it in debug builds and `openapi-dump` prints it for tooling.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Address, AddressPayload, Contact, ContactPayload, Error, ErrorCode, LoginPayload,
    RegisterPayload, UpdateUserPayload, UserProfile, Violation, ViolationCode,
};
use crate::inbound::http::schemas::{ContactPageSchema, PagingSchema, StatusBody, TokenBody};

/// Register the bearer token scheme issued by `POST /api/users/login`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "BearerToken",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Token issued by POST /api/users/login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Contact directory API",
        description = "Per-user contact and address book with bearer token authentication."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::users::register,
        crate::inbound::http::users::login,
        crate::inbound::http::users::current_user,
        crate::inbound::http::users::update_current_user,
        crate::inbound::http::users::logout,
        crate::inbound::http::contacts::create_contact,
        crate::inbound::http::contacts::search_contacts,
        crate::inbound::http::contacts::get_contact,
        crate::inbound::http::contacts::update_contact,
        crate::inbound::http::contacts::delete_contact,
        crate::inbound::http::addresses::create_address,
        crate::inbound::http::addresses::list_addresses,
        crate::inbound::http::addresses::get_address,
        crate::inbound::http::addresses::update_address,
        crate::inbound::http::addresses::delete_address,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Violation,
        ViolationCode,
        UserProfile,
        RegisterPayload,
        LoginPayload,
        UpdateUserPayload,
        Contact,
        ContactPayload,
        Address,
        AddressPayload,
        StatusBody,
        TokenBody,
        PagingSchema,
        ContactPageSchema
    )),
    tags(
        (name = "users", description = "Registration, login and the caller's profile"),
        (name = "contacts", description = "Contacts owned by the caller"),
        (name = "addresses", description = "Addresses of the caller's contacts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
