//! Address handlers, always reached through the owning contact.

use actix_web::{delete, get, post, put, web};

use crate::domain::{Address, AddressId, AddressPayload, ContactId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Credential, admit};
use crate::inbound::http::schemas::StatusBody;
use crate::inbound::http::state::HttpState;

fn address_path(path: web::Path<(i64, i64)>) -> (ContactId, AddressId) {
    let (contact, address) = path.into_inner();
    (ContactId::new(contact), AddressId::new(address))
}

/// Add an address to one of the caller's contacts.
#[utoipa::path(
    post,
    path = "/api/contacts/{contactId}/addresses",
    params(("contactId" = i64, Path, description = "Contact identifier")),
    request_body = AddressPayload,
    responses(
        (status = 200, description = "Address created", body = Address),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "createAddress"
)]
#[post("/contacts/{contact_id}/addresses")]
pub async fn create_address(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<i64>, actix_web::Error>,
    payload: Result<web::Json<AddressPayload>, actix_web::Error>,
) -> ApiResult<web::Json<Address>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let payload = admit(state.accounts.as_ref(), &credential, payload).await?;
    let contact = ContactId::new(path.into_inner());
    let address = state
        .directory
        .create_address(credential.as_deref(), contact, payload.into_inner())
        .await?;
    Ok(web::Json(address))
}

/// List every address of one of the caller's contacts.
#[utoipa::path(
    get,
    path = "/api/contacts/{contactId}/addresses",
    params(("contactId" = i64, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Addresses", body = [Address]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "listAddresses"
)]
#[get("/contacts/{contact_id}/addresses")]
pub async fn list_addresses(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<i64>, actix_web::Error>,
) -> ApiResult<web::Json<Vec<Address>>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let contact = ContactId::new(path.into_inner());
    let addresses = state
        .directory
        .list_addresses(credential.as_deref(), contact)
        .await?;
    Ok(web::Json(addresses))
}

/// Fetch an address of one of the caller's contacts.
#[utoipa::path(
    get,
    path = "/api/contacts/{contactId}/addresses/{addressId}",
    params(
        ("contactId" = i64, Path, description = "Contact identifier"),
        ("addressId" = i64, Path, description = "Address identifier")
    ),
    responses(
        (status = 200, description = "Address", body = Address),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact or address is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "getAddress"
)]
#[get("/contacts/{contact_id}/addresses/{address_id}")]
pub async fn get_address(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<(i64, i64)>, actix_web::Error>,
) -> ApiResult<web::Json<Address>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let (contact, id) = address_path(path);
    let address = state
        .directory
        .get_address(credential.as_deref(), contact, id)
        .await?;
    Ok(web::Json(address))
}

/// Replace the fields of an address.
#[utoipa::path(
    put,
    path = "/api/contacts/{contactId}/addresses/{addressId}",
    params(
        ("contactId" = i64, Path, description = "Contact identifier"),
        ("addressId" = i64, Path, description = "Address identifier")
    ),
    request_body = AddressPayload,
    responses(
        (status = 200, description = "Updated address", body = Address),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact or address is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "updateAddress"
)]
#[put("/contacts/{contact_id}/addresses/{address_id}")]
pub async fn update_address(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<(i64, i64)>, actix_web::Error>,
    payload: Result<web::Json<AddressPayload>, actix_web::Error>,
) -> ApiResult<web::Json<Address>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let payload = admit(state.accounts.as_ref(), &credential, payload).await?;
    let (contact, id) = address_path(path);
    let address = state
        .directory
        .update_address(credential.as_deref(), contact, id, payload.into_inner())
        .await?;
    Ok(web::Json(address))
}

/// Delete an address.
#[utoipa::path(
    delete,
    path = "/api/contacts/{contactId}/addresses/{addressId}",
    params(
        ("contactId" = i64, Path, description = "Contact identifier"),
        ("addressId" = i64, Path, description = "Address identifier")
    ),
    responses(
        (status = 200, description = "Address deleted", body = StatusBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact or address is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["addresses"],
    operation_id = "deleteAddress"
)]
#[delete("/contacts/{contact_id}/addresses/{address_id}")]
pub async fn delete_address(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<(i64, i64)>, actix_web::Error>,
) -> ApiResult<web::Json<StatusBody>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let (contact, id) = address_path(path);
    state
        .directory
        .delete_address(credential.as_deref(), contact, id)
        .await?;
    Ok(web::Json(StatusBody::ok()))
}
