//! Contact handlers.
//!
//! ```text
//! POST   /api/contacts
//! GET    /api/contacts?page=1&name=eko&email=&phone=
//! GET    /api/contacts/{contactId}
//! PUT    /api/contacts/{contactId}
//! DELETE /api/contacts/{contactId}
//! ```

use actix_web::{delete, get, post, put, web};
use pagination::Page;

use crate::domain::{Contact, ContactId, ContactPayload, ContactQuery, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Credential, admit};
use crate::inbound::http::schemas::{ContactPageSchema, StatusBody};
use crate::inbound::http::state::HttpState;

/// Create a contact owned by the caller.
#[utoipa::path(
    post,
    path = "/api/contacts",
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Contact created", body = Contact),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "createContact"
)]
#[post("/contacts")]
pub async fn create_contact(
    state: web::Data<HttpState>,
    credential: Credential,
    payload: Result<web::Json<ContactPayload>, actix_web::Error>,
) -> ApiResult<web::Json<Contact>> {
    let payload = admit(state.accounts.as_ref(), &credential, payload).await?;
    let contact = state
        .directory
        .create_contact(credential.as_deref(), payload.into_inner())
        .await?;
    Ok(web::Json(contact))
}

/// Search the caller's contacts, ten per page.
#[utoipa::path(
    get,
    path = "/api/contacts",
    params(ContactQuery),
    responses(
        (status = 200, description = "Matching contacts", body = ContactPageSchema),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "searchContacts"
)]
#[get("/contacts")]
pub async fn search_contacts(
    state: web::Data<HttpState>,
    credential: Credential,
    query: Result<web::Query<ContactQuery>, actix_web::Error>,
) -> ApiResult<web::Json<Page<Contact>>> {
    let query = admit(state.accounts.as_ref(), &credential, query).await?;
    let page = state
        .directory
        .list_contacts(credential.as_deref(), query.into_inner())
        .await?;
    Ok(web::Json(page))
}

/// Fetch one of the caller's contacts.
#[utoipa::path(
    get,
    path = "/api/contacts/{contactId}",
    params(("contactId" = i64, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact", body = Contact),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "getContact"
)]
#[get("/contacts/{contact_id}")]
pub async fn get_contact(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<i64>, actix_web::Error>,
) -> ApiResult<web::Json<Contact>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let id = ContactId::new(path.into_inner());
    let contact = state
        .directory
        .get_contact(credential.as_deref(), id)
        .await?;
    Ok(web::Json(contact))
}

/// Replace the fields of one of the caller's contacts.
#[utoipa::path(
    put,
    path = "/api/contacts/{contactId}",
    params(("contactId" = i64, Path, description = "Contact identifier")),
    request_body = ContactPayload,
    responses(
        (status = 200, description = "Updated contact", body = Contact),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "updateContact"
)]
#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<i64>, actix_web::Error>,
    payload: Result<web::Json<ContactPayload>, actix_web::Error>,
) -> ApiResult<web::Json<Contact>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let payload = admit(state.accounts.as_ref(), &credential, payload).await?;
    let id = ContactId::new(path.into_inner());
    let contact = state
        .directory
        .update_contact(credential.as_deref(), id, payload.into_inner())
        .await?;
    Ok(web::Json(contact))
}

/// Delete one of the caller's contacts and all of its addresses.
#[utoipa::path(
    delete,
    path = "/api/contacts/{contactId}",
    params(("contactId" = i64, Path, description = "Contact identifier")),
    responses(
        (status = 200, description = "Contact deleted", body = StatusBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Contact is not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["contacts"],
    operation_id = "deleteContact"
)]
#[delete("/contacts/{contact_id}")]
pub async fn delete_contact(
    state: web::Data<HttpState>,
    credential: Credential,
    path: Result<web::Path<i64>, actix_web::Error>,
) -> ApiResult<web::Json<StatusBody>> {
    let path = admit(state.accounts.as_ref(), &credential, path).await?;
    let id = ContactId::new(path.into_inner());
    state
        .directory
        .delete_contact(credential.as_deref(), id)
        .await?;
    Ok(web::Json(StatusBody::ok()))
}
