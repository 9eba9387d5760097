//! Account handlers.
//!
//! ```text
//! POST   /api/users          {"username":"khannedy","password":"rahasia","name":"Eko"}
//! POST   /api/users/login    {"username":"khannedy","password":"rahasia"}
//! GET    /api/users/current
//! PATCH  /api/users/current  {"name":"Eko Kurniawan"}
//! DELETE /api/users/logout
//! ```

use actix_web::{delete, get, patch, post, web};

use crate::domain::{Error, LoginPayload, RegisterPayload, UpdateUserPayload, UserProfile};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Credential, admit};
use crate::inbound::http::schemas::{StatusBody, TokenBody};
use crate::inbound::http::state::HttpState;

/// Register a new account.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = RegisterPayload,
    responses(
        (status = 200, description = "Account created", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "register"
)]
#[post("/users")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterPayload>,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.accounts.register(payload.into_inner()).await?;
    Ok(web::Json(profile))
}

/// Exchange a username and password for a bearer token.
#[utoipa::path(
    post,
    path = "/api/users/login",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login success", body = TokenBody),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[post("/users/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginPayload>,
) -> ApiResult<web::Json<TokenBody>> {
    let token = state.accounts.login(payload.into_inner()).await?;
    Ok(web::Json(TokenBody {
        token: token.into(),
    }))
}

/// Profile of the authenticated caller.
#[utoipa::path(
    get,
    path = "/api/users/current",
    responses(
        (status = 200, description = "Current user", body = UserProfile),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "currentUser"
)]
#[get("/users/current")]
pub async fn current_user(
    state: web::Data<HttpState>,
    credential: Credential,
) -> ApiResult<web::Json<UserProfile>> {
    let profile = state.accounts.current(credential.as_deref()).await?;
    Ok(web::Json(profile))
}

/// Change the caller's display name and/or password.
#[utoipa::path(
    patch,
    path = "/api/users/current",
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Updated user", body = UserProfile),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateCurrentUser"
)]
#[patch("/users/current")]
pub async fn update_current_user(
    state: web::Data<HttpState>,
    credential: Credential,
    payload: Result<web::Json<UpdateUserPayload>, actix_web::Error>,
) -> ApiResult<web::Json<UserProfile>> {
    let payload = admit(state.accounts.as_ref(), &credential, payload).await?;
    let profile = state
        .accounts
        .update(credential.as_deref(), payload.into_inner())
        .await?;
    Ok(web::Json(profile))
}

/// Revoke the caller's token.
#[utoipa::path(
    delete,
    path = "/api/users/logout",
    responses(
        (status = 200, description = "Logged out", body = StatusBody),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "logout"
)]
#[delete("/users/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    credential: Credential,
) -> ApiResult<web::Json<StatusBody>> {
    state.accounts.logout(credential.as_deref()).await?;
    Ok(web::Json(StatusBody::ok()))
}
