//! Shared harness for HTTP integration tests over the in-memory store.

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::test::{self as actix_test, TestRequest};
use actix_web::{App, web};
use contact_directory::Trace;
use contact_directory::domain::{AccountService, DirectoryService};
use contact_directory::inbound::http::configure_api;
use contact_directory::inbound::http::request_config::not_found;
use contact_directory::inbound::http::state::HttpState;
use contact_directory::outbound::hashing::Argon2PasswordHasher;
use contact_directory::outbound::memory::InMemoryDirectoryStore;
use serde_json::{Value, json};

/// Build handler state over a fresh in-memory store with cheap hashing.
pub fn in_memory_state() -> HttpState {
    let store = Arc::new(InMemoryDirectoryStore::new());
    let hasher = Arc::new(Argon2PasswordHasher::with_costs(8, 1, 1).expect("valid argon2 costs"));
    HttpState::new(
        Arc::new(DirectoryService::new(
            Arc::clone(&store),
            Arc::clone(&store),
            Arc::clone(&store),
        )),
        Arc::new(AccountService::new(store, hasher)),
    )
}

/// Initialise the full API service the way the server wires it.
pub async fn init_app() -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody>,
    Error = actix_web::Error,
> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(in_memory_state()))
            .wrap(Trace)
            .configure(configure_api)
            .default_service(web::to(not_found)),
    )
    .await
}

/// Send a request and decode the JSON body, if any.
pub async fn send<S, B>(app: &S, request: TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body(response).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let value = serde_json::from_slice(&body).expect("response body is JSON");
    (status, value)
}

/// Attach a bearer token to `request`.
pub fn authorised(request: TestRequest, token: &str) -> TestRequest {
    request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")))
}

/// Register `username` and log in, returning the issued token.
pub async fn register_and_login<S, B>(app: &S, username: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, _) = send(
        app,
        TestRequest::post().uri("/api/users").set_json(json!({
            "username": username,
            "password": "rahasia",
            "name": "Eko Khannedy",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "registration succeeds");

    let (status, body) = send(
        app,
        TestRequest::post()
            .uri("/api/users/login")
            .set_json(json!({ "username": username, "password": "rahasia" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "login succeeds");
    body.get("token")
        .and_then(Value::as_str)
        .expect("token issued")
        .to_owned()
}

/// Create a contact and return its JSON representation.
pub async fn create_contact<S, B>(app: &S, token: &str, payload: Value) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        authorised(TestRequest::post().uri("/api/contacts"), token).set_json(payload),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "contact creation succeeds: {body}");
    body
}

/// Identifier field of a contact or address body.
pub fn id_of(body: &Value) -> i64 {
    body.get("id").and_then(Value::as_i64).expect("numeric id")
}
