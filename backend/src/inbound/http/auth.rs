//! Credential extraction for protected endpoints.
//!
//! The raw `Authorization` header is handed to the domain untouched; the
//! credential resolver decides whether it names a session. Protected
//! handlers take their body, query and path extractors as `Result` and pass
//! them through [`admit`], so a rejected request is only described to a
//! caller that has already been authenticated.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest};

use crate::domain::Error;
use crate::domain::ports::UserAccounts;

/// Raw `Authorization` header value, if present and valid UTF-8.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential(Option<String>);

impl Credential {
    /// Header value as received.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl FromRequest for Credential {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let value = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        ready(Ok(Self(value)))
    }
}

/// Unwrap an extractor outcome, resolving the caller before any rejection.
///
/// Successful extractions pass straight through; the domain service resolves
/// the credential itself. A rejection is reported only once `credential`
/// names a live session, otherwise the caller sees `unauthorized`.
pub async fn admit<T>(
    accounts: &dyn UserAccounts,
    credential: &Credential,
    extracted: Result<T, actix_web::Error>,
) -> Result<T, Error> {
    let rejection = match extracted {
        Ok(value) => return Ok(value),
        Err(rejection) => rejection,
    };
    accounts.current(credential.as_deref()).await?;
    let known = rejection.as_error::<Error>().cloned();
    Err(known.unwrap_or_else(|| Error::from(rejection)))
}
