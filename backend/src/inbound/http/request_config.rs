//! Extractor configuration mapping framework rejections onto domain errors.

use actix_web::{HttpRequest, HttpResponse, web};
use serde_json::json;
use tracing::debug;

use crate::domain::Error;

/// JSON body extractor rejecting malformed bodies with `invalid_request`.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected request body");
        Error::invalid_request("request body is invalid")
            .with_details(json!({ "reason": err.to_string() }))
            .into()
    })
}

/// Query-string extractor rejecting malformed parameters with `invalid_request`.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected query string");
        Error::invalid_request("query string is invalid")
            .with_details(json!({ "reason": err.to_string() }))
            .into()
    })
}

/// Path extractor treating unparseable identifiers as unknown resources.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| {
        debug!(error = %err, "rejected path parameters");
        Error::not_found("resource is not found").into()
    })
}

/// Fallback for requests that match no route.
pub async fn not_found(req: HttpRequest) -> HttpResponse {
    debug!(path = req.path(), "no route matched");
    actix_web::ResponseError::error_response(&Error::not_found("resource is not found"))
}
