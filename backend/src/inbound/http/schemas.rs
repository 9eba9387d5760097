//! Response bodies shared by several handlers, plus OpenAPI-only shapes.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::Contact;

/// Acknowledgement body for commands without a resource to return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct StatusBody {
    /// Always `OK`.
    #[schema(example = "OK")]
    pub status: String,
}

impl StatusBody {
    /// The `{"status":"OK"}` acknowledgement.
    pub fn ok() -> Self {
        Self {
            status: "OK".to_owned(),
        }
    }
}

/// Bearer token issued by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TokenBody {
    /// Value to send as `Authorization: Bearer <token>`.
    pub token: String,
}

/// OpenAPI shape of the paging envelope.
#[derive(ToSchema)]
#[schema(as = Paging, rename_all = "camelCase")]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PagingSchema {
    /// Current 1-based page.
    #[schema(example = 1)]
    page: u32,
    /// Number of pages in the filtered set.
    #[schema(example = 2)]
    total_page: u64,
    /// Number of contacts in the filtered set.
    #[schema(example = 15)]
    total_item: u64,
}

/// OpenAPI shape of a page of contacts.
#[derive(ToSchema)]
#[schema(as = ContactPage)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ContactPageSchema {
    items: Vec<Contact>,
    paging: PagingSchema,
}
