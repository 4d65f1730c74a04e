//! Wire format for failed requests.

use serde::{Deserialize, Serialize};

/// Body of every error response, shaped after RFC 7807 problem details.
/// The optional extension members the RFC allows are never filled in here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Problem type URI; this API only ever uses the default.
    #[serde(rename = "type")]
    pub error_type: String,

    /// Short summary matching the status code.
    pub title: String,

    pub status: u16,

    /// Occurrence-specific explanation, when one is worth sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorResponse {
    pub fn new(status: u16, title: &str) -> Self {
        Self {
            error_type: "about:blank".to_string(),
            title: title.to_string(),
            status,
            detail: None,
        }
    }

    pub fn detailed(status: u16, title: &str, detail: impl Into<String>) -> Self {
        Self {
            detail: Some(detail.into()),
            ..Self::new(status, title)
        }
    }
}
