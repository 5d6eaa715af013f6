// src/api/responses.rs
//! Envelope types for list responses and API errors.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Generic paginated response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T = Value> {
    #[serde(default)]
    pub object: String,
    pub results: Vec<T>,
    #[serde(default)]
    pub next_cursor: Option<String>,
    #[serde(default)]
    pub has_more: bool,
}

impl PaginatedResponse<Value> {
    /// Decodes a query response; a missing `results` list is malformed.
    pub fn from_wire(value: Value) -> crate::error::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// The body Notion sends alongside a non-success status.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_paginated_response() {
        let page = PaginatedResponse::from_wire(json!({
            "object": "list",
            "results": [{"id": "a"}, {"id": "b"}],
            "next_cursor": "cur",
            "has_more": true
        }))
        .unwrap();
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.next_cursor.as_deref(), Some("cur"));
        assert!(page.has_more);
    }

    #[test]
    fn test_missing_results_is_malformed() {
        let err = PaginatedResponse::from_wire(json!({"object": "list"})).unwrap_err();
        assert!(matches!(err, crate::NotionError::MalformedResponse(_)));
    }

    #[test]
    fn test_error_body() {
        let body: ApiErrorBody = serde_json::from_value(json!({
            "object": "error", "status": 400, "code": "validation_error", "message": "bad"
        }))
        .unwrap();
        assert_eq!(body.code, "validation_error");
    }
}
