// src/error.rs
//! Error types with structured error handling.
//!
//! The codec raises only the mapping-side variants (`Unsupported`,
//! `PropertyExists`, `PropertyNotFound`, `InvalidProperty`, `Validation`,
//! `MalformedResponse`). The HTTP-side variants are produced exclusively at the
//! transport boundary.

use std::fmt;
use thiserror::Error;

/// Notion API error codes as a typed vocabulary.
///
/// Instead of matching against magic strings like `"rate_limited"`,
/// the codes the API reports in error bodies are encoded in the type system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotionErrorCode {
    /// API rate limit exceeded
    RateLimited,
    /// The requested object does not exist or is inaccessible
    ObjectNotFound,
    /// API key is invalid or expired
    Unauthorized,
    /// API key lacks permission for this resource
    RestrictedResource,
    /// Request body contains invalid JSON
    InvalidJson,
    /// Request parameters failed Notion's validation
    ValidationFailed,
    /// Conflict with current state of the resource
    Conflict,
    /// Notion internal server error
    InternalError,
    /// Notion is temporarily unavailable
    ServiceUnavailable,
    /// HTTP status code fallback when the error body is unparseable
    HttpStatus(u16),
    /// An error code this client doesn't recognize yet
    Unknown(String),
}

impl NotionErrorCode {
    /// Parse a Notion API error code string into the typed vocabulary.
    pub fn from_api_response(code: &str) -> Self {
        match code {
            "rate_limited" => Self::RateLimited,
            "object_not_found" => Self::ObjectNotFound,
            "unauthorized" => Self::Unauthorized,
            "restricted_resource" => Self::RestrictedResource,
            "invalid_json" => Self::InvalidJson,
            "validation_error" => Self::ValidationFailed,
            "conflict_error" => Self::Conflict,
            "internal_server_error" => Self::InternalError,
            "service_unavailable" => Self::ServiceUnavailable,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Create from an HTTP status code when the error body is unparseable.
    pub fn from_http_status(status: u16) -> Self {
        Self::HttpStatus(status)
    }

    /// Whether this error is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::ServiceUnavailable | Self::InternalError
        )
    }
}

impl fmt::Display for NotionErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RateLimited => write!(f, "rate_limited"),
            Self::ObjectNotFound => write!(f, "object_not_found"),
            Self::Unauthorized => write!(f, "unauthorized"),
            Self::RestrictedResource => write!(f, "restricted_resource"),
            Self::InvalidJson => write!(f, "invalid_json"),
            Self::ValidationFailed => write!(f, "validation_error"),
            Self::Conflict => write!(f, "conflict_error"),
            Self::InternalError => write!(f, "internal_server_error"),
            Self::ServiceUnavailable => write!(f, "service_unavailable"),
            Self::HttpStatus(code) => write!(f, "http_{}", code),
            Self::Unknown(code) => write!(f, "{}", code),
        }
    }
}

/// Main library error type.
#[derive(Error, Debug)]
pub enum NotionError {
    /// A kind the API (or this library) cannot write, or cannot represent.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    #[error("Property with the same id or name already exists: {0}")]
    PropertyExists(String),

    #[error("Property with name or id `{0}` was not found")]
    PropertyNotFound(String),

    #[error("Invalid property: {0}")]
    InvalidProperty(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No transport attached: cannot {0}")]
    NoTransport(&'static str),

    #[error("Missing id: cannot {0} an object that has not been persisted")]
    MissingId(&'static str),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid request format: {0}")]
    Format(String),

    #[error("Notion API returned an error ({code}): {message}")]
    NotionService {
        code: NotionErrorCode,
        message: String,
        status: u16,
    },

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error("Filesystem IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl NotionError {
    /// Whether this is the recoverable "cannot be written" failure that
    /// serializers filter out.
    pub fn is_unsupported(&self) -> bool {
        matches!(self, NotionError::Unsupported(_))
    }
}

impl From<serde_json::Error> for NotionError {
    fn from(err: serde_json::Error) -> Self {
        NotionError::MalformedResponse(err.to_string())
    }
}

/// Result type alias for convenience
pub type Result<T, E = NotionError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_vocabulary() {
        assert_eq!(
            NotionErrorCode::from_api_response("rate_limited"),
            NotionErrorCode::RateLimited
        );
        assert_eq!(
            NotionErrorCode::from_api_response("brand_new_code"),
            NotionErrorCode::Unknown("brand_new_code".to_string())
        );
        assert!(NotionErrorCode::ServiceUnavailable.is_retryable());
        assert!(!NotionErrorCode::ObjectNotFound.is_retryable());
        assert_eq!(NotionErrorCode::HttpStatus(502).to_string(), "http_502");
    }

    #[test]
    fn test_unsupported_predicate() {
        assert!(NotionError::Unsupported("status".into()).is_unsupported());
        assert!(!NotionError::PropertyNotFound("x".into()).is_unsupported());
    }
}
