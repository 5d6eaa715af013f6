// src/api/client.rs
//! Blocking HTTP transport for the Notion API.
//!
//! This is a thin wrapper around `reqwest::blocking`: authentication
//! headers, endpoint paths, retry of transfer errors, and mapping of error
//! statuses. It never parses documents beyond JSON.

use super::responses::ApiErrorBody;
use super::Transport;
use crate::config::{ClientConfig, RetryPolicy};
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{NotionError, NotionErrorCode, Result};
use crate::types::normalize_id;
use reqwest::blocking::{Client, Response};
use reqwest::{header, Method};
use serde_json::Value;

/// A [`Transport`] that talks to the Notion API over HTTPS.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    retry: RetryPolicy,
}

impl HttpTransport {
    /// Creates a new HTTP client with Notion API authentication.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .default_headers(Self::create_headers(config)?)
            .timeout(config.timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            retry: config.retry,
        })
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(config: &ClientConfig) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", config.api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| {
                NotionError::MissingConfiguration(format!("Invalid API token format: {}", e))
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_str(&config.notion_version).map_err(|e| {
                NotionError::MissingConfiguration(format!("Invalid Notion version: {}", e))
            })?,
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    /// Sends one request, retrying transient failures.
    fn send(&self, method: Method, endpoint: &str, body: Option<&Value>) -> Result<Value> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let mut attempt = 0;

        loop {
            log::debug!("{} {}", method, url);
            let mut request = self.client.request(method.clone(), &url);
            if let Some(body) = body {
                request = request.json(body);
            }

            match request.send().map_err(NotionError::from).and_then(read_response) {
                Ok(value) => return Ok(value),
                Err(e) if is_transient(&e) && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for(attempt);
                    log::warn!(
                        "{} {} failed ({}); retrying in {:?} ({}/{})",
                        method,
                        url,
                        e,
                        delay,
                        attempt + 1,
                        self.retry.max_retries
                    );
                    std::thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn get(&self, endpoint: &str) -> Result<Value> {
        self.send(Method::GET, endpoint, None)
    }

    fn post(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, endpoint, Some(body))
    }

    fn patch(&self, endpoint: &str, body: &Value) -> Result<Value> {
        self.send(Method::PATCH, endpoint, Some(body))
    }
}

/// Connect failures, timeouts, and the statuses Notion marks as transient.
fn is_transient(error: &NotionError) -> bool {
    match error {
        NotionError::NetworkFailure(e) => e.is_connect() || e.is_timeout(),
        NotionError::NotionService { code, .. } => code.is_retryable(),
        _ => false,
    }
}

fn read_response(response: Response) -> Result<Value> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text()?;

    if status.is_success() {
        return Ok(serde_json::from_str(&text)?);
    }

    log::debug!("{} returned {}", url, status);
    Err(error_for_status(status.as_u16(), &text))
}

/// Maps a non-success status and its body to an error.
pub(crate) fn error_for_status(status: u16, body: &str) -> NotionError {
    let parsed: Option<ApiErrorBody> = serde_json::from_str(body).ok();
    let message = match &parsed {
        Some(b) => b.message.clone(),
        None => body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect(),
    };

    match status {
        401 => NotionError::Authentication(message),
        404 => NotionError::NotFound(message),
        400 => NotionError::Format(message),
        _ => NotionError::NotionService {
            code: parsed
                .map(|b| NotionErrorCode::from_api_response(&b.code))
                .unwrap_or_else(|| NotionErrorCode::from_http_status(status)),
            message,
            status,
        },
    }
}

impl Transport for HttpTransport {
    fn retrieve_database(&self, id: &str) -> Result<Value> {
        self.get(&format!("databases/{}", normalize_id(id)?))
    }

    fn create_database(&self, payload: &Value) -> Result<Value> {
        self.post("databases", payload)
    }

    fn update_database(&self, id: &str, payload: &Value) -> Result<Value> {
        self.patch(&format!("databases/{}", normalize_id(id)?), payload)
    }

    fn query_database(&self, id: &str, body: &Value) -> Result<Value> {
        self.post(&format!("databases/{}/query", normalize_id(id)?), body)
    }

    fn retrieve_page(&self, id: &str) -> Result<Value> {
        self.get(&format!("pages/{}", normalize_id(id)?))
    }

    fn create_page(&self, payload: &Value) -> Result<Value> {
        self.post("pages", payload)
    }

    fn update_page(&self, id: &str, payload: &Value) -> Result<Value> {
        self.patch(&format!("pages/{}", normalize_id(id)?), payload)
    }

    fn retrieve_block(&self, id: &str) -> Result<Value> {
        self.get(&format!("blocks/{}", normalize_id(id)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let body = r#"{"object":"error","status":401,"code":"unauthorized","message":"API token is invalid."}"#;
        assert!(matches!(
            error_for_status(401, body),
            NotionError::Authentication(m) if m == "API token is invalid."
        ));
        assert!(matches!(error_for_status(404, "{}"), NotionError::NotFound(_)));
        assert!(matches!(error_for_status(400, "nope"), NotionError::Format(_)));
    }

    #[test]
    fn test_other_statuses_carry_typed_code() {
        let body = r#"{"object":"error","status":429,"code":"rate_limited","message":"slow down"}"#;
        match error_for_status(429, body) {
            NotionError::NotionService { code, status, .. } => {
                assert_eq!(code, NotionErrorCode::RateLimited);
                assert_eq!(status, 429);
            }
            other => panic!("unexpected error: {:?}", other),
        }

        match error_for_status(502, "<html>bad gateway</html>") {
            NotionError::NotionService { code, message, .. } => {
                assert_eq!(code, NotionErrorCode::HttpStatus(502));
                assert_eq!(message, "<html>bad gateway</html>");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_transient_statuses_are_retried() {
        let limited = r#"{"object":"error","status":429,"code":"rate_limited","message":"slow down"}"#;
        assert!(is_transient(&error_for_status(429, limited)));
        let down = r#"{"object":"error","status":503,"code":"service_unavailable","message":"x"}"#;
        assert!(is_transient(&error_for_status(503, down)));

        let conflict = r#"{"object":"error","status":409,"code":"conflict_error","message":"x"}"#;
        assert!(!is_transient(&error_for_status(409, conflict)));
        assert!(!is_transient(&error_for_status(404, "{}")));
        assert!(!is_transient(&error_for_status(502, "bad gateway")));
    }

    #[test]
    fn test_transport_builds_from_config() {
        let config = ClientConfig::new("secret_token").unwrap();
        let transport = HttpTransport::new(&config).unwrap();
        assert_eq!(transport.base_url, config.base_url);
    }

    #[test]
    fn test_invalid_ids_fail_before_any_request() {
        let transport = HttpTransport::new(&ClientConfig::new("secret_token").unwrap()).unwrap();
        assert!(matches!(
            transport.retrieve_page("not an id"),
            Err(NotionError::Validation(_))
        ));
    }
}
