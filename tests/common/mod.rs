// tests/common/mod.rs
//! Shared fixtures and an in-memory transport for integration tests.
#![allow(dead_code)]

use notionmap::{NotionError, Result, Transport};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

pub const DATABASE_ID: &str = "d9824bdc-8445-4327-be8b-5b47500af6ce";
pub const PAGE_ID: &str = "59833787-2cf9-4fdf-8782-e53db20768a5";

pub fn database_json() -> Value {
    serde_json::from_str(include_str!("../fixtures/database.json"))
        .expect("database fixture is valid JSON")
}

pub fn page_json() -> Value {
    serde_json::from_str(include_str!("../fixtures/page.json")).expect("page fixture is valid JSON")
}

pub fn block_json() -> Value {
    serde_json::from_str(include_str!("../fixtures/block.json"))
        .expect("block fixture is valid JSON")
}

/// One call made against the transport: operation, target id, body.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub operation: &'static str,
    pub id: Option<String>,
    pub body: Option<Value>,
}

/// Records every call and answers with queued responses, in order.
///
/// Database and page retrievals fall back to the fixtures when nothing is
/// queued.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    responses: Mutex<VecDeque<Result<Value>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(&self, response: Value) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    pub fn fail_with(&self, error: NotionError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, operation: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.operation == operation)
            .collect()
    }

    fn record(
        &self,
        operation: &'static str,
        id: Option<&str>,
        body: Option<&Value>,
        fallback: impl FnOnce() -> Value,
    ) -> Result<Value> {
        self.calls.lock().unwrap().push(Call {
            operation,
            id: id.map(str::to_string),
            body: body.cloned(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(response) => response,
            None => Ok(fallback()),
        }
    }
}

impl Transport for RecordingTransport {
    fn retrieve_database(&self, id: &str) -> Result<Value> {
        self.record("retrieve_database", Some(id), None, database_json)
    }

    fn create_database(&self, payload: &Value) -> Result<Value> {
        self.record("create_database", None, Some(payload), database_json)
    }

    fn update_database(&self, id: &str, payload: &Value) -> Result<Value> {
        self.record("update_database", Some(id), Some(payload), database_json)
    }

    fn query_database(&self, id: &str, body: &Value) -> Result<Value> {
        self.record("query_database", Some(id), Some(body), || {
            serde_json::json!({"object": "list", "results": [], "next_cursor": null, "has_more": false})
        })
    }

    fn retrieve_page(&self, id: &str) -> Result<Value> {
        self.record("retrieve_page", Some(id), None, page_json)
    }

    fn create_page(&self, payload: &Value) -> Result<Value> {
        self.record("create_page", None, Some(payload), page_json)
    }

    fn update_page(&self, id: &str, payload: &Value) -> Result<Value> {
        self.record("update_page", Some(id), Some(payload), page_json)
    }

    fn retrieve_block(&self, id: &str) -> Result<Value> {
        self.record("retrieve_block", Some(id), None, block_json)
    }
}
