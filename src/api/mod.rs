// src/api/mod.rs
//! Notion API interaction.
//!
//! The codec never talks HTTP itself. It consumes the raw documents a
//! [`Transport`] returns and hands back the payloads it should send.

pub mod client;
mod notion;
mod pagination;
pub mod query;
mod responses;

use crate::error::Result;
use serde_json::Value;

/// The ability to exchange raw documents with a Notion workspace.
///
/// Business logic depends on this trait, never on HTTP details. Ids are
/// passed through as given; implementations decide how to normalize them.
pub trait Transport: Send + Sync {
    fn retrieve_database(&self, id: &str) -> Result<Value>;
    fn create_database(&self, payload: &Value) -> Result<Value>;
    fn update_database(&self, id: &str, payload: &Value) -> Result<Value>;

    /// Returns one page of query results: `{"results", "next_cursor", "has_more"}`.
    fn query_database(&self, id: &str, body: &Value) -> Result<Value>;

    fn retrieve_page(&self, id: &str) -> Result<Value>;
    fn create_page(&self, payload: &Value) -> Result<Value>;
    fn update_page(&self, id: &str, payload: &Value) -> Result<Value>;

    fn retrieve_block(&self, id: &str) -> Result<Value>;
}

pub use client::HttpTransport;
pub use notion::{save_json, NotionClient};
pub use pagination::PageStream;
pub use query::{
    CheckboxCondition, Condition, DateCondition, Direction, FilesCondition, Filter,
    FormulaCondition, MultiSelectCondition, NumberCondition, Query, SelectCondition, Sort,
    TextCondition, Timestamp,
};
pub use responses::PaginatedResponse;
