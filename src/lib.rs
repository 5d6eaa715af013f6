// src/lib.rs
//! notionmap library: typed Notion databases, pages, and blocks.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `NotionError`, `NotionErrorCode`, `Result`
//! - **Configuration**: `ClientConfig`, `ApiKey`, `RetryPolicy`
//! - **Domain model**: `Database`, `Page`, `Block`, `Properties`, `Mapper`
//! - **Property codec**: `DatabaseProperty`, `SchemaConfig`, `PageProperty`, `PropertyValue`
//! - **Value objects**: `RichText`, `SelectOption`, `DateValue`, `Parent`, etc.
//! - **API client**: `Transport`, `HttpTransport`, `NotionClient`, `Query`, `PageStream`

pub mod api;
pub mod config;
pub mod constants;
mod error;
pub mod model;
pub mod types;

// --- Error Handling ---
pub use crate::error::{NotionError, NotionErrorCode, Result};

// --- Configuration ---
pub use crate::config::{ApiKey, ClientConfig, RetryPolicy};

// --- Domain Model ---
pub use crate::model::{
    Block, BlockContent, Database, DatabaseProperty, KeyBy, Mapper, NotionObject, Page,
    PageProperty, Properties, Property, PropertyValue, SchemaConfig,
};

// --- Value Objects ---
pub use crate::types::{
    normalize_id, plain_text, Color, DateValue, FileRef, Icon, NotionDate, NumberFormat, Parent,
    PropertyKind, RichText, SelectOption, StatusGroup, User,
};

// --- API Client ---
pub use crate::api::{
    save_json, HttpTransport, NotionClient, PageStream, PaginatedResponse, Query, Transport,
};
