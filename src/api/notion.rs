// src/api/notion.rs
//! High-level entry point tying a transport to the mapper.

use super::{HttpTransport, PageStream, Query, Transport};
use crate::config::ClientConfig;
use crate::error::{NotionError, Result};
use crate::model::{Block, Database, Mapper, Page};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Retrieves and creates Notion objects as typed values.
///
/// Retrieved databases are cached by id so page reads can recover property
/// names without refetching the schema. The cache is not synchronized.
pub struct NotionClient {
    transport: Arc<dyn Transport>,
    mapper: Mapper,
    databases: HashMap<String, Database>,
}

impl NotionClient {
    /// A client backed by the HTTP transport.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            mapper: Mapper::with_transport(transport.clone()),
            transport,
            databases: HashMap::new(),
        }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    pub fn mapper(&self) -> &Mapper {
        &self.mapper
    }

    pub fn retrieve_database_raw(&self, id: &str) -> Result<Value> {
        self.transport.retrieve_database(id)
    }

    /// Retrieves a database, serving it from the cache when `use_cached` is
    /// set and it was fetched before.
    ///
    /// The cache is keyed by `id` exactly as passed: the dashed and undashed
    /// forms of one id are separate entries, and each is fetched once.
    pub fn retrieve_database(&mut self, id: &str, use_cached: bool) -> Result<Database> {
        if use_cached {
            if let Some(database) = self.databases.get(id) {
                log::debug!("Database {} served from cache", id);
                return Ok(database.clone());
            }
        }

        let database = self.mapper.map_to_database(&self.retrieve_database_raw(id)?)?;
        self.databases.insert(id.to_string(), database.clone());
        Ok(database)
    }

    pub fn retrieve_page_raw(&self, id: &str) -> Result<Value> {
        self.transport.retrieve_page(id)
    }

    /// Retrieves a page. For database rows the owning database is looked up
    /// (through the cache) so that property names are filled in.
    pub fn retrieve_page(&mut self, id: &str) -> Result<Page> {
        let raw = self.retrieve_page_raw(id)?;
        self.page_from_wire(&raw)
    }

    /// Maps a raw page, looking up its owning database for property names.
    pub fn page_from_wire(&mut self, raw: &Value) -> Result<Page> {
        let owner = match raw
            .get("parent")
            .and_then(|p| p.get("database_id"))
            .and_then(Value::as_str)
        {
            Some(db_id) => Some(self.retrieve_database(db_id, true)?),
            None => None,
        };
        self.mapper.map_to_page(raw, owner.as_ref())
    }

    /// Creates `database` in Notion and returns the persisted result.
    pub fn create_database(&mut self, database: &Database) -> Result<Database> {
        if database.parent.is_none() {
            return Err(NotionError::Validation(
                "a database needs a parent page to be created".to_string(),
            ));
        }
        let raw = self.transport.create_database(&database.serialize()?)?;
        let created = self.mapper.map_to_database(&raw)?;
        log::info!("Created database {} ({})", created.id, created.title());
        self.databases.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    /// Creates `page` in Notion and returns the persisted result.
    pub fn create_page(&mut self, page: &Page) -> Result<Page> {
        if page.parent.is_none() {
            return Err(NotionError::Validation(
                "a page needs a parent to be created".to_string(),
            ));
        }
        let raw = self.transport.create_page(&page.serialize()?)?;
        let owner = match page.database_id() {
            Some(db_id) => Some(self.retrieve_database(db_id, true)?),
            None => None,
        };
        let created = self.mapper.map_to_page(&raw, owner.as_ref())?;
        log::info!("Created page {} ({})", created.id, created.title());
        Ok(created)
    }

    /// Lazily queries the rows of a database.
    pub fn query_database(&mut self, id: &str, query: Option<&Query>) -> Result<PageStream> {
        self.retrieve_database(id, true)?.query(query)
    }

    pub fn retrieve_block_raw(&self, id: &str) -> Result<Value> {
        self.transport.retrieve_block(id)
    }

    pub fn retrieve_block(&self, id: &str) -> Result<Block> {
        self.mapper.map_to_block(&self.retrieve_block_raw(id)?)
    }

    /// Number of databases held in the cache.
    pub fn cached_databases(&self) -> usize {
        self.databases.len()
    }

    pub fn clear_cache(&mut self) {
        self.databases.clear();
    }
}

/// Writes `value` as pretty-printed JSON.
pub fn save_json(value: &Value, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    log::debug!("Saved JSON to {}", path.display());
    Ok(())
}
