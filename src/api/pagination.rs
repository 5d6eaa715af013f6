// src/api/pagination.rs
//! Lazy pagination over database query results.

use super::{PaginatedResponse, Query};
use crate::error::{NotionError, Result};
use crate::model::{Database, Mapper, Page};
use serde_json::Value;
use std::collections::VecDeque;

/// The rows of a database query, fetched one API page at a time.
///
/// Each exhausted buffer triggers one blocking request. The stream ends when
/// the server reports no more results, or right after yielding an error.
/// It cannot be rewound; issue a new query to start over.
pub struct PageStream {
    database: Database,
    query: Query,
    mapper: Mapper,
    buffer: VecDeque<Value>,
    cursor: Option<String>,
    exhausted: bool,
    requests: usize,
}

impl PageStream {
    pub(crate) fn new(database: Database, query: Query) -> Self {
        let mapper = match &database.transport {
            Some(transport) => Mapper::with_transport(transport.clone()),
            None => Mapper::new(),
        };
        Self {
            database,
            query,
            mapper,
            buffer: VecDeque::new(),
            cursor: None,
            exhausted: false,
            requests: 0,
        }
    }

    /// How many query requests have been issued so far.
    pub fn requests(&self) -> usize {
        self.requests
    }

    fn fetch_next(&mut self) -> Result<()> {
        let transport = self
            .database
            .transport
            .as_ref()
            .ok_or(NotionError::NoTransport("query"))?;

        let body = self.query.to_wire(self.cursor.as_deref());
        log::debug!(
            "Querying database {} (cursor: {:?})",
            self.database.id,
            self.cursor
        );
        let raw = transport.query_database(&self.database.id, &body)?;
        self.requests += 1;

        let page = PaginatedResponse::from_wire(raw)?;
        self.cursor = page.next_cursor;
        self.exhausted = !page.has_more || self.cursor.is_none();
        self.buffer.extend(page.results);
        Ok(())
    }
}

impl Iterator for PageStream {
    type Item = Result<Page>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.buffer.is_empty() {
            if self.exhausted {
                return None;
            }
            if let Err(e) = self.fetch_next() {
                self.exhausted = true;
                return Some(Err(e));
            }
        }

        let raw = self.buffer.pop_front()?;
        Some(self.mapper.map_to_page(&raw, Some(&self.database)))
    }
}
