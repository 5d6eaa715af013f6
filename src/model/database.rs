// src/model/database.rs
//! Databases: a schema of typed columns plus title and presentation.

use super::collection::{merge_deletions, wire_key};
use super::{DatabaseProperty, KeyBy, Mapper, Properties, Property};
use crate::api::{PageStream, Query, Transport};
use crate::constants::TITLE_PROPERTY_ID;
use crate::error::{NotionError, Result};
use crate::types::{
    plain_text, runs_to_wire, FileRef, Icon, Parent, PropertyKind, RichText, User,
};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Database {
    /// Empty until the database has been created.
    pub id: String,
    pub rich_title: Vec<RichText>,
    pub rich_description: Vec<RichText>,
    pub properties: Properties<DatabaseProperty>,
    pub icon: Option<Icon>,
    pub cover: Option<FileRef>,
    pub parent: Option<Parent>,
    pub url: Option<String>,
    pub archived: bool,
    pub is_inline: bool,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub created_by: Option<User>,
    pub last_edited_by: Option<User>,
    pub(crate) original_ids: HashSet<String>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
}

impl Database {
    /// A database that has not been created yet.
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            rich_title: vec![RichText::new(title)],
            ..Default::default()
        }
    }

    pub fn title(&self) -> String {
        plain_text(&self.rich_title)
    }

    /// Replaces the title with one unstyled run.
    pub fn set_title(&mut self, title: impl AsRef<str>) {
        self.rich_title = vec![RichText::new(title)];
    }

    pub fn description(&self) -> String {
        plain_text(&self.rich_description)
    }

    pub fn set_description(&mut self, description: impl AsRef<str>) {
        self.rich_description = vec![RichText::new(description)];
    }

    /// The property ids captured when this database was loaded or last
    /// updated.
    pub fn original_property_ids(&self) -> &HashSet<String> {
        &self.original_ids
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = Some(transport);
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// The create payload, with properties keyed by name.
    pub fn serialize(&self) -> Result<Value> {
        self.serialize_keyed(KeyBy::Name)
    }

    pub fn serialize_keyed(&self, key_by: KeyBy) -> Result<Value> {
        self.payload(key_by, true).map(Value::Object)
    }

    fn payload(&self, key_by: KeyBy, with_parent: bool) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        out.insert("is_inline".into(), Value::Bool(self.is_inline));
        out.insert("archived".into(), Value::Bool(self.archived));
        out.insert(
            "properties".into(),
            Value::Object(self.properties_payload(key_by)?),
        );

        if with_parent {
            if let Some(parent) = &self.parent {
                out.insert("parent".into(), parent.to_wire()?);
            }
        }
        if let Some(icon) = &self.icon {
            out.insert("icon".into(), icon.to_wire()?);
        }
        if let Some(cover) = &self.cover {
            out.insert("cover".into(), cover.to_wire()?);
        }

        out.insert("title".into(), runs_to_wire(&self.rich_title)?);
        out.insert("description".into(), runs_to_wire(&self.rich_description)?);
        Ok(out)
    }

    /// Writable columns plus the title column, which must always be present.
    fn properties_payload(&self, key_by: KeyBy) -> Result<Map<String, Value>> {
        let mut props = self.properties.to_wire(key_by)?;

        match self.properties.iter().find(|p| p.kind() == PropertyKind::Title) {
            Some(title) => {
                let mut entry = json!({ "title": {} });
                if !title.name().is_empty() {
                    entry["name"] = Value::String(title.name().to_string());
                }
                props.insert(wire_key(title, key_by).to_string(), entry);
            }
            None => {
                let title = self.title();
                let key = if title.is_empty() {
                    TITLE_PROPERTY_ID.to_string()
                } else {
                    title
                };
                props.insert(key, json!({ "title": {} }));
            }
        }
        Ok(props)
    }

    fn persisted_id(&self, operation: &'static str) -> Result<&str> {
        if self.id.is_empty() {
            return Err(NotionError::MissingId(operation));
        }
        Ok(&self.id)
    }

    fn attached_transport(&self, operation: &'static str) -> Result<&Arc<dyn Transport>> {
        self.transport
            .as_ref()
            .ok_or(NotionError::NoTransport(operation))
    }

    /// Pushes local edits to Notion.
    ///
    /// Persisted properties are addressed by id so renames apply, removed
    /// properties are sent as `null`, and the parent is omitted because
    /// databases cannot be moved through an update.
    pub fn update(&mut self) -> Result<()> {
        let id = self.persisted_id("update")?.to_string();
        let transport = self.attached_transport("update")?.clone();

        let mut payload = self.payload(KeyBy::Id, false)?;
        let deleted = self.properties.deleted_since(&self.original_ids);
        if let Some(Value::Object(props)) = payload.get_mut("properties") {
            merge_deletions(props, deleted);
        }

        log::info!("Updating database {} ({})", id, self.title());
        transport.update_database(&id, &Value::Object(payload))?;
        self.original_ids = self.properties.id_set();
        Ok(())
    }

    /// Fetches the current state of this database as a new instance.
    pub fn refresh(&self) -> Result<Database> {
        let id = self.persisted_id("refresh")?;
        let transport = self.attached_transport("refresh")?;
        let raw = transport.retrieve_database(id)?;
        Mapper::with_transport(transport.clone()).map_to_database(&raw)
    }

    /// Replaces this instance with its freshly fetched state.
    pub fn refresh_in_place(&mut self) -> Result<()> {
        *self = self.refresh()?;
        Ok(())
    }

    /// Lazily queries the rows of this database.
    pub fn query(&self, query: Option<&Query>) -> Result<PageStream> {
        self.persisted_id("query")?;
        self.attached_transport("query")?;
        Ok(PageStream::new(
            self.clone(),
            query.cloned().unwrap_or_default(),
        ))
    }

    /// All rows, fetched `page_size` at a time.
    pub fn pages(&self, page_size: u32) -> Result<PageStream> {
        self.query(Some(&Query::new().page_size(page_size)))
    }
}

impl fmt::Debug for Database {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Database")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("properties", &self.properties.names())
            .field("parent", &self.parent)
            .field("archived", &self.archived)
            .field("is_inline", &self.is_inline)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}
