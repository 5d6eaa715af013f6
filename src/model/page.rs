// src/model/page.rs
//! Pages: one row of a database, or a standalone document.

use super::collection::{merge_deletions, wire_key};
use super::{KeyBy, Mapper, PageProperty, Properties, Property};
use crate::api::Transport;
use crate::constants::TITLE_PROPERTY_ID;
use crate::error::{NotionError, Result};
use crate::types::{plain_text, runs_to_wire, FileRef, Icon, Parent, PropertyKind, RichText, User};
use chrono::{DateTime, Utc};
use serde_json::{json, Map, Value};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct Page {
    /// Empty until the page has been created.
    pub id: String,
    /// Copied from the title property when mapped; the title property is
    /// rewritten from this on serialization.
    pub rich_title: Vec<RichText>,
    pub properties: Properties<PageProperty>,
    pub icon: Option<Icon>,
    pub cover: Option<FileRef>,
    pub parent: Option<Parent>,
    pub url: Option<String>,
    pub archived: bool,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub created_by: Option<User>,
    pub last_edited_by: Option<User>,
    pub(crate) original_ids: HashSet<String>,
    pub(crate) transport: Option<Arc<dyn Transport>>,
}

impl Page {
    pub fn new(title: impl AsRef<str>) -> Self {
        Self {
            rich_title: vec![RichText::new(title)],
            ..Default::default()
        }
    }

    /// A new row of the database with id `database_id`.
    pub fn in_database(database_id: impl Into<String>, title: impl AsRef<str>) -> Self {
        Self {
            parent: Some(Parent::Database(database_id.into())),
            ..Self::new(title)
        }
    }

    pub fn title(&self) -> String {
        plain_text(&self.rich_title)
    }

    pub fn set_title(&mut self, title: impl AsRef<str>) {
        self.rich_title = vec![RichText::new(title)];
    }

    pub fn original_property_ids(&self) -> &HashSet<String> {
        &self.original_ids
    }

    pub fn set_transport(&mut self, transport: Arc<dyn Transport>) {
        self.transport = Some(transport);
    }

    pub fn has_transport(&self) -> bool {
        self.transport.is_some()
    }

    /// The id of the owning database, if this page is a database row.
    pub fn database_id(&self) -> Option<&str> {
        match &self.parent {
            Some(Parent::Database(id)) => Some(id),
            _ => None,
        }
    }

    pub fn serialize(&self) -> Result<Value> {
        self.serialize_keyed(KeyBy::Name)
    }

    pub fn serialize_keyed(&self, key_by: KeyBy) -> Result<Value> {
        self.payload(key_by, true).map(Value::Object)
    }

    fn payload(&self, key_by: KeyBy, with_parent: bool) -> Result<Map<String, Value>> {
        let mut out = Map::new();
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
        Ok(out)
    }

    /// Writable values, with the title property carrying the current title.
    fn properties_payload(&self, key_by: KeyBy) -> Result<Map<String, Value>> {
        let mut props = self.properties.to_wire(key_by)?;
        let key = self
            .properties
            .iter()
            .find(|p| p.kind() == PropertyKind::Title)
            .map(|p| wire_key(p, key_by).to_string())
            .unwrap_or_else(|| TITLE_PROPERTY_ID.to_string());
        props.insert(key, json!({ "title": runs_to_wire(&self.rich_title)? }));
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

    /// Pushes local edits to Notion; see [`crate::model::Database::update`].
    pub fn update(&mut self) -> Result<()> {
        let id = self.persisted_id("update")?.to_string();
        let transport = self.attached_transport("update")?.clone();

        let mut payload = self.payload(KeyBy::Id, false)?;
        let deleted = self.properties.deleted_since(&self.original_ids);
        if let Some(Value::Object(props)) = payload.get_mut("properties") {
            merge_deletions(props, deleted);
        }

        log::info!("Updating page {} ({})", id, self.title());
        transport.update_page(&id, &Value::Object(payload))?;
        self.original_ids = self.properties.id_set();
        Ok(())
    }

    /// Fetches the current state of this page as a new instance. For
    /// database rows the owning database is fetched too, to recover property
    /// names.
    pub fn refresh(&self) -> Result<Page> {
        let id = self.persisted_id("refresh")?;
        let transport = self.attached_transport("refresh")?;
        let mapper = Mapper::with_transport(transport.clone());

        let raw = transport.retrieve_page(id)?;
        let owner = match self.database_id() {
            Some(db_id) => Some(mapper.map_to_database(&transport.retrieve_database(db_id)?)?),
            None => None,
        };
        mapper.map_to_page(&raw, owner.as_ref())
    }

    pub fn refresh_in_place(&mut self) -> Result<()> {
        *self = self.refresh()?;
        Ok(())
    }
}

impl fmt::Debug for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Page")
            .field("id", &self.id)
            .field("title", &self.title())
            .field("properties", &self.properties.len())
            .field("parent", &self.parent)
            .field("archived", &self.archived)
            .field("transport", &self.transport.is_some())
            .finish()
    }
}
