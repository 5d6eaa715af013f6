// src/model/mapper.rs
//! Assembles domain objects from wire documents.

use super::sealed::Sealed;
use super::{
    wire, Block, Database, DatabaseProperty, Page, PageProperty, Properties, Property,
};
use crate::api::Transport;
use crate::error::{NotionError, Result};
use crate::types::{runs_from_wire, FileRef, Icon, Parent, PropertyKind, User};
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Builds [`Database`], [`Page`] and [`Block`] values, handing each object
/// the transport it should use for lazy operations.
#[derive(Clone, Default)]
pub struct Mapper {
    transport: Option<Arc<dyn Transport>>,
}

/// Fields shared by databases and pages.
struct Common {
    id: String,
    created_time: DateTime<Utc>,
    last_edited_time: DateTime<Utc>,
    created_by: Option<User>,
    last_edited_by: Option<User>,
    icon: Option<Icon>,
    cover: Option<FileRef>,
    parent: Parent,
    url: Option<String>,
    archived: bool,
}

impl Common {
    fn from_wire(w: &Value) -> Result<Self> {
        let user = |key: &str| wire::non_null(w, key).map(User::from_wire).transpose();

        Ok(Self {
            id: wire::str_field(w, "id")?.to_string(),
            created_time: wire::timestamp_field(w, "created_time")?,
            last_edited_time: wire::timestamp_field(w, "last_edited_time")?,
            created_by: user("created_by")?,
            last_edited_by: user("last_edited_by")?,
            icon: wire::non_null(w, "icon").map(Icon::from_wire).transpose()?,
            cover: wire::non_null(w, "cover")
                .map(FileRef::from_wire)
                .transpose()?,
            parent: Parent::from_wire(wire::field(w, "parent")?)?,
            url: wire::opt_str(w, "url"),
            archived: wire::bool_or(w, "archived", false),
        })
    }
}

fn properties_of(w: &Value) -> Result<&Map<String, Value>> {
    wire::field(w, "properties")?
        .as_object()
        .ok_or_else(|| NotionError::MalformedResponse("key `properties` is not an object".into()))
}

impl Mapper {
    /// A mapper whose objects have no transport attached.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport: Some(transport),
        }
    }

    pub fn map_to_database(&self, w: &Value) -> Result<Database> {
        let common = Common::from_wire(w)?;

        let mut properties = Properties::new();
        for (key, raw) in properties_of(w)? {
            let mut prop = DatabaseProperty::from_wire(raw)?;
            if prop.name().is_empty() {
                prop.set_name(key.clone());
            }
            properties.add(prop)?;
        }

        let original_ids = properties.id_set();
        let database = Database {
            id: common.id,
            rich_title: runs_from_wire(wire::array_field(w, "title")?)?,
            rich_description: runs_from_wire(wire::array_or_empty(w, "description"))?,
            properties,
            icon: common.icon,
            cover: common.cover,
            parent: Some(common.parent),
            url: common.url,
            archived: common.archived,
            is_inline: wire::bool_or(w, "is_inline", false),
            created_time: Some(common.created_time),
            last_edited_time: Some(common.last_edited_time),
            created_by: common.created_by,
            last_edited_by: common.last_edited_by,
            original_ids,
            transport: self.transport.clone(),
        };

        log::debug!(
            "Mapped database {} with {} properties",
            database.id,
            database.properties.len()
        );
        Ok(database)
    }

    /// Maps a page. Page reads carry no property names, so names are taken
    /// from `owner`'s schema by id; without an owner they stay empty.
    pub fn map_to_page(&self, w: &Value, owner: Option<&Database>) -> Result<Page> {
        let common = Common::from_wire(w)?;

        let mut properties = Properties::new();
        for raw in properties_of(w)?.values() {
            let mut prop = PageProperty::from_wire(raw)?;
            if let Some(column) = owner.and_then(|db| db.properties.get_by_id(prop.id())) {
                prop.set_name(column.name().to_string());
            }
            properties.add(prop)?;
        }

        let rich_title = match properties.iter().find(|p| p.kind() == PropertyKind::Title) {
            Some(title) => title.runs().map(|runs| runs.to_vec()).unwrap_or_default(),
            None => {
                log::warn!("Page {} has no title property", common.id);
                Vec::new()
            }
        };

        let original_ids = properties.id_set();
        Ok(Page {
            id: common.id,
            rich_title,
            properties,
            icon: common.icon,
            cover: common.cover,
            parent: Some(common.parent),
            url: common.url,
            archived: common.archived,
            created_time: Some(common.created_time),
            last_edited_time: Some(common.last_edited_time),
            created_by: common.created_by,
            last_edited_by: common.last_edited_by,
            original_ids,
            transport: self.transport.clone(),
        })
    }

    pub fn map_to_block(&self, w: &Value) -> Result<Block> {
        let block = Block::from_wire(w)?;
        log::debug!("Mapped {} block {}", block.kind, block.id);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{PropertyValue, SchemaConfig};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn database_wire() -> Value {
        json!({
            "object": "database",
            "id": "d1",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-03-02T08:00:00.000Z",
            "title": [{"type": "text", "text": {"content": "Tasks"}, "plain_text": "Tasks"}],
            "description": [],
            "icon": {"type": "emoji", "emoji": "✅"},
            "cover": null,
            "parent": {"type": "page_id", "page_id": "p0"},
            "url": "https://www.notion.so/d1",
            "archived": false,
            "is_inline": true,
            "properties": {
                "Name": {"id": "title", "name": "Name", "type": "title", "title": {}},
                "Email": {"id": "7", "name": "Email", "type": "email", "email": {}}
            }
        })
    }

    fn page_wire() -> Value {
        json!({
            "object": "page",
            "id": "p1",
            "created_time": "2022-03-01T19:05:00.000Z",
            "last_edited_time": "2022-03-01T19:05:00.000Z",
            "parent": {"type": "database_id", "database_id": "d1"},
            "archived": false,
            "properties": {
                "Email": {"id": "7", "type": "email", "email": "a@example.com"},
                "Name": {"id": "title", "type": "title", "title": [
                    {"type": "text", "text": {"content": "Hello"}, "plain_text": "Hello"},
                    {"type": "text", "text": {"content": " world"}, "plain_text": " world"}
                ]}
            }
        })
    }

    #[test]
    fn test_map_database() {
        let db = Mapper::new().map_to_database(&database_wire()).unwrap();
        assert_eq!(db.title(), "Tasks");
        assert!(db.is_inline);
        assert_eq!(db.parent, Some(Parent::Page("p0".into())));
        assert_eq!(db.properties.names(), vec!["Name", "Email"]);
        assert_eq!(db.properties.get("7").unwrap().config, SchemaConfig::Email);
        assert_eq!(db.original_property_ids().len(), 2);
        assert!(!db.has_transport());
    }

    #[test]
    fn test_map_page_recovers_names_from_owner() {
        let mapper = Mapper::new();
        let db = mapper.map_to_database(&database_wire()).unwrap();
        let page = mapper.map_to_page(&page_wire(), Some(&db)).unwrap();

        assert_eq!(page.title(), "Hello world");
        assert_eq!(
            page.properties.get("Email").unwrap().value,
            PropertyValue::Email(Some("a@example.com".into()))
        );
        assert_eq!(page.database_id(), Some("d1"));
    }

    #[test]
    fn test_map_page_without_owner_leaves_names_empty() {
        let page = Mapper::new().map_to_page(&page_wire(), None).unwrap();
        assert!(page.properties.names().is_empty());
        assert_eq!(page.properties.get("title").unwrap().kind(), PropertyKind::Title);
        assert_eq!(page.title(), "Hello world");
    }

    #[test]
    fn test_missing_parent_is_reported() {
        let mut wire = database_wire();
        wire.as_object_mut().unwrap().remove("parent");
        let err = Mapper::new().map_to_database(&wire).unwrap_err();
        assert!(err.to_string().contains("parent"));
    }
}
