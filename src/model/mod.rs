//! The object model: properties, their collection, and the domain objects
//! assembled from wire documents.

mod block;
mod collection;
mod database;
mod mapper;
mod page;
pub mod registry;
mod schema;
mod value;
pub mod wire;

pub use block::{Block, BlockContent};
pub use collection::{KeyBy, Properties};
pub use database::Database;
pub use mapper::Mapper;
pub use page::Page;
pub use schema::{DatabaseProperty, SchemaConfig};
pub use value::{PageProperty, PropertyValue};

use crate::error::Result;
use crate::types::PropertyKind;
use serde_json::Value;

mod sealed {
    /// Mutation that must go through [`super::Properties`] so its indexes
    /// stay in sync.
    pub trait Sealed {
        fn set_name(&mut self, name: String);
    }
}

/// A database column or a page value, storable in [`Properties`].
///
/// `id` and `name` are read-only here; renames go through
/// [`Properties::rename`].
pub trait Property: sealed::Sealed + Clone + std::fmt::Debug {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn kind(&self) -> PropertyKind;

    /// The write payload for this property. Server-owned and unknown kinds
    /// fail with [`crate::NotionError::Unsupported`].
    fn to_wire(&self) -> Result<Value>;
}

/// Any object that can be fetched from Notion.
#[derive(Debug, Clone)]
pub enum NotionObject {
    Page(Page),
    Database(Database),
    Block(Block),
}

impl NotionObject {
    pub fn id(&self) -> &str {
        match self {
            NotionObject::Page(page) => &page.id,
            NotionObject::Database(database) => &database.id,
            NotionObject::Block(block) => &block.id,
        }
    }

    /// Returns a human-readable display title for this object.
    pub fn display_title(&self) -> String {
        match self {
            NotionObject::Page(page) => page.title(),
            NotionObject::Database(db) => {
                let text = db.title();
                if text.is_empty() {
                    "Untitled Database".to_string()
                } else {
                    text
                }
            }
            NotionObject::Block(block) => format!("Block {}", block.id),
        }
    }
}
