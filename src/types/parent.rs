// src/types/parent.rs
//! Parent references.

use super::ParentKind;
use crate::error::{NotionError, Result};
use crate::model::registry::DispatchTable;
use crate::model::wire;
use once_cell::sync::Lazy;
use serde_json::{json, Value};

/// Where a page, database or block lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parent {
    Database(String),
    Page(String),
    /// Top level of the workspace; its wire "id" is the literal `true`.
    Workspace,
    Block(String),
    Unsupported(String),
}

static PARENTS: Lazy<DispatchTable<Parent>> = Lazy::new(|| {
    DispatchTable::new(decode_unsupported)
        .with("database_id", |w| {
            Ok(Parent::Database(wire::str_field(w, "database_id")?.to_string()))
        })
        .with("page_id", |w| {
            Ok(Parent::Page(wire::str_field(w, "page_id")?.to_string()))
        })
        .with("block_id", |w| {
            Ok(Parent::Block(wire::str_field(w, "block_id")?.to_string()))
        })
        .with("workspace", |_| Ok(Parent::Workspace))
});

fn decode_unsupported(w: &Value) -> Result<Parent> {
    let tag = wire::type_tag(w)?;
    log::warn!("Unknown parent type '{}'", tag);
    Ok(Parent::Unsupported(tag.to_string()))
}

impl Parent {
    pub fn kind(&self) -> ParentKind {
        match self {
            Parent::Database(_) => ParentKind::Database,
            Parent::Page(_) => ParentKind::Page,
            Parent::Workspace => ParentKind::Workspace,
            Parent::Block(_) => ParentKind::Block,
            Parent::Unsupported(_) => ParentKind::Unsupported,
        }
    }

    /// The parent's id, if it has a real one.
    pub fn id(&self) -> Option<&str> {
        match self {
            Parent::Database(id) | Parent::Page(id) | Parent::Block(id) => Some(id),
            Parent::Workspace | Parent::Unsupported(_) => None,
        }
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        PARENTS.decode(value)
    }

    pub fn to_wire(&self) -> Result<Value> {
        let tag = self.kind().as_str();
        match self {
            Parent::Database(id) | Parent::Page(id) | Parent::Block(id) => {
                Ok(json!({ "type": tag, tag: id }))
            }
            Parent::Workspace => Ok(json!({ "type": tag, tag: true })),
            Parent::Unsupported(kind) => Err(NotionError::Unsupported(format!(
                "parent of type `{}` cannot be written",
                kind
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_database_parent_round_trip() {
        let wire = json!({"type": "database_id", "database_id": "abc"});
        let parent = Parent::from_wire(&wire).unwrap();
        assert_eq!(parent.id(), Some("abc"));
        assert_eq!(parent.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_workspace_parent_uses_true() {
        let wire = json!({"type": "workspace", "workspace": true});
        let parent = Parent::from_wire(&wire).unwrap();
        assert_eq!(parent, Parent::Workspace);
        assert_eq!(parent.id(), None);
        assert_eq!(parent.to_wire().unwrap(), wire);
    }

    #[test]
    fn test_unknown_parent_reads_but_cannot_be_written() {
        let parent = Parent::from_wire(&json!({"type": "team_id", "team_id": "t"})).unwrap();
        assert_eq!(parent, Parent::Unsupported("team_id".into()));
        assert!(parent.to_wire().unwrap_err().is_unsupported());
    }
}
