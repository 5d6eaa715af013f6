// src/model/block.rs
//! Read-only blocks.

use super::registry::DispatchTable;
use super::wire;
use crate::error::Result;
use crate::types::{
    plain_text, runs_from_wire, BlockKind, Color, FileRef, Icon, Parent, RichText,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::Value;

/// The kind-specific content of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockContent {
    /// Paragraphs, list items, toggles, quotes and templates.
    Text { runs: Vec<RichText>, color: Color },
    Heading {
        runs: Vec<RichText>,
        color: Color,
        is_toggleable: bool,
    },
    ToDo {
        runs: Vec<RichText>,
        checked: bool,
        color: Color,
    },
    Callout {
        runs: Vec<RichText>,
        icon: Option<Icon>,
        color: Color,
    },
    Code {
        runs: Vec<RichText>,
        language: String,
        caption: Vec<RichText>,
    },
    /// Child pages and child databases.
    ChildTitle { title: String },
    /// Images, videos, files and PDFs.
    Media { file: FileRef, caption: Vec<RichText> },
    /// Bookmarks, embeds and link previews.
    Link { url: String, caption: Vec<RichText> },
    Equation { expression: String },
    /// Structural blocks whose content lives in their children.
    Empty,
    Unsupported { kind: String },
}

fn color_of(body: &Value) -> Color {
    body.get("color")
        .and_then(Value::as_str)
        .map(Color::from_wire)
        .unwrap_or_default()
}

fn runs_of(body: &Value, key: &str) -> Result<Vec<RichText>> {
    runs_from_wire(wire::array_or_empty(body, key))
}

fn text(w: &Value, tag: &str) -> Result<BlockContent> {
    let body = wire::field(w, tag)?;
    Ok(BlockContent::Text {
        runs: runs_of(body, "rich_text")?,
        color: color_of(body),
    })
}

fn heading(w: &Value, tag: &str) -> Result<BlockContent> {
    let body = wire::field(w, tag)?;
    Ok(BlockContent::Heading {
        runs: runs_of(body, "rich_text")?,
        color: color_of(body),
        is_toggleable: wire::bool_or(body, "is_toggleable", false),
    })
}

fn media(w: &Value, tag: &str) -> Result<BlockContent> {
    let body = wire::field(w, tag)?;
    Ok(BlockContent::Media {
        file: FileRef::from_wire(body)?,
        caption: runs_of(body, "caption")?,
    })
}

fn link(w: &Value, tag: &str) -> Result<BlockContent> {
    let body = wire::field(w, tag)?;
    Ok(BlockContent::Link {
        url: wire::str_or_empty(body, "url"),
        caption: runs_of(body, "caption")?,
    })
}

fn child_title(w: &Value, tag: &str) -> Result<BlockContent> {
    Ok(BlockContent::ChildTitle {
        title: wire::str_or_empty(wire::field(w, tag)?, "title"),
    })
}

fn empty(_: &Value) -> Result<BlockContent> {
    Ok(BlockContent::Empty)
}

fn unsupported(w: &Value) -> Result<BlockContent> {
    let kind = wire::type_tag(w)?;
    log::warn!("Unsupported block type '{}'", kind);
    Ok(BlockContent::Unsupported {
        kind: kind.to_string(),
    })
}

static BLOCK_DECODERS: Lazy<DispatchTable<BlockContent>> = Lazy::new(|| {
    DispatchTable::new(unsupported)
        .with("paragraph", |w| text(w, "paragraph"))
        .with("bulleted_list_item", |w| text(w, "bulleted_list_item"))
        .with("numbered_list_item", |w| text(w, "numbered_list_item"))
        .with("toggle", |w| text(w, "toggle"))
        .with("quote", |w| text(w, "quote"))
        .with("template", |w| text(w, "template"))
        .with("heading_1", |w| heading(w, "heading_1"))
        .with("heading_2", |w| heading(w, "heading_2"))
        .with("heading_3", |w| heading(w, "heading_3"))
        .with("to_do", |w| {
            let body = wire::field(w, "to_do")?;
            Ok(BlockContent::ToDo {
                runs: runs_of(body, "rich_text")?,
                checked: wire::bool_or(body, "checked", false),
                color: color_of(body),
            })
        })
        .with("callout", |w| {
            let body = wire::field(w, "callout")?;
            Ok(BlockContent::Callout {
                runs: runs_of(body, "rich_text")?,
                icon: wire::non_null(body, "icon").map(Icon::from_wire).transpose()?,
                color: color_of(body),
            })
        })
        .with("code", |w| {
            let body = wire::field(w, "code")?;
            Ok(BlockContent::Code {
                runs: runs_of(body, "rich_text")?,
                language: wire::str_or_empty(body, "language"),
                caption: runs_of(body, "caption")?,
            })
        })
        .with("child_page", |w| child_title(w, "child_page"))
        .with("child_database", |w| child_title(w, "child_database"))
        .with("image", |w| media(w, "image"))
        .with("video", |w| media(w, "video"))
        .with("file", |w| media(w, "file"))
        .with("pdf", |w| media(w, "pdf"))
        .with("bookmark", |w| link(w, "bookmark"))
        .with("embed", |w| link(w, "embed"))
        .with("link_preview", |w| link(w, "link_preview"))
        .with("equation", |w| {
            Ok(BlockContent::Equation {
                expression: wire::str_or_empty(wire::field(w, "equation")?, "expression"),
            })
        })
        .with("divider", empty)
        .with("table_of_contents", empty)
        .with("column", empty)
        .with("column_list", empty)
        .with("synced_block", empty)
        .with("link_to_page", empty)
        .with("table", empty)
        .with("table_row", empty)
});

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub parent: Option<Parent>,
    pub has_children: bool,
    pub archived: bool,
    pub created_time: Option<DateTime<Utc>>,
    pub last_edited_time: Option<DateTime<Utc>>,
    pub content: BlockContent,
}

impl Block {
    pub fn from_wire(w: &Value) -> Result<Self> {
        let parent = wire::non_null(w, "parent")
            .map(Parent::from_wire)
            .transpose()?;

        Ok(Self {
            id: wire::str_field(w, "id")?.to_string(),
            kind: BlockKind::from_wire(wire::type_tag(w)?),
            parent,
            has_children: wire::bool_or(w, "has_children", false),
            archived: wire::bool_or(w, "archived", false),
            created_time: wire::opt_timestamp(w, "created_time")?,
            last_edited_time: wire::opt_timestamp(w, "last_edited_time")?,
            content: BLOCK_DECODERS.decode(w)?,
        })
    }

    /// The block's text as one line, for display.
    pub fn plain_text(&self) -> String {
        match &self.content {
            BlockContent::Text { runs, .. }
            | BlockContent::Heading { runs, .. }
            | BlockContent::ToDo { runs, .. }
            | BlockContent::Callout { runs, .. }
            | BlockContent::Code { runs, .. } => plain_text(runs),
            BlockContent::ChildTitle { title } => title.clone(),
            BlockContent::Media { file, .. } => file.url.clone(),
            BlockContent::Link { url, .. } => url.clone(),
            BlockContent::Equation { expression } => expression.clone(),
            BlockContent::Empty | BlockContent::Unsupported { .. } => String::new(),
        }
    }
}
