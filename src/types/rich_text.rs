// src/types/rich_text.rs
//! Styled text runs.

use super::{Color, RichTextKind};
use crate::error::{NotionError, Result};
use crate::model::wire;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
}

/// Text formatting. Missing flags read as `false` and a missing color as
/// `default`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub underline: bool,
    pub code: bool,
    pub color: Color,
}

impl Annotations {
    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// One fragment of text plus its formatting.
///
/// `plain_text` is trimmed on construction and on decode; it is private so
/// the invariant cannot be bypassed.
#[derive(Debug, Clone, PartialEq)]
pub struct RichText {
    pub kind: RichTextKind,
    plain_text: String,
    pub annotations: Annotations,
    pub href: Option<String>,
    pub link: Option<Link>,
}

impl RichText {
    /// A plain `text` run with default annotations.
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            kind: RichTextKind::Text,
            plain_text: text.as_ref().trim().to_string(),
            annotations: Annotations::default(),
            href: None,
            link: None,
        }
    }

    pub fn with_link(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.href = Some(url.clone());
        self.link = Some(Link { url });
        self
    }

    pub fn with_annotations(mut self, annotations: Annotations) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn set_plain_text(&mut self, text: impl AsRef<str>) {
        self.plain_text = text.as_ref().trim().to_string();
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        let kind = RichTextKind::from_wire(wire::type_tag(value)?);
        let link = match value.get("text").and_then(|t| wire::non_null(t, "link")) {
            Some(raw) => Some(serde_json::from_value::<Link>(raw.clone())?),
            None => None,
        };
        let annotations = match wire::non_null(value, "annotations") {
            Some(raw) => Annotations::from_wire(raw)?,
            None => Annotations::default(),
        };

        Ok(Self {
            kind,
            plain_text: Self::text_of(value)?.trim().to_string(),
            annotations,
            href: wire::opt_str(value, "href"),
            link,
        })
    }

    /// Reads carry `plain_text`; write payloads only carry `text.content`.
    fn text_of(value: &Value) -> Result<&str> {
        match value.get("plain_text") {
            Some(_) => wire::str_field(value, "plain_text"),
            None => value
                .get("text")
                .and_then(|t| t.get("content"))
                .and_then(Value::as_str)
                .ok_or_else(|| NotionError::MalformedResponse("missing key `plain_text`".into())),
        }
    }

    /// Only `text` runs can be written; mentions and equations are read-only.
    pub fn to_wire(&self) -> Result<Value> {
        if self.kind != RichTextKind::Text {
            return Err(NotionError::Unsupported(format!(
                "rich text of kind `{}` cannot be written",
                self.kind.as_str()
            )));
        }

        let mut text = Map::new();
        text.insert("content".into(), Value::String(self.plain_text.clone()));
        if let Some(link) = &self.link {
            text.insert("link".into(), serde_json::to_value(link)?);
        }

        Ok(json!({
            "type": "text",
            "text": text,
            "annotations": self.annotations.to_wire()?,
        }))
    }
}

/// Decodes a list of runs.
pub fn runs_from_wire(values: &[Value]) -> Result<Vec<RichText>> {
    values.iter().map(RichText::from_wire).collect()
}

pub fn runs_to_wire(runs: &[RichText]) -> Result<Value> {
    runs.iter()
        .map(RichText::to_wire)
        .collect::<Result<Vec<_>>>()
        .map(Value::Array)
}

/// Joins the runs' plain text with a single space.
///
/// Each run is already trimmed, so whitespace that separated adjacent runs on
/// the server is not preserved: `["Hello", ", world"]` reads back as
/// `"Hello , world"`.
pub fn plain_text(runs: &[RichText]) -> String {
    runs.iter()
        .map(RichText::plain_text)
        .collect::<Vec<_>>()
        .join(" ")
}
