// src/types/values.rs
//! Small value objects shared by schema and value properties.

use super::{Color, FileKind, FormulaKind};
use crate::constants::OPTION_LIST_SEPARATOR;
use crate::error::{NotionError, Result};
use crate::model::wire;
use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Map, Value};
use std::fmt;

/// An option of a select, multi-select or status property.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
    /// Empty until the option has been persisted.
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub color: Color,
}

impl SelectOption {
    pub fn new(name: impl Into<String>, color: Color) -> Result<Self> {
        let name = name.into();
        validate_option_name(&name)?;
        Ok(Self {
            name,
            id: String::new(),
            color,
        })
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    /// The schema form: `{"name", "color"}`.
    pub fn to_wire(&self) -> Result<Value> {
        validate_option_name(&self.name)?;
        Ok(json!({ "name": self.name, "color": self.color.as_str() }))
    }

    /// The reference form used in page values: `{"name"}`.
    pub fn to_reference(&self) -> Result<Value> {
        validate_option_name(&self.name)?;
        Ok(json!({ "name": self.name }))
    }
}

fn validate_option_name(name: &str) -> Result<()> {
    if name.contains(OPTION_LIST_SEPARATOR) {
        return Err(NotionError::Validation(format!(
            "option name `{}` must not contain `{}`",
            name, OPTION_LIST_SEPARATOR
        )));
    }
    Ok(())
}

/// A group of status options. Groups are managed by Notion and cannot be
/// written through the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusGroup {
    pub name: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub option_ids: Vec<String>,
}

impl StatusGroup {
    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_wire(&self) -> Result<Value> {
        Err(NotionError::Unsupported(
            "status groups cannot be created or updated".to_string(),
        ))
    }
}

/// A reference to a hosted or external file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRef {
    pub url: String,
    pub kind: FileKind,
    /// Only set for Notion-hosted files, whose URLs expire.
    pub expiry_time: Option<DateTime<Utc>>,
    pub name: Option<String>,
}

impl FileRef {
    pub fn external(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            kind: FileKind::External,
            expiry_time: None,
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        let tag = wire::type_tag(value)?;
        let kind = FileKind::from_wire(tag);
        let body = wire::field(value, tag)?;

        Ok(Self {
            url: wire::str_field(body, "url")?.to_string(),
            kind,
            expiry_time: wire::opt_timestamp(body, "expiry_time")?,
            name: wire::opt_str(value, "name"),
        })
    }

    pub fn to_wire(&self) -> Result<Value> {
        if self.kind == FileKind::Unsupported {
            return Err(NotionError::Unsupported(
                "file of unknown kind cannot be written".to_string(),
            ));
        }

        let tag = self.kind.as_str();
        let mut out = Map::new();
        out.insert("type".into(), Value::String(tag.to_string()));
        out.insert(tag.into(), json!({ "url": self.url }));
        if let Some(name) = &self.name {
            out.insert("name".into(), Value::String(name.clone()));
        }
        Ok(Value::Object(out))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emoji(pub String);

impl Emoji {
    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self(wire::str_field(value, "emoji")?.to_string()))
    }

    pub fn to_wire(&self) -> Value {
        json!({ "type": "emoji", "emoji": self.0 })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Icon {
    Emoji(Emoji),
    File(FileRef),
}

impl Icon {
    pub fn from_wire(value: &Value) -> Result<Self> {
        if wire::type_tag(value)? == "emoji" {
            Emoji::from_wire(value).map(Icon::Emoji)
        } else {
            FileRef::from_wire(value).map(Icon::File)
        }
    }

    pub fn to_wire(&self) -> Result<Value> {
        match self {
            Icon::Emoji(emoji) => Ok(emoji.to_wire()),
            Icon::File(file) => file.to_wire(),
        }
    }
}

/// A calendar date or a date with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotionDate {
    Date(NaiveDate),
    DateTime(DateTime<FixedOffset>),
}

impl NotionDate {
    pub fn parse(raw: &str) -> Result<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Ok(NotionDate::DateTime(dt));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(NotionDate::Date)
            .map_err(|e| NotionError::MalformedResponse(format!("invalid date `{}`: {}", raw, e)))
    }
}

impl Serialize for NotionDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NotionDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NotionDate::parse(&raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for NotionDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NotionDate::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            NotionDate::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DateValue {
    pub start: NotionDate,
    #[serde(default)]
    pub end: Option<NotionDate>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

impl DateValue {
    pub fn on(date: NaiveDate) -> Self {
        Self {
            start: NotionDate::Date(date),
            end: None,
            time_zone: None,
        }
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }

    pub fn to_wire(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserKind {
    Person,
    Bot,
    #[default]
    #[serde(other)]
    Unknown,
}

/// A workspace member or integration. Read-only.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: UserKind,
}

impl User {
    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(serde_json::from_value(value.clone())?)
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{}", name),
            None => write!(f, "User {}", self.id),
        }
    }
}

/// The computed result of a formula property.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaValue {
    String(Option<String>),
    Number(Option<f64>),
    Boolean(Option<bool>),
    Date(Option<DateValue>),
    Unsupported(String),
}

impl FormulaValue {
    pub fn from_wire(value: &Value) -> Result<Self> {
        let tag = wire::type_tag(value)?;
        Ok(match FormulaKind::from_wire(tag) {
            FormulaKind::String => FormulaValue::String(wire::opt_str(value, tag)),
            FormulaKind::Number => FormulaValue::Number(wire::opt_f64(value, tag)),
            FormulaKind::Boolean => {
                FormulaValue::Boolean(value.get(tag).and_then(Value::as_bool))
            }
            FormulaKind::Date => match wire::non_null(value, tag) {
                Some(date) => FormulaValue::Date(Some(DateValue::from_wire(date)?)),
                None => FormulaValue::Date(None),
            },
            FormulaKind::Unsupported => {
                log::warn!("Unknown formula result type '{}'", tag);
                FormulaValue::Unsupported(tag.to_string())
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_option_name_rejects_separator() {
        assert!(SelectOption::new("a,b", Color::Red).is_err());

        let sneaky = SelectOption {
            name: "x,y".into(),
            id: String::new(),
            color: Color::Default,
        };
        assert!(matches!(sneaky.to_wire(), Err(NotionError::Validation(_))));
    }

    #[test]
    fn test_option_wire_forms() {
        let option = SelectOption::from_wire(&json!({"id": "abc", "name": "One", "color": "blue"}))
            .unwrap();
        assert_eq!(option.to_wire().unwrap(), json!({"name": "One", "color": "blue"}));
        assert_eq!(option.to_reference().unwrap(), json!({"name": "One"}));
    }

    #[test]
    fn test_status_group_is_read_only() {
        let group = StatusGroup::from_wire(&json!({
            "id": "g1", "name": "To-do", "color": "gray", "option_ids": ["o1", "o2"]
        }))
        .unwrap();
        assert_eq!(group.option_ids, vec!["o1", "o2"]);
        assert!(group.to_wire().unwrap_err().is_unsupported());
    }

    #[test]
    fn test_file_wire_forms() {
        let hosted = FileRef::from_wire(&json!({
            "type": "file",
            "name": "report.pdf",
            "file": {"url": "https://s3.example.com/report.pdf",
                     "expiry_time": "2022-03-01T20:05:00.000Z"}
        }))
        .unwrap();
        assert_eq!(hosted.kind, FileKind::Hosted);
        assert!(hosted.expiry_time.is_some());

        let external = FileRef::external("https://example.com/a.png");
        assert_eq!(
            external.to_wire().unwrap(),
            json!({"type": "external", "external": {"url": "https://example.com/a.png"}})
        );
    }

    #[test]
    fn test_icon_branches_on_type() {
        let emoji = Icon::from_wire(&json!({"type": "emoji", "emoji": "🎉"})).unwrap();
        assert_eq!(emoji, Icon::Emoji(Emoji("🎉".into())));
        assert_eq!(
            emoji.to_wire().unwrap(),
            json!({"type": "emoji", "emoji": "🎉"})
        );

        let file = Icon::from_wire(&json!({"type": "external", "external": {"url": "u"}})).unwrap();
        assert!(matches!(file, Icon::File(_)));
    }

    #[test]
    fn test_date_value() {
        let date = DateValue::from_wire(&json!({
            "start": "2022-02-14", "end": null, "time_zone": null
        }))
        .unwrap();
        assert_eq!(
            date.to_wire().unwrap(),
            json!({"start": "2022-02-14", "end": null, "time_zone": null})
        );

        let timed = DateValue::from_wire(&json!({"start": "2022-02-14T10:00:00.000-04:00"}))
            .unwrap();
        assert!(matches!(timed.start, NotionDate::DateTime(_)));
    }

    #[test]
    fn test_value_objects_decode_through_serde() {
        let option = SelectOption::from_wire(&json!({"name": "Fresh"})).unwrap();
        assert_eq!(option.id, "");
        assert_eq!(option.color, Color::Default);
        assert!(matches!(
            SelectOption::from_wire(&json!({"id": "abc"})),
            Err(NotionError::MalformedResponse(_))
        ));

        let group = StatusGroup::from_wire(&json!({"name": "Done", "color": "green_background"}))
            .unwrap();
        assert_eq!(group.color, Color::GreenBackground);
        assert!(group.option_ids.is_empty());

        let bot = User::from_wire(&json!({"object": "user", "id": "u1", "type": "bot"})).unwrap();
        assert_eq!(bot.kind, UserKind::Bot);
        assert_eq!(bot.to_string(), "User u1");
        let guest = User::from_wire(&json!({"id": "u2", "type": "guest", "name": "Ann"})).unwrap();
        assert_eq!(guest.kind, UserKind::Unknown);

        let range = DateValue::from_wire(&json!({
            "start": "2022-02-14", "end": "2022-02-16T09:30:00+02:00"
        }))
        .unwrap();
        assert!(matches!(range.end, Some(NotionDate::DateTime(_))));
        assert_eq!(serde_json::to_value(&range).unwrap(), range.to_wire().unwrap());
        assert!(matches!(
            DateValue::from_wire(&json!({"start": "Feb 14"})),
            Err(NotionError::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_formula_results() {
        let v = FormulaValue::from_wire(&json!({"type": "number", "number": 42})).unwrap();
        assert_eq!(v, FormulaValue::Number(Some(42.0)));
        let v = FormulaValue::from_wire(&json!({"type": "date", "date": null})).unwrap();
        assert_eq!(v, FormulaValue::Date(None));
        let v = FormulaValue::from_wire(&json!({"type": "array", "array": []})).unwrap();
        assert_eq!(v, FormulaValue::Unsupported("array".into()));
    }
}
