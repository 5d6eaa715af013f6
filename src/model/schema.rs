// src/model/schema.rs
//! Database properties: a column's kind and configuration.

use super::registry::DispatchTable;
use super::{sealed, wire, Property};
use crate::error::{NotionError, Result};
use crate::types::{NumberFormat, PropertyKind, SelectOption, StatusGroup};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};

/// The kind-specific configuration of a database column.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaConfig {
    Title,
    RichText,
    Number { format: NumberFormat },
    Select { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
    Date,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula { expression: String },
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    Status {
        options: Vec<SelectOption>,
        groups: Vec<StatusGroup>,
    },
    Unsupported { kind: String },
}

impl SchemaConfig {
    pub fn kind(&self) -> PropertyKind {
        match self {
            SchemaConfig::Title => PropertyKind::Title,
            SchemaConfig::RichText => PropertyKind::RichText,
            SchemaConfig::Number { .. } => PropertyKind::Number,
            SchemaConfig::Select { .. } => PropertyKind::Select,
            SchemaConfig::MultiSelect { .. } => PropertyKind::MultiSelect,
            SchemaConfig::Date => PropertyKind::Date,
            SchemaConfig::Files => PropertyKind::Files,
            SchemaConfig::Checkbox => PropertyKind::Checkbox,
            SchemaConfig::Url => PropertyKind::Url,
            SchemaConfig::Email => PropertyKind::Email,
            SchemaConfig::PhoneNumber => PropertyKind::PhoneNumber,
            SchemaConfig::Formula { .. } => PropertyKind::Formula,
            SchemaConfig::CreatedTime => PropertyKind::CreatedTime,
            SchemaConfig::CreatedBy => PropertyKind::CreatedBy,
            SchemaConfig::LastEditedTime => PropertyKind::LastEditedTime,
            SchemaConfig::LastEditedBy => PropertyKind::LastEditedBy,
            SchemaConfig::Status { .. } => PropertyKind::Status,
            SchemaConfig::Unsupported { .. } => PropertyKind::Unsupported,
        }
    }

    /// The wire tag, which for unknown kinds is whatever the server sent.
    pub fn wire_type(&self) -> &str {
        match self {
            SchemaConfig::Unsupported { kind } => kind,
            other => other.kind().as_str(),
        }
    }

    /// The configuration object written under the wire tag.
    fn to_wire(&self) -> Result<Value> {
        match self {
            SchemaConfig::Number { format } => {
                if *format == NumberFormat::Unsupported {
                    return Err(NotionError::Unsupported(
                        "number format unknown to this client".to_string(),
                    ));
                }
                Ok(json!({ "format": format.as_str() }))
            }
            SchemaConfig::Select { options } | SchemaConfig::MultiSelect { options } => {
                let options = options
                    .iter()
                    .map(SelectOption::to_wire)
                    .collect::<Result<Vec<_>>>()?;
                Ok(json!({ "options": options }))
            }
            SchemaConfig::Formula { expression } => Ok(json!({ "expression": expression })),
            SchemaConfig::RichText
            | SchemaConfig::Date
            | SchemaConfig::Files
            | SchemaConfig::Checkbox
            | SchemaConfig::Url
            | SchemaConfig::Email
            | SchemaConfig::PhoneNumber => Ok(json!({})),
            SchemaConfig::Title => Err(NotionError::Unsupported(
                "the title column is written by its database".to_string(),
            )),
            SchemaConfig::Status { .. } => Err(NotionError::Unsupported(
                "status properties cannot be created or updated".to_string(),
            )),
            SchemaConfig::CreatedTime
            | SchemaConfig::CreatedBy
            | SchemaConfig::LastEditedTime
            | SchemaConfig::LastEditedBy => Err(NotionError::Unsupported(format!(
                "`{}` is computed by the server",
                self.wire_type()
            ))),
            SchemaConfig::Unsupported { kind } => Err(NotionError::Unsupported(format!(
                "property type `{}` is not supported",
                kind
            ))),
        }
    }
}

static SCHEMA_DECODERS: Lazy<DispatchTable<SchemaConfig>> = Lazy::new(|| {
    DispatchTable::new(decode_unsupported)
        .with("title", |_| Ok(SchemaConfig::Title))
        .with("rich_text", |_| Ok(SchemaConfig::RichText))
        .with("number", decode_number)
        .with("select", |w| {
            Ok(SchemaConfig::Select {
                options: decode_options(wire::field(w, "select")?)?,
            })
        })
        .with("multi_select", |w| {
            Ok(SchemaConfig::MultiSelect {
                options: decode_options(wire::field(w, "multi_select")?)?,
            })
        })
        .with("date", |_| Ok(SchemaConfig::Date))
        .with("files", |_| Ok(SchemaConfig::Files))
        .with("checkbox", |_| Ok(SchemaConfig::Checkbox))
        .with("url", |_| Ok(SchemaConfig::Url))
        .with("email", |_| Ok(SchemaConfig::Email))
        .with("phone_number", |_| Ok(SchemaConfig::PhoneNumber))
        .with("formula", |w| {
            Ok(SchemaConfig::Formula {
                expression: wire::str_or_empty(wire::field(w, "formula")?, "expression"),
            })
        })
        .with("created_time", |_| Ok(SchemaConfig::CreatedTime))
        .with("created_by", |_| Ok(SchemaConfig::CreatedBy))
        .with("last_edited_time", |_| Ok(SchemaConfig::LastEditedTime))
        .with("last_edited_by", |_| Ok(SchemaConfig::LastEditedBy))
        .with("status", decode_status)
});

fn decode_number(w: &Value) -> Result<SchemaConfig> {
    let format = wire::field(w, "number")?
        .get("format")
        .and_then(Value::as_str)
        .map(NumberFormat::from_wire)
        .unwrap_or_default();
    Ok(SchemaConfig::Number { format })
}

fn decode_options(body: &Value) -> Result<Vec<SelectOption>> {
    wire::array_or_empty(body, "options")
        .iter()
        .map(SelectOption::from_wire)
        .collect()
}

fn decode_status(w: &Value) -> Result<SchemaConfig> {
    let body = wire::field(w, "status")?;
    let groups = wire::array_or_empty(body, "groups")
        .iter()
        .map(StatusGroup::from_wire)
        .collect::<Result<Vec<_>>>()?;
    Ok(SchemaConfig::Status {
        options: decode_options(body)?,
        groups,
    })
}

fn decode_unsupported(w: &Value) -> Result<SchemaConfig> {
    let kind = wire::type_tag(w)?;
    log::warn!("Unsupported database property type '{}'", kind);
    Ok(SchemaConfig::Unsupported {
        kind: kind.to_string(),
    })
}

/// One column of a database schema.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseProperty {
    id: String,
    name: String,
    pub config: SchemaConfig,
}

impl DatabaseProperty {
    /// A column that has not been persisted yet.
    pub fn new(name: impl Into<String>, config: SchemaConfig) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            config,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self {
            id: wire::str_or_empty(value, "id"),
            name: wire::str_or_empty(value, "name"),
            config: SCHEMA_DECODERS.decode(value)?,
        })
    }

    /// Options of a select, multi-select or status column.
    pub fn options(&self) -> &[SelectOption] {
        match &self.config {
            SchemaConfig::Select { options }
            | SchemaConfig::MultiSelect { options }
            | SchemaConfig::Status { options, .. } => options,
            _ => &[],
        }
    }
}

impl Property for DatabaseProperty {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        self.config.kind()
    }

    /// `{wire_type: {...}, "name": name}`.
    fn to_wire(&self) -> Result<Value> {
        let mut out = Map::new();
        out.insert(self.config.wire_type().to_string(), self.config.to_wire()?);
        out.insert("name".into(), Value::String(self.name.clone()));
        Ok(Value::Object(out))
    }
}

impl sealed::Sealed for DatabaseProperty {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use pretty_assertions::assert_eq;

    fn select_with_two_options() -> DatabaseProperty {
        DatabaseProperty::new(
            "Select",
            SchemaConfig::Select {
                options: vec![
                    SelectOption::new("One", Color::Blue).unwrap(),
                    SelectOption::new("Two", Color::Default).unwrap(),
                ],
            },
        )
    }

    #[test]
    fn test_select_serialization() {
        assert_eq!(
            select_with_two_options().to_wire().unwrap(),
            json!({
                "select": {"options": [
                    {"name": "One", "color": "blue"},
                    {"name": "Two", "color": "default"}
                ]},
                "name": "Select"
            })
        );
    }

    #[test]
    fn test_round_trip_supported_kinds() {
        let configs = vec![
            SchemaConfig::RichText,
            SchemaConfig::Number {
                format: NumberFormat::Euro,
            },
            select_with_two_options().config,
            SchemaConfig::MultiSelect {
                options: vec![SelectOption::new("Tag", Color::Purple).unwrap()],
            },
            SchemaConfig::Date,
            SchemaConfig::Files,
            SchemaConfig::Checkbox,
            SchemaConfig::Url,
            SchemaConfig::Email,
            SchemaConfig::PhoneNumber,
            SchemaConfig::Formula {
                expression: "prop(\"Price\") * 2".into(),
            },
        ];

        for config in configs {
            let original = DatabaseProperty::new("Column", config);
            let decoded = DatabaseProperty::from_wire(&original.to_wire().unwrap()).unwrap();
            assert_eq!(decoded, original);
        }
    }

    #[test]
    fn test_decode_reads_only_own_sub_object() {
        let prop = DatabaseProperty::from_wire(&json!({
            "id": "%3AUPp",
            "name": "Tags",
            "type": "multi_select",
            "select": {"options": [{"name": "ignored"}]},
            "multi_select": {"options": [
                {"id": "1", "name": "b", "color": "red"},
                {"id": "2", "name": "a", "color": "green"}
            ]}
        }))
        .unwrap();

        assert_eq!(prop.id(), "%3AUPp");
        let names: Vec<_> = prop.options().iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a"]);
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let prop = DatabaseProperty::from_wire(&json!({
            "id": "x", "name": "Magic", "type": "some_future_kind", "some_future_kind": {}
        }))
        .unwrap();
        assert_eq!(prop.kind(), PropertyKind::Unsupported);
        assert_eq!(prop.config.wire_type(), "some_future_kind");
        assert!(prop.to_wire().unwrap_err().is_unsupported());
    }

    #[test]
    fn test_non_writable_kinds_fail() {
        for config in [
            SchemaConfig::CreatedBy,
            SchemaConfig::CreatedTime,
            SchemaConfig::LastEditedBy,
            SchemaConfig::LastEditedTime,
            SchemaConfig::Title,
            SchemaConfig::Status {
                options: vec![],
                groups: vec![],
            },
        ] {
            let prop = DatabaseProperty::new("X", config);
            assert!(prop.to_wire().unwrap_err().is_unsupported());
        }
    }

    #[test]
    fn test_status_decodes_groups() {
        let prop = DatabaseProperty::from_wire(&json!({
            "id": "s", "name": "Status", "type": "status",
            "status": {
                "options": [{"id": "o1", "name": "Not started", "color": "default"}],
                "groups": [{"id": "g1", "name": "To-do", "color": "gray", "option_ids": ["o1"]}]
            }
        }))
        .unwrap();
        match prop.config {
            SchemaConfig::Status { options, groups } => {
                assert_eq!(options.len(), 1);
                assert_eq!(groups[0].option_ids, vec!["o1"]);
            }
            other => panic!("expected status, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_number_format_cannot_be_written() {
        let prop = DatabaseProperty::from_wire(&json!({
            "id": "n", "name": "Price", "type": "number", "number": {"format": "bitcoin"}
        }))
        .unwrap();
        assert_eq!(
            prop.config,
            SchemaConfig::Number {
                format: NumberFormat::Unsupported
            }
        );
        assert!(prop.to_wire().unwrap_err().is_unsupported());
    }
}
