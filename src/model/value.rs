// src/model/value.rs
//! Page properties: one row's value for a column.

use super::registry::DispatchTable;
use super::{sealed, wire, Property};
use crate::error::{NotionError, Result};
use crate::types::{
    plain_text, runs_from_wire, runs_to_wire, DateValue, FileRef, FormulaValue, PropertyKind,
    RichText, SelectOption, User,
};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use serde_json::{json, Map, Value};
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Title(Vec<RichText>),
    RichText(Vec<RichText>),
    Number(Option<f64>),
    Select(Option<SelectOption>),
    MultiSelect(Vec<SelectOption>),
    Date(Option<DateValue>),
    Files(Vec<FileRef>),
    Checkbox(bool),
    Url(Option<String>),
    Email(Option<String>),
    PhoneNumber(Option<String>),
    Formula(FormulaValue),
    CreatedTime(DateTime<Utc>),
    CreatedBy(User),
    LastEditedTime(DateTime<Utc>),
    LastEditedBy(User),
    Status(Option<SelectOption>),
    Unsupported { kind: String },
}

impl PropertyValue {
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::Title(_) => PropertyKind::Title,
            PropertyValue::RichText(_) => PropertyKind::RichText,
            PropertyValue::Number(_) => PropertyKind::Number,
            PropertyValue::Select(_) => PropertyKind::Select,
            PropertyValue::MultiSelect(_) => PropertyKind::MultiSelect,
            PropertyValue::Date(_) => PropertyKind::Date,
            PropertyValue::Files(_) => PropertyKind::Files,
            PropertyValue::Checkbox(_) => PropertyKind::Checkbox,
            PropertyValue::Url(_) => PropertyKind::Url,
            PropertyValue::Email(_) => PropertyKind::Email,
            PropertyValue::PhoneNumber(_) => PropertyKind::PhoneNumber,
            PropertyValue::Formula(_) => PropertyKind::Formula,
            PropertyValue::CreatedTime(_) => PropertyKind::CreatedTime,
            PropertyValue::CreatedBy(_) => PropertyKind::CreatedBy,
            PropertyValue::LastEditedTime(_) => PropertyKind::LastEditedTime,
            PropertyValue::LastEditedBy(_) => PropertyKind::LastEditedBy,
            PropertyValue::Status(_) => PropertyKind::Status,
            PropertyValue::Unsupported { .. } => PropertyKind::Unsupported,
        }
    }

    pub fn wire_type(&self) -> &str {
        match self {
            PropertyValue::Unsupported { kind } => kind,
            other => other.kind().as_str(),
        }
    }

    fn to_wire(&self) -> Result<Value> {
        let option_ref = |option: &Option<SelectOption>| match option {
            Some(o) => o.to_reference(),
            None => Ok(Value::Null),
        };

        match self {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => runs_to_wire(runs),
            PropertyValue::Number(n) => Ok(json!(n)),
            PropertyValue::Select(o) | PropertyValue::Status(o) => option_ref(o),
            PropertyValue::MultiSelect(options) => options
                .iter()
                .map(SelectOption::to_reference)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            PropertyValue::Date(date) => match date {
                Some(date) => date.to_wire(),
                None => Ok(Value::Null),
            },
            PropertyValue::Files(files) => files
                .iter()
                .map(FileRef::to_wire)
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            PropertyValue::Checkbox(checked) => Ok(Value::Bool(*checked)),
            PropertyValue::Url(s) | PropertyValue::Email(s) | PropertyValue::PhoneNumber(s) => {
                Ok(json!(s))
            }
            PropertyValue::Formula(_) => Err(NotionError::Unsupported(
                "formula values are computed by the server".to_string(),
            )),
            PropertyValue::CreatedTime(_)
            | PropertyValue::CreatedBy(_)
            | PropertyValue::LastEditedTime(_)
            | PropertyValue::LastEditedBy(_) => Err(NotionError::Unsupported(format!(
                "`{}` is computed by the server",
                self.wire_type()
            ))),
            PropertyValue::Unsupported { kind } => Err(NotionError::Unsupported(format!(
                "property type `{}` is not supported",
                kind
            ))),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn or_empty<T: fmt::Display>(value: &Option<T>) -> String {
            value.as_ref().map(ToString::to_string).unwrap_or_default()
        }

        match self {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => {
                write!(f, "{}", plain_text(runs))
            }
            PropertyValue::Number(n) => write!(f, "{}", or_empty(n)),
            PropertyValue::Select(o) | PropertyValue::Status(o) => {
                write!(f, "{}", o.as_ref().map(|o| o.name.as_str()).unwrap_or(""))
            }
            PropertyValue::MultiSelect(options) => {
                let names: Vec<_> = options.iter().map(|o| o.name.as_str()).collect();
                write!(f, "{}", names.join(", "))
            }
            PropertyValue::Date(date) => match date {
                Some(d) => match &d.end {
                    Some(end) => write!(f, "{} → {}", d.start, end),
                    None => write!(f, "{}", d.start),
                },
                None => Ok(()),
            },
            PropertyValue::Files(files) => {
                let urls: Vec<_> = files.iter().map(|file| file.url.as_str()).collect();
                write!(f, "{}", urls.join(", "))
            }
            PropertyValue::Checkbox(checked) => write!(f, "{}", if *checked { "☑" } else { "☐" }),
            PropertyValue::Url(s) | PropertyValue::Email(s) | PropertyValue::PhoneNumber(s) => {
                write!(f, "{}", or_empty(s))
            }
            PropertyValue::Formula(value) => match value {
                FormulaValue::String(s) => write!(f, "{}", or_empty(s)),
                FormulaValue::Number(n) => write!(f, "{}", or_empty(n)),
                FormulaValue::Boolean(b) => write!(f, "{}", or_empty(b)),
                FormulaValue::Date(d) => write!(f, "{}", or_empty(&d.as_ref().map(|d| d.start))),
                FormulaValue::Unsupported(kind) => write!(f, "<{}>", kind),
            },
            PropertyValue::CreatedTime(ts) | PropertyValue::LastEditedTime(ts) => {
                write!(f, "{}", ts.to_rfc3339())
            }
            PropertyValue::CreatedBy(user) | PropertyValue::LastEditedBy(user) => {
                write!(f, "{}", user)
            }
            PropertyValue::Unsupported { kind } => write!(f, "<unsupported: {}>", kind),
        }
    }
}

static VALUE_DECODERS: Lazy<DispatchTable<PropertyValue>> = Lazy::new(|| {
    DispatchTable::new(decode_unsupported)
        .with("title", |w| {
            Ok(PropertyValue::Title(runs_from_wire(wire::array_field(w, "title")?)?))
        })
        .with("rich_text", |w| {
            Ok(PropertyValue::RichText(runs_from_wire(wire::array_field(
                w,
                "rich_text",
            )?)?))
        })
        .with("number", |w| Ok(PropertyValue::Number(wire::opt_f64(w, "number"))))
        .with("select", |w| Ok(PropertyValue::Select(decode_option(w, "select")?)))
        .with("multi_select", |w| {
            let options = wire::array_field(w, "multi_select")?
                .iter()
                .map(SelectOption::from_wire)
                .collect::<Result<Vec<_>>>()?;
            Ok(PropertyValue::MultiSelect(options))
        })
        .with("date", |w| {
            let date = wire::non_null(w, "date").map(DateValue::from_wire).transpose()?;
            Ok(PropertyValue::Date(date))
        })
        .with("files", |w| {
            let files = wire::array_field(w, "files")?
                .iter()
                .map(FileRef::from_wire)
                .collect::<Result<Vec<_>>>()?;
            Ok(PropertyValue::Files(files))
        })
        .with("checkbox", |w| {
            Ok(PropertyValue::Checkbox(wire::bool_field(w, "checkbox")?))
        })
        .with("url", |w| Ok(PropertyValue::Url(wire::opt_str(w, "url"))))
        .with("email", |w| Ok(PropertyValue::Email(wire::opt_str(w, "email"))))
        .with("phone_number", |w| {
            Ok(PropertyValue::PhoneNumber(wire::opt_str(w, "phone_number")))
        })
        .with("formula", |w| {
            Ok(PropertyValue::Formula(FormulaValue::from_wire(wire::field(
                w, "formula",
            )?)?))
        })
        .with("created_time", |w| {
            Ok(PropertyValue::CreatedTime(wire::timestamp_field(w, "created_time")?))
        })
        .with("created_by", |w| {
            Ok(PropertyValue::CreatedBy(User::from_wire(wire::field(w, "created_by")?)?))
        })
        .with("last_edited_time", |w| {
            Ok(PropertyValue::LastEditedTime(wire::timestamp_field(
                w,
                "last_edited_time",
            )?))
        })
        .with("last_edited_by", |w| {
            Ok(PropertyValue::LastEditedBy(User::from_wire(wire::field(
                w,
                "last_edited_by",
            )?)?))
        })
        .with("status", |w| Ok(PropertyValue::Status(decode_option(w, "status")?)))
});

fn decode_option(w: &Value, key: &str) -> Result<Option<SelectOption>> {
    wire::non_null(w, key).map(SelectOption::from_wire).transpose()
}

fn decode_unsupported(w: &Value) -> Result<PropertyValue> {
    let kind = wire::type_tag(w)?;
    log::warn!("Unsupported page property type '{}'", kind);
    Ok(PropertyValue::Unsupported {
        kind: kind.to_string(),
    })
}

/// One property of a page.
///
/// Page reads carry only the property id; the name is recovered from the
/// owning database's schema when the page is mapped.
#[derive(Debug, Clone, PartialEq)]
pub struct PageProperty {
    id: String,
    name: String,
    pub value: PropertyValue,
}

impl PageProperty {
    pub fn new(name: impl Into<String>, value: PropertyValue) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            value,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn from_wire(value: &Value) -> Result<Self> {
        Ok(Self {
            id: wire::str_or_empty(value, "id"),
            name: String::new(),
            value: VALUE_DECODERS.decode(value)?,
        })
    }

    /// The runs of a title or rich text property.
    pub fn runs(&self) -> Option<&[RichText]> {
        match &self.value {
            PropertyValue::Title(runs) | PropertyValue::RichText(runs) => Some(runs),
            _ => None,
        }
    }
}

impl Property for PageProperty {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn kind(&self) -> PropertyKind {
        self.value.kind()
    }

    /// `{wire_type: value}`.
    fn to_wire(&self) -> Result<Value> {
        let mut out = Map::new();
        out.insert(self.value.wire_type().to_string(), self.value.to_wire()?);
        Ok(Value::Object(out))
    }
}

impl sealed::Sealed for PageProperty {
    fn set_name(&mut self, name: String) {
        self.name = name;
    }
}
