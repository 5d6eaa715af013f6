// src/api/query.rs
//! Database query bodies: filters, sorts and page size.

use crate::constants::NOTION_API_PAGE_SIZE;
use crate::types::NotionDate;
use serde_json::{json, Map, Value};

/// Conditions on title, rich text, url, email and phone number columns.
#[derive(Debug, Clone, PartialEq)]
pub enum TextCondition {
    Equals(String),
    DoesNotEqual(String),
    Contains(String),
    DoesNotContain(String),
    StartsWith(String),
    EndsWith(String),
    IsEmpty,
    IsNotEmpty,
}

impl TextCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Equals(s) => ("equals", json!(s)),
            Self::DoesNotEqual(s) => ("does_not_equal", json!(s)),
            Self::Contains(s) => ("contains", json!(s)),
            Self::DoesNotContain(s) => ("does_not_contain", json!(s)),
            Self::StartsWith(s) => ("starts_with", json!(s)),
            Self::EndsWith(s) => ("ends_with", json!(s)),
            Self::IsEmpty => ("is_empty", json!(true)),
            Self::IsNotEmpty => ("is_not_empty", json!(true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NumberCondition {
    Equals(f64),
    DoesNotEqual(f64),
    GreaterThan(f64),
    LessThan(f64),
    GreaterThanOrEqualTo(f64),
    LessThanOrEqualTo(f64),
    IsEmpty,
    IsNotEmpty,
}

impl NumberCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Equals(n) => ("equals", json!(n)),
            Self::DoesNotEqual(n) => ("does_not_equal", json!(n)),
            Self::GreaterThan(n) => ("greater_than", json!(n)),
            Self::LessThan(n) => ("less_than", json!(n)),
            Self::GreaterThanOrEqualTo(n) => ("greater_than_or_equal_to", json!(n)),
            Self::LessThanOrEqualTo(n) => ("less_than_or_equal_to", json!(n)),
            Self::IsEmpty => ("is_empty", json!(true)),
            Self::IsNotEmpty => ("is_not_empty", json!(true)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckboxCondition {
    Equals(bool),
    DoesNotEqual(bool),
}

impl CheckboxCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Equals(b) => ("equals", json!(b)),
            Self::DoesNotEqual(b) => ("does_not_equal", json!(b)),
        }
    }
}

/// Conditions on select and status columns, matched by option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectCondition {
    Equals(String),
    DoesNotEqual(String),
    IsEmpty,
    IsNotEmpty,
}

impl SelectCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Equals(s) => ("equals", json!(s)),
            Self::DoesNotEqual(s) => ("does_not_equal", json!(s)),
            Self::IsEmpty => ("is_empty", json!(true)),
            Self::IsNotEmpty => ("is_not_empty", json!(true)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiSelectCondition {
    Contains(String),
    DoesNotContain(String),
    IsEmpty,
    IsNotEmpty,
}

impl MultiSelectCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Contains(s) => ("contains", json!(s)),
            Self::DoesNotContain(s) => ("does_not_contain", json!(s)),
            Self::IsEmpty => ("is_empty", json!(true)),
            Self::IsNotEmpty => ("is_not_empty", json!(true)),
        }
    }
}

/// Date conditions. The relative ones (`PastWeek` … `NextYear`) take no
/// operand and are sent as an empty object.
#[derive(Debug, Clone, PartialEq)]
pub enum DateCondition {
    Equals(NotionDate),
    Before(NotionDate),
    After(NotionDate),
    OnOrBefore(NotionDate),
    OnOrAfter(NotionDate),
    PastWeek,
    PastMonth,
    PastYear,
    ThisWeek,
    NextWeek,
    NextMonth,
    NextYear,
    IsEmpty,
    IsNotEmpty,
}

impl DateCondition {
    fn operator(&self) -> (&'static str, Value) {
        match self {
            Self::Equals(d) => ("equals", json!(d.to_string())),
            Self::Before(d) => ("before", json!(d.to_string())),
            Self::After(d) => ("after", json!(d.to_string())),
            Self::OnOrBefore(d) => ("on_or_before", json!(d.to_string())),
            Self::OnOrAfter(d) => ("on_or_after", json!(d.to_string())),
            Self::PastWeek => ("past_week", json!({})),
            Self::PastMonth => ("past_month", json!({})),
            Self::PastYear => ("past_year", json!({})),
            Self::ThisWeek => ("this_week", json!({})),
            Self::NextWeek => ("next_week", json!({})),
            Self::NextMonth => ("next_month", json!({})),
            Self::NextYear => ("next_year", json!({})),
            Self::IsEmpty => ("is_empty", json!(true)),
            Self::IsNotEmpty => ("is_not_empty", json!(true)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilesCondition {
    IsEmpty,
    IsNotEmpty,
}

/// Conditions on a formula's result, by result type.
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaCondition {
    String(TextCondition),
    Checkbox(CheckboxCondition),
    Number(NumberCondition),
    Date(DateCondition),
}

/// A condition on one column, tagged with the column's kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    Title(TextCondition),
    RichText(TextCondition),
    Url(TextCondition),
    Email(TextCondition),
    PhoneNumber(TextCondition),
    Number(NumberCondition),
    Checkbox(CheckboxCondition),
    Select(SelectCondition),
    MultiSelect(MultiSelectCondition),
    Status(SelectCondition),
    Date(DateCondition),
    Files(FilesCondition),
    Formula(FormulaCondition),
}

fn single(op: (&'static str, Value)) -> Value {
    let mut out = Map::new();
    out.insert(op.0.to_string(), op.1);
    Value::Object(out)
}

impl Condition {
    fn kind(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::RichText(_) => "rich_text",
            Self::Url(_) => "url",
            Self::Email(_) => "email",
            Self::PhoneNumber(_) => "phone_number",
            Self::Number(_) => "number",
            Self::Checkbox(_) => "checkbox",
            Self::Select(_) => "select",
            Self::MultiSelect(_) => "multi_select",
            Self::Status(_) => "status",
            Self::Date(_) => "date",
            Self::Files(_) => "files",
            Self::Formula(_) => "formula",
        }
    }

    fn body(&self) -> Value {
        match self {
            Self::Title(c)
            | Self::RichText(c)
            | Self::Url(c)
            | Self::Email(c)
            | Self::PhoneNumber(c) => single(c.operator()),
            Self::Number(c) => single(c.operator()),
            Self::Checkbox(c) => single(c.operator()),
            Self::Select(c) | Self::Status(c) => single(c.operator()),
            Self::MultiSelect(c) => single(c.operator()),
            Self::Date(c) => single(c.operator()),
            Self::Files(FilesCondition::IsEmpty) => json!({ "is_empty": true }),
            Self::Files(FilesCondition::IsNotEmpty) => json!({ "is_not_empty": true }),
            Self::Formula(f) => match f {
                FormulaCondition::String(c) => json!({ "string": single(c.operator()) }),
                FormulaCondition::Checkbox(c) => json!({ "checkbox": single(c.operator()) }),
                FormulaCondition::Number(c) => json!({ "number": single(c.operator()) }),
                FormulaCondition::Date(c) => json!({ "date": single(c.operator()) }),
            },
        }
    }
}

/// A query filter: a condition on one property, or a compound of filters.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Property {
        property: String,
        condition: Condition,
    },
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    /// Filters on the property with this name or id.
    pub fn property(property: impl Into<String>, condition: Condition) -> Self {
        Filter::Property {
            property: property.into(),
            condition,
        }
    }

    pub fn to_wire(&self) -> Value {
        match self {
            Filter::Property {
                property,
                condition,
            } => {
                let mut out = Map::new();
                out.insert("property".into(), Value::String(property.clone()));
                out.insert(condition.kind().into(), condition.body());
                Value::Object(out)
            }
            Filter::And(filters) => {
                json!({ "and": filters.iter().map(Filter::to_wire).collect::<Vec<_>>() })
            }
            Filter::Or(filters) => {
                json!({ "or": filters.iter().map(Filter::to_wire).collect::<Vec<_>>() })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "ascending",
            Direction::Descending => "descending",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timestamp {
    CreatedTime,
    LastEditedTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Sort {
    Property {
        property: String,
        direction: Direction,
    },
    Timestamp {
        timestamp: Timestamp,
        direction: Direction,
    },
}

impl Sort {
    pub fn property(property: impl Into<String>, direction: Direction) -> Self {
        Sort::Property {
            property: property.into(),
            direction,
        }
    }

    pub fn to_wire(&self) -> Value {
        match self {
            Sort::Property {
                property,
                direction,
            } => json!({ "property": property, "direction": direction.as_str() }),
            Sort::Timestamp {
                timestamp,
                direction,
            } => {
                let timestamp = match timestamp {
                    Timestamp::CreatedTime => "created_time",
                    Timestamp::LastEditedTime => "last_edited_time",
                };
                json!({ "timestamp": timestamp, "direction": direction.as_str() })
            }
        }
    }
}

/// The body of a database query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Query {
    pub filter: Option<Filter>,
    pub sorts: Vec<Sort>,
    /// Results per request; the API default and maximum is 100.
    pub page_size: Option<u32>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sorts.push(sort);
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size.clamp(1, NOTION_API_PAGE_SIZE));
        self
    }

    /// The request body, continuing from `start_cursor` when given.
    pub fn to_wire(&self, start_cursor: Option<&str>) -> Value {
        let mut out = Map::new();
        if let Some(filter) = &self.filter {
            out.insert("filter".into(), filter.to_wire());
        }
        if !self.sorts.is_empty() {
            out.insert(
                "sorts".into(),
                Value::Array(self.sorts.iter().map(Sort::to_wire).collect()),
            );
        }
        if let Some(page_size) = self.page_size {
            out.insert("page_size".into(), json!(page_size));
        }
        if let Some(cursor) = start_cursor {
            out.insert("start_cursor".into(), json!(cursor));
        }
        Value::Object(out)
    }
}
