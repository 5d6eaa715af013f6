// src/types/vocabulary.rs
//! Closed sets of wire discriminators and their program-level symbols.
//!
//! Every enum here is total over strings: `from_wire` never fails, and any
//! value the client does not know yet maps to the `Unsupported` sentinel so
//! new server-side kinds degrade instead of breaking reads.

use std::fmt;

/// The kind of a database or page property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    Title,
    RichText,
    Number,
    Select,
    MultiSelect,
    Date,
    Files,
    Checkbox,
    Url,
    Email,
    PhoneNumber,
    Formula,
    CreatedTime,
    CreatedBy,
    LastEditedTime,
    LastEditedBy,
    Status,
    Unsupported,
}

impl PropertyKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "title" => Self::Title,
            "rich_text" => Self::RichText,
            "number" => Self::Number,
            "select" => Self::Select,
            "multi_select" => Self::MultiSelect,
            "date" => Self::Date,
            "files" => Self::Files,
            "checkbox" => Self::Checkbox,
            "url" => Self::Url,
            "email" => Self::Email,
            "phone_number" => Self::PhoneNumber,
            "formula" => Self::Formula,
            "created_time" => Self::CreatedTime,
            "created_by" => Self::CreatedBy,
            "last_edited_time" => Self::LastEditedTime,
            "last_edited_by" => Self::LastEditedBy,
            "status" => Self::Status,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::RichText => "rich_text",
            Self::Number => "number",
            Self::Select => "select",
            Self::MultiSelect => "multi_select",
            Self::Date => "date",
            Self::Files => "files",
            Self::Checkbox => "checkbox",
            Self::Url => "url",
            Self::Email => "email",
            Self::PhoneNumber => "phone_number",
            Self::Formula => "formula",
            Self::CreatedTime => "created_time",
            Self::CreatedBy => "created_by",
            Self::LastEditedTime => "last_edited_time",
            Self::LastEditedBy => "last_edited_by",
            Self::Status => "status",
            Self::Unsupported => "unsupported",
        }
    }

    /// Kinds whose values the server computes; they are never written.
    pub fn is_server_owned(&self) -> bool {
        matches!(
            self,
            Self::CreatedTime | Self::CreatedBy | Self::LastEditedTime | Self::LastEditedBy
        )
    }
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The kind of object a page, database or block hangs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    Database,
    Page,
    Workspace,
    Block,
    Unsupported,
}

impl ParentKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "database_id" => Self::Database,
            "page_id" => Self::Page,
            "workspace" => Self::Workspace,
            "block_id" => Self::Block,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Database => "database_id",
            Self::Page => "page_id",
            Self::Workspace => "workspace",
            Self::Block => "block_id",
            Self::Unsupported => "unsupported",
        }
    }
}

/// Where a file lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// Uploaded to and served by Notion; URLs expire.
    Hosted,
    /// Hosted elsewhere and only rendered by Notion.
    External,
    Unsupported,
}

impl FileKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "file" => Self::Hosted,
            "external" => Self::External,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hosted => "file",
            Self::External => "external",
            Self::Unsupported => "unsupported",
        }
    }
}

/// The kind of a rich text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RichTextKind {
    Text,
    Mention,
    Equation,
    Unsupported,
}

impl RichTextKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "text" => Self::Text,
            "mention" => Self::Mention,
            "equation" => Self::Equation,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Mention => "mention",
            Self::Equation => "equation",
            Self::Unsupported => "unsupported",
        }
    }
}

/// The result type a formula evaluates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormulaKind {
    String,
    Number,
    Boolean,
    Date,
    Unsupported,
}

impl FormulaKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "string" => Self::String,
            "number" => Self::Number,
            "boolean" => Self::Boolean,
            "date" => Self::Date,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Date => "date",
            Self::Unsupported => "unsupported",
        }
    }
}

/// The kind of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Paragraph,
    Heading1,
    Heading2,
    Heading3,
    BulletedListItem,
    NumberedListItem,
    ToDo,
    Toggle,
    ChildPage,
    ChildDatabase,
    Embed,
    Image,
    Video,
    File,
    Pdf,
    Bookmark,
    Callout,
    Quote,
    Equation,
    Divider,
    TableOfContents,
    Column,
    ColumnList,
    LinkPreview,
    SyncedBlock,
    Template,
    LinkToPage,
    Table,
    TableRow,
    Code,
    Unsupported,
}

impl BlockKind {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "paragraph" => Self::Paragraph,
            "heading_1" => Self::Heading1,
            "heading_2" => Self::Heading2,
            "heading_3" => Self::Heading3,
            "bulleted_list_item" => Self::BulletedListItem,
            "numbered_list_item" => Self::NumberedListItem,
            "to_do" => Self::ToDo,
            "toggle" => Self::Toggle,
            "child_page" => Self::ChildPage,
            "child_database" => Self::ChildDatabase,
            "embed" => Self::Embed,
            "image" => Self::Image,
            "video" => Self::Video,
            "file" => Self::File,
            "pdf" => Self::Pdf,
            "bookmark" => Self::Bookmark,
            "callout" => Self::Callout,
            "quote" => Self::Quote,
            "equation" => Self::Equation,
            "divider" => Self::Divider,
            "table_of_contents" => Self::TableOfContents,
            "column" => Self::Column,
            "column_list" => Self::ColumnList,
            "link_preview" => Self::LinkPreview,
            "synced_block" => Self::SyncedBlock,
            "template" => Self::Template,
            "link_to_page" => Self::LinkToPage,
            "table" => Self::Table,
            "table_row" => Self::TableRow,
            "code" => Self::Code,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "paragraph",
            Self::Heading1 => "heading_1",
            Self::Heading2 => "heading_2",
            Self::Heading3 => "heading_3",
            Self::BulletedListItem => "bulleted_list_item",
            Self::NumberedListItem => "numbered_list_item",
            Self::ToDo => "to_do",
            Self::Toggle => "toggle",
            Self::ChildPage => "child_page",
            Self::ChildDatabase => "child_database",
            Self::Embed => "embed",
            Self::Image => "image",
            Self::Video => "video",
            Self::File => "file",
            Self::Pdf => "pdf",
            Self::Bookmark => "bookmark",
            Self::Callout => "callout",
            Self::Quote => "quote",
            Self::Equation => "equation",
            Self::Divider => "divider",
            Self::TableOfContents => "table_of_contents",
            Self::Column => "column",
            Self::ColumnList => "column_list",
            Self::LinkPreview => "link_preview",
            Self::SyncedBlock => "synced_block",
            Self::Template => "template",
            Self::LinkToPage => "link_to_page",
            Self::Table => "table",
            Self::TableRow => "table_row",
            Self::Code => "code",
            Self::Unsupported => "unsupported",
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a number property is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NumberFormat {
    #[default]
    Number,
    NumberWithCommas,
    Percent,
    Dollar,
    CanadianDollar,
    Euro,
    Pound,
    Yen,
    Ruble,
    Rupee,
    Won,
    Yuan,
    Real,
    Lira,
    Rupiah,
    Franc,
    HongKongDollar,
    NewZealandDollar,
    Krona,
    NorwegianKrone,
    MexicanPeso,
    Rand,
    NewTaiwanDollar,
    DanishKrone,
    Zloty,
    Baht,
    Forint,
    Koruna,
    Shekel,
    ChileanPeso,
    PhilippinePeso,
    Dirham,
    ColombianPeso,
    Riyal,
    Ringgit,
    Leu,
    ArgentinePeso,
    UruguayanPeso,
    SingaporeDollar,
    Unsupported,
}

impl NumberFormat {
    pub fn from_wire(s: &str) -> Self {
        match s {
            "number" => Self::Number,
            "number_with_commas" => Self::NumberWithCommas,
            "percent" => Self::Percent,
            "dollar" => Self::Dollar,
            "canadian_dollar" => Self::CanadianDollar,
            "euro" => Self::Euro,
            "pound" => Self::Pound,
            "yen" => Self::Yen,
            "ruble" => Self::Ruble,
            "rupee" => Self::Rupee,
            "won" => Self::Won,
            "yuan" => Self::Yuan,
            "real" => Self::Real,
            "lira" => Self::Lira,
            "rupiah" => Self::Rupiah,
            "franc" => Self::Franc,
            "hong_kong_dollar" => Self::HongKongDollar,
            "new_zealand_dollar" => Self::NewZealandDollar,
            "krona" => Self::Krona,
            "norwegian_krone" => Self::NorwegianKrone,
            "mexican_peso" => Self::MexicanPeso,
            "rand" => Self::Rand,
            "new_taiwan_dollar" => Self::NewTaiwanDollar,
            "danish_krone" => Self::DanishKrone,
            "zloty" => Self::Zloty,
            "baht" => Self::Baht,
            "forint" => Self::Forint,
            "koruna" => Self::Koruna,
            "shekel" => Self::Shekel,
            "chilean_peso" => Self::ChileanPeso,
            "philippine_peso" => Self::PhilippinePeso,
            "dirham" => Self::Dirham,
            "colombian_peso" => Self::ColombianPeso,
            "riyal" => Self::Riyal,
            "ringgit" => Self::Ringgit,
            "leu" => Self::Leu,
            "argentine_peso" => Self::ArgentinePeso,
            "uruguayan_peso" => Self::UruguayanPeso,
            "singapore_dollar" => Self::SingaporeDollar,
            _ => Self::Unsupported,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::NumberWithCommas => "number_with_commas",
            Self::Percent => "percent",
            Self::Dollar => "dollar",
            Self::CanadianDollar => "canadian_dollar",
            Self::Euro => "euro",
            Self::Pound => "pound",
            Self::Yen => "yen",
            Self::Ruble => "ruble",
            Self::Rupee => "rupee",
            Self::Won => "won",
            Self::Yuan => "yuan",
            Self::Real => "real",
            Self::Lira => "lira",
            Self::Rupiah => "rupiah",
            Self::Franc => "franc",
            Self::HongKongDollar => "hong_kong_dollar",
            Self::NewZealandDollar => "new_zealand_dollar",
            Self::Krona => "krona",
            Self::NorwegianKrone => "norwegian_krone",
            Self::MexicanPeso => "mexican_peso",
            Self::Rand => "rand",
            Self::NewTaiwanDollar => "new_taiwan_dollar",
            Self::DanishKrone => "danish_krone",
            Self::Zloty => "zloty",
            Self::Baht => "baht",
            Self::Forint => "forint",
            Self::Koruna => "koruna",
            Self::Shekel => "shekel",
            Self::ChileanPeso => "chilean_peso",
            Self::PhilippinePeso => "philippine_peso",
            Self::Dirham => "dirham",
            Self::ColombianPeso => "colombian_peso",
            Self::Riyal => "riyal",
            Self::Ringgit => "ringgit",
            Self::Leu => "leu",
            Self::ArgentinePeso => "argentine_peso",
            Self::UruguayanPeso => "uruguayan_peso",
            Self::SingaporeDollar => "singapore_dollar",
            Self::Unsupported => "unsupported",
        }
    }
}
