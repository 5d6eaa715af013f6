// src/constants.rs
//! Constants that define the operational boundaries of the client.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// The `Notion-Version` header sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// Base URL of the public Notion API.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Environment variable the bearer token is read from.
pub const NOTION_TOKEN_ENV: &str = "NOTION_TOKEN";

// ---------------------------------------------------------------------------
// Transport retry policy
// ---------------------------------------------------------------------------

/// Retries attempted after a transfer error (connect failure, timeout).
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Delay before the first retry; doubled on every further attempt.
pub const DEFAULT_RETRY_BACKOFF_MS: u64 = 250;

/// Per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Codec
// ---------------------------------------------------------------------------

/// The separator the API uses when several option names travel as one
/// comma-separated string. Option names must never contain it.
pub const OPTION_LIST_SEPARATOR: char = ',';

/// Id of the title property of every database and page. It doubles as the
/// payload key for a title that has no property of its own.
pub const TITLE_PROPERTY_ID: &str = "title";

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
