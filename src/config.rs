// src/config.rs
use crate::constants::{
    DEFAULT_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_BACKOFF_MS,
    NOTION_API_BASE_URL, NOTION_API_VERSION, NOTION_TOKEN_ENV,
};
use crate::error::{NotionError, Result};
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Bearer token for the Notion API. Opaque; only checked to be non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(NotionError::MissingConfiguration(
                "API token cannot be empty".to_string(),
            ));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Redact everything but a short prefix.
        let prefix: String = self.0.chars().take(4).collect();
        write!(f, "{}…", prefix)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// How transfer errors (connect failures, timeouts) are retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    /// Delay before the first retry; doubled for each further attempt.
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// The delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.backoff.saturating_mul(2u32.saturating_pow(attempt))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            backoff: Duration::from_millis(DEFAULT_RETRY_BACKOFF_MS),
        }
    }
}

/// Everything the HTTP transport needs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    pub base_url: String,
    pub notion_version: String,
    pub retry: RetryPolicy,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>) -> Result<Self> {
        Ok(Self {
            api_key: ApiKey::new(token)?,
            base_url: NOTION_API_BASE_URL.to_string(),
            notion_version: NOTION_API_VERSION.to_string(),
            retry: RetryPolicy::default(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        })
    }

    /// Reads the token from the `NOTION_TOKEN` environment variable.
    pub fn from_env() -> Result<Self> {
        Self::from_token(std::env::var(NOTION_TOKEN_ENV).ok())
    }

    fn from_token(token: Option<String>) -> Result<Self> {
        let token = token.ok_or_else(|| {
            NotionError::MissingConfiguration(format!(
                "{} environment variable not set",
                NOTION_TOKEN_ENV
            ))
        })?;
        Self::new(token)
    }

    /// Resolves the configuration for a CLI run: an explicit `--token` wins
    /// over the environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self> {
        let token = cli
            .token
            .clone()
            .or_else(|| std::env::var(NOTION_TOKEN_ENV).ok());
        let mut config = Self::from_token(token)?;
        if cli.no_retry {
            config.retry = RetryPolicy::none();
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false, global = true)]
    pub verbose: bool,

    /// Save the raw JSON of the fetched object to this file
    #[arg(short, long, global = true)]
    pub save: Option<PathBuf>,

    /// Integration token (defaults to the NOTION_TOKEN environment variable)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Fail on the first transfer error instead of retrying
    #[arg(long, default_value_t = false, global = true)]
    pub no_retry: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show a database's schema
    Database {
        /// Database URL or ID
        id: String,
    },
    /// Show a page's properties
    Page {
        /// Page URL or ID
        id: String,
    },
    /// Show a single block
    Block {
        /// Block ID
        id: String,
    },
    /// List the rows of a database
    Query {
        /// Database URL or ID
        id: String,

        /// Rows fetched per request
        #[arg(long, default_value_t = 100)]
        page_size: u32,

        /// Stop after this many rows
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Command {
    pub fn target_id(&self) -> &str {
        match self {
            Command::Database { id }
            | Command::Page { id }
            | Command::Block { id }
            | Command::Query { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("secret_abcdefghijklmnop").unwrap();
        assert_eq!(key.to_string(), "secr…");
        assert!(!format!("{:?}", key).contains("abcdefgh"));
        assert!(ApiKey::new("   ").is_err());
    }

    #[test]
    fn test_missing_token() {
        assert!(matches!(
            ClientConfig::from_token(None),
            Err(NotionError::MissingConfiguration(_))
        ));
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("secret_token").unwrap();
        assert_eq!(config.base_url, NOTION_API_BASE_URL);
        assert_eq!(config.notion_version, NOTION_API_VERSION);
        assert_eq!(config.retry.max_retries, DEFAULT_MAX_RETRIES);

        let config = config.with_base_url("http://localhost:8080/v1/");
        assert_eq!(config.base_url, "http://localhost:8080/v1");
    }

    #[test]
    fn test_backoff_doubles() {
        let policy = RetryPolicy {
            max_retries: 3,
            backoff: Duration::from_millis(100),
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for(2), Duration::from_millis(400));
    }

    #[test]
    fn test_cli_parsing() {
        let cli = CommandLineInput::parse_from([
            "notionmap", "-v", "query", "abc", "--page-size", "10", "--token", "secret_x",
        ]);
        assert!(cli.verbose);
        assert_eq!(cli.command.target_id(), "abc");
        assert!(matches!(cli.command, Command::Query { page_size: 10, limit: None, .. }));

        let config = ClientConfig::resolve(&cli).unwrap();
        assert_eq!(config.api_key.as_str(), "secret_x");
    }
}
