// src/types/ids.rs
//! Id normalization for API endpoints.
//!
//! The codec treats ids as opaque strings. Only the transport normalizes the
//! ids it splices into request paths, so users can pass a page URL, a dashed
//! UUID or the bare 32-character hex form interchangeably.

use crate::error::{NotionError, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:^|[/-])([a-fA-F0-9]{32}|[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12})$",
    )
    .expect("id pattern is a valid regex")
});

/// Normalizes any accepted id form to the dashed, lowercase UUID form.
pub fn normalize_id(input: &str) -> Result<String> {
    let cleaned = input.trim().trim_end_matches('/');

    let candidate = if cleaned.starts_with("http://") || cleaned.starts_with("https://") {
        extract_id_from_url(cleaned)?
    } else {
        cleaned.to_string()
    };

    let hex = candidate.replace('-', "");
    if hex.len() != 32 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(NotionError::Validation(format!(
            "`{}` is not a Notion id",
            input
        )));
    }

    Ok(to_dashed(&hex.to_lowercase()))
}

/// Pulls the trailing id out of a Notion URL, ignoring query and fragment.
fn extract_id_from_url(raw: &str) -> Result<String> {
    let parsed = Url::parse(raw)
        .map_err(|e| NotionError::Validation(format!("invalid URL `{}`: {}", raw, e)))?;
    let path = parsed.path().trim_end_matches('/');

    ID_PATTERN
        .captures(path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| NotionError::Validation(format!("no Notion id found in URL `{}`", raw)))
}

fn to_dashed(hex: &str) -> String {
    format!(
        "{}-{}-{}-{}-{}",
        &hex[0..8],
        &hex[8..12],
        &hex[12..16],
        &hex[16..20],
        &hex[20..32]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const DASHED: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_accepted_forms() {
        assert_eq!(normalize_id("550e8400e29b41d4a716446655440000").unwrap(), DASHED);
        assert_eq!(normalize_id(DASHED).unwrap(), DASHED);
        assert_eq!(
            normalize_id("550E8400E29B41D4A716446655440000").unwrap(),
            DASHED
        );
    }

    #[test]
    fn test_urls() {
        assert_eq!(
            normalize_id("https://www.notion.so/acme/Tasks-550e8400e29b41d4a716446655440000?v=1")
                .unwrap(),
            DASHED
        );
        assert_eq!(
            normalize_id("https://www.notion.so/550e8400e29b41d4a716446655440000/").unwrap(),
            DASHED
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(normalize_id("").is_err());
        assert!(normalize_id("too-short").is_err());
        assert!(normalize_id("https://www.notion.so/acme/no-id-here").is_err());
    }
}
