// src/model/registry.rs
//! Type-tag dispatch tables.
//!
//! A table maps the wire `type` string to a decoder function. Tables are
//! built once (see the `Lazy` statics next to each decoder set) and never
//! mutated afterwards. Every table carries a fallback decoder, so an unknown
//! tag always decodes to the caller's `Unsupported` variant instead of
//! failing.

use super::wire;
use crate::error::{NotionError, Result};
use serde_json::Value;
use std::collections::HashMap;

/// Decodes one wire object into `T`.
pub type Decoder<T> = fn(&Value) -> Result<T>;

pub struct DispatchTable<T: 'static> {
    entries: HashMap<&'static str, Decoder<T>>,
    fallback: Decoder<T>,
}

impl<T: 'static> DispatchTable<T> {
    pub fn new(fallback: Decoder<T>) -> Self {
        Self {
            entries: HashMap::new(),
            fallback,
        }
    }

    pub fn with(mut self, tag: &'static str, decoder: Decoder<T>) -> Self {
        self.entries.insert(tag, decoder);
        self
    }

    /// Returns the decoder registered for `tag`, or the fallback.
    pub fn decoder_for(&self, tag: &str) -> Decoder<T> {
        self.entries.get(tag).copied().unwrap_or(self.fallback)
    }

    pub fn is_registered(&self, tag: &str) -> bool {
        self.entries.contains_key(tag)
    }

    /// Reads `wire["type"]` and runs the matching decoder.
    ///
    /// Write payloads carry no `type`; for those the tag is the first key
    /// that has a registered decoder.
    pub fn decode(&self, wire: &Value) -> Result<T> {
        let tag = match wire.get("type") {
            Some(_) => wire::type_tag(wire)?,
            None => self.untagged_kind(wire)?,
        };
        if !self.is_registered(tag) {
            log::debug!("No decoder for type '{}', using fallback", tag);
        }
        (self.decoder_for(tag))(wire)
    }

    fn untagged_kind<'a>(&self, wire: &'a Value) -> Result<&'a str> {
        wire.as_object()
            .and_then(|obj| obj.keys().find(|k| self.is_registered(k)))
            .map(String::as_str)
            .ok_or_else(|| NotionError::MalformedResponse("missing key `type`".to_string()))
    }
}
