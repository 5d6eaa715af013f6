// src/model/collection.rs
//! A property collection addressable by id and by name.

use super::{sealed::Sealed, Property};
use crate::constants::TITLE_PROPERTY_ID;
use crate::error::{NotionError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};

/// Which key properties are written under in a payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyBy {
    /// By name, falling back to id for unnamed properties.
    #[default]
    Name,
    /// By id, falling back to name for properties not persisted yet.
    Id,
}

/// Properties of one database or page.
///
/// Unique by id (when non-empty) and by name (when non-empty); iteration
/// follows insertion order. Both indexes are updated together by every
/// mutation, and every check happens before either index is touched.
#[derive(Debug, Clone)]
pub struct Properties<P> {
    slots: IndexMap<u64, P>,
    by_id: HashMap<String, u64>,
    by_name: HashMap<String, u64>,
    next_slot: u64,
}

impl<P> Default for Properties<P> {
    fn default() -> Self {
        Self {
            slots: IndexMap::new(),
            by_id: HashMap::new(),
            by_name: HashMap::new(),
            next_slot: 0,
        }
    }
}

impl<P: Property> Properties<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, prop: P) -> Result<()> {
        let (id, name) = (prop.id().to_string(), prop.name().to_string());

        if id.is_empty() && name.is_empty() {
            return Err(NotionError::InvalidProperty(
                "a property needs an id or a name".to_string(),
            ));
        }
        if !id.is_empty() && self.by_id.contains_key(&id) {
            return Err(NotionError::PropertyExists(id));
        }
        if !name.is_empty() && self.by_name.contains_key(&name) {
            return Err(NotionError::PropertyExists(name));
        }

        let slot = self.next_slot;
        self.next_slot += 1;
        if !id.is_empty() {
            self.by_id.insert(id, slot);
        }
        if !name.is_empty() {
            self.by_name.insert(name, slot);
        }
        self.slots.insert(slot, prop);
        Ok(())
    }

    /// Looks `key` up as a name first, then as an id.
    fn slot_of(&self, key: &str) -> Result<u64> {
        self.by_name
            .get(key)
            .or_else(|| self.by_id.get(key))
            .copied()
            .ok_or_else(|| NotionError::PropertyNotFound(key.to_string()))
    }

    pub fn get(&self, key: &str) -> Result<&P> {
        let slot = self.slot_of(key)?;
        self.slots
            .get(&slot)
            .ok_or_else(|| NotionError::PropertyNotFound(key.to_string()))
    }

    pub fn get_mut(&mut self, key: &str) -> Result<&mut P> {
        let slot = self.slot_of(key)?;
        self.slots
            .get_mut(&slot)
            .ok_or_else(|| NotionError::PropertyNotFound(key.to_string()))
    }

    /// Looks `id` up in the id index only.
    pub fn get_by_id(&self, id: &str) -> Option<&P> {
        self.by_id.get(id).and_then(|slot| self.slots.get(slot))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slot_of(key).is_ok()
    }

    pub fn pop(&mut self, key: &str) -> Result<P> {
        let slot = self.slot_of(key)?;
        let prop = self
            .slots
            .shift_remove(&slot)
            .ok_or_else(|| NotionError::PropertyNotFound(key.to_string()))?;
        self.by_id.remove(prop.id());
        self.by_name.remove(prop.name());
        Ok(prop)
    }

    pub fn rename(&mut self, key: &str, new_name: impl Into<String>) -> Result<()> {
        let new_name = new_name.into();
        let slot = self.slot_of(key)?;

        if let Some(&other) = self.by_name.get(&new_name) {
            if other != slot {
                return Err(NotionError::PropertyExists(new_name));
            }
        }

        let prop = self
            .slots
            .get_mut(&slot)
            .ok_or_else(|| NotionError::PropertyNotFound(key.to_string()))?;
        if new_name.is_empty() && prop.id().is_empty() {
            return Err(NotionError::InvalidProperty(
                "cannot clear the name of a property without an id".to_string(),
            ));
        }

        self.by_name.remove(prop.name());
        prop.set_name(new_name.clone());
        if !new_name.is_empty() {
            self.by_name.insert(new_name, slot);
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &P> {
        self.slots.values()
    }

    /// Non-empty ids in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.iter().map(P::id).filter(|id| !id.is_empty()).collect()
    }

    /// Non-empty names in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.iter()
            .map(P::name)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// The id set, as snapshotted for deletion tracking.
    pub fn id_set(&self) -> HashSet<String> {
        self.by_id.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Serializes every writable property, skipping the kinds that cannot be
    /// written.
    pub fn to_wire(&self, key_by: KeyBy) -> Result<Map<String, Value>> {
        let mut out = Map::new();
        for prop in self.iter() {
            match prop.to_wire() {
                Ok(value) => {
                    out.insert(wire_key(prop, key_by).to_string(), value);
                }
                Err(e) if e.is_unsupported() => {
                    log::debug!("Skipping property '{}': {}", wire_key(prop, key_by), e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(out)
    }

    /// Ids present in `original` but no longer here, each mapped to `null`.
    pub fn deleted_since(&self, original: &HashSet<String>) -> Map<String, Value> {
        let mut deleted: Vec<&String> = original
            .iter()
            .filter(|id| !self.by_id.contains_key(id.as_str()))
            .collect();
        deleted.sort();
        deleted
            .into_iter()
            .map(|id| (id.clone(), Value::Null))
            .collect()
    }
}

/// Adds `deleted` to an update payload. Keys already present win, and the
/// title property is never removed.
pub(crate) fn merge_deletions(props: &mut Map<String, Value>, deleted: Map<String, Value>) {
    for (key, value) in deleted {
        if key != TITLE_PROPERTY_ID && !props.contains_key(&key) {
            props.insert(key, value);
        }
    }
}

/// The payload key of `prop` under `key_by`.
pub(crate) fn wire_key<P: Property>(prop: &P, key_by: KeyBy) -> &str {
    let (preferred, fallback) = match key_by {
        KeyBy::Name => (prop.name(), prop.id()),
        KeyBy::Id => (prop.id(), prop.name()),
    };
    if preferred.is_empty() {
        fallback
    } else {
        preferred
    }
}

impl<'a, P: Property> IntoIterator for &'a Properties<P> {
    type Item = &'a P;
    type IntoIter = indexmap::map::Values<'a, u64, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.values()
    }
}

impl<P: Property> TryFrom<Vec<P>> for Properties<P> {
    type Error = NotionError;

    /// Adds each property in order; the first collision is returned.
    fn try_from(props: Vec<P>) -> Result<Self> {
        let mut out = Properties::new();
        for prop in props {
            out.add(prop)?;
        }
        Ok(out)
    }
}
