//! Items and the item catalog.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::ItemId;
use crate::error::{CoreError, CoreResult};

/// A catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Catalog identifier. Filled from the document key on load.
    #[serde(default = "unnamed_item")]
    pub id: ItemId,
    /// Display name.
    pub name: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Item category, e.g. `"weapon"` or `"potion"`.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Minimum level the item is meant for.
    #[serde(default)]
    pub level: u32,
    /// Numeric properties such as `value`, `damage`, or `health`.
    #[serde(default)]
    pub properties: BTreeMap<String, i64>,
}

fn unnamed_item() -> ItemId {
    ItemId::new("")
}

impl Item {
    /// Create an item with no properties.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            description: String::new(),
            kind: String::new(),
            level: 0,
            properties: BTreeMap::new(),
        }
    }

    /// Set a numeric property.
    pub fn with_property(mut self, key: impl Into<String>, value: i64) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// Trade value in gold. Items without a `value` property are worthless.
    pub fn value(&self) -> u32 {
        self.properties
            .get("value")
            .copied()
            .map(|v| u32::try_from(v.max(0)).unwrap_or(u32::MAX))
            .unwrap_or(0)
    }
}

#[derive(Deserialize)]
struct ItemDocument {
    items: Option<BTreeMap<String, Item>>,
}

/// The item catalog, keyed by item id.
#[derive(Debug, Clone, Default)]
pub struct ItemRepository {
    items: HashMap<ItemId, Item>,
}

impl ItemRepository {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from an `{"items": {"<id>": {...}}}` document.
    pub fn from_json_str(json: &str) -> CoreResult<Self> {
        let doc: ItemDocument = serde_json::from_str(json)?;
        let entries = doc.items.ok_or(CoreError::MissingSection("items"))?;

        let mut repo = Self::new();
        for (id, mut item) in entries {
            item.id = ItemId::new(id);
            repo.insert(item);
        }
        tracing::info!(items = repo.len(), "loaded item catalog");
        Ok(repo)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Add or replace an item.
    pub fn insert(&mut self, item: Item) {
        self.items.insert(item.id.clone(), item);
    }

    /// Look up an item by id.
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.get(id)
    }

    /// Find an item by display name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Item> {
        self.items
            .values()
            .find(|item| item.name.eq_ignore_ascii_case(name))
    }

    /// Number of items in the catalog.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the catalog holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
