//! Tool catalog model: the ordered `tools` mapping of the configuration document.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::domain::artifacts::InstallerArchetype;

/// Installer filenames meaning "nothing to download".
const NO_DOWNLOAD_SENTINEL: &str = "none";

/// A single installable tool.
///
/// Only `enable` changes at runtime. Empty optional fields stay out of the
/// saved document and unknown keys are carried in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolEntry {
    /// Installer filename inside the setup cache. Empty or `none` when the tool
    /// needs no download.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub version: String,
    /// Download URL for the installer.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub link: String,
    #[serde(default)]
    pub enable: bool,
    /// Names of tools that must be installed before this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    /// Explicit install recipe; when absent the recipe is inferred from the names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archetype: Option<InstallerArchetype>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ToolEntry {
    /// Whether an installer file has to be present in the setup cache.
    pub fn requires_download(&self) -> bool {
        let name = self.name.trim();
        !name.is_empty() && !name.eq_ignore_ascii_case(NO_DOWNLOAD_SENTINEL)
    }
}

/// Tool catalog preserving document order.
///
/// Lookups are linear; catalogs hold a handful of entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCatalog {
    entries: Vec<(String, ToolEntry)>,
}

impl ToolCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a tool, keeping the original position on replace.
    pub fn insert(&mut self, key: impl Into<String>, entry: ToolEntry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, slot)) => *slot = entry,
            None => self.entries.push((key, entry)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&ToolEntry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, entry)| entry)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ToolEntry> {
        self.entries.iter_mut().find(|(k, _)| k == key).map(|(_, entry)| entry)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Tool name at a zero-based position.
    pub fn key_at(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|(k, _)| k.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ToolEntry)> {
        self.entries.iter().map(|(k, entry)| (k.as_str(), entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Enabled tools in catalog order.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &ToolEntry)> {
        self.iter().filter(|(_, entry)| entry.enable)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, ToolEntry)> for ToolCatalog {
    fn from_iter<I: IntoIterator<Item = (K, ToolEntry)>>(iter: I) -> Self {
        let mut catalog = ToolCatalog::new();
        for (key, entry) in iter {
            catalog.insert(key, entry);
        }
        catalog
    }
}

impl Serialize for ToolCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, entry) in &self.entries {
            map.serialize_entry(key, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ToolCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = ToolCatalog;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of tool names to tool entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut catalog = ToolCatalog::new();
                while let Some((key, entry)) = access.next_entry::<String, ToolEntry>()? {
                    catalog.insert(key, entry);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
