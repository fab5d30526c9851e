//! Key catalogs and their default layout tables.
//!
//! The catalog database is embedded in the binary at compile time. Each catalog
//! is the ordered superset of assignable keys for one locale, paired with the
//! layout table used when a keyboard configures none.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_KEYPAD;
use crate::error::ConfigError;
use crate::models::LayoutTable;

/// Ordered sequence of assignable characters.
///
/// # Invariants
///
/// - No character appears twice; order is the tie-break order used by the resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCatalog {
    keys: Vec<char>,
}

impl KeyCatalog {
    /// Builds a catalog from a string, one key per `char`.
    ///
    /// # Examples
    ///
    /// ```
    /// use minkeyboard::catalog::KeyCatalog;
    ///
    /// let catalog = KeyCatalog::new("ABC123").unwrap();
    /// assert_eq!(catalog.len(), 6);
    /// assert!(KeyCatalog::new("ABA").is_err());
    /// ```
    pub fn new(keys: &str) -> std::result::Result<Self, ConfigError> {
        let mut seen = Vec::with_capacity(keys.len());
        for c in keys.chars() {
            if seen.contains(&c) {
                return Err(ConfigError::DuplicateCatalogKey(c));
            }
            seen.push(c);
        }
        Ok(Self { keys: seen })
    }

    /// Keys in catalog order.
    pub fn keys(&self) -> &[char] {
        &self.keys
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Returns `true` if the catalog has no keys.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl Default for KeyCatalog {
    fn default() -> Self {
        Self {
            keys: DEFAULT_KEYPAD.chars().collect(),
        }
    }
}

/// Catalog record from catalogs.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogRecord {
    id: String,
    name: String,
    #[serde(default)]
    description: Option<String>,
    keys: String,
    layout: LayoutTable,
}

/// Database schema from catalogs.json.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogFile {
    version: String,
    catalogs: Vec<CatalogRecord>,
}

/// A loaded catalog together with its default layout.
#[derive(Debug, Clone)]
pub struct CatalogEntry {
    /// Catalog identifier (e.g., "latin", "french")
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// The validated key catalog
    pub catalog: KeyCatalog,
    /// Layout table used when the configuration provides none
    pub default_layout: LayoutTable,
}

/// Embedded catalog database.
#[derive(Debug, Clone)]
pub struct CatalogDb {
    entries: Vec<CatalogEntry>,
}

impl CatalogDb {
    /// Loads the catalog database from the embedded JSON file.
    pub fn load() -> Result<Self> {
        let json_data = include_str!("catalogs.json");
        let file: CatalogFile =
            serde_json::from_str(json_data).context("Failed to parse embedded catalogs.json")?;

        let entries = file
            .catalogs
            .into_iter()
            .map(|record| {
                let catalog = KeyCatalog::new(&record.keys)
                    .with_context(|| format!("Invalid key catalog '{}'", record.id))?;
                Ok(CatalogEntry {
                    id: record.id,
                    name: record.name,
                    description: record.description,
                    catalog,
                    default_layout: record.layout,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(version = %file.version, count = entries.len(), "loaded key catalogs");
        Ok(Self { entries })
    }

    /// Gets a catalog by identifier.
    pub fn get(&self, id: &str) -> std::result::Result<&CatalogEntry, ConfigError> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .ok_or_else(|| ConfigError::UnknownCatalog(id.to_string()))
    }

    /// All catalogs, in file order.
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
