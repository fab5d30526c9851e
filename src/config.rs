//! Configuration management for the application.
//!
//! This module handles loading keyboard configuration in TOML format with
//! platform-specific directory resolution. Configuration is read-only: the
//! crate never writes it back.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{APP_BINARY_NAME, DEFAULT_CATALOG_ID};
use crate::error::ConfigError;
use crate::host::Positioning;
use crate::keyset::DuplicateKeys;
use crate::models::LayoutTable;
use crate::visibility::Placement;

/// Explicit key list, written either as a string or as a list of one-character strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyList {
    /// Every `char` is one key (e.g., `"ABC"`)
    Text(String),
    /// One key per entry (e.g., `["A", "B", "C"]`)
    List(Vec<String>),
}

impl KeyList {
    /// Expands the list into characters.
    ///
    /// List entries must be exactly one character long.
    pub fn to_chars(&self) -> std::result::Result<Vec<char>, ConfigError> {
        match self {
            Self::Text(text) => Ok(text.chars().collect()),
            Self::List(entries) => entries
                .iter()
                .map(|entry| {
                    let mut chars = entry.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(c),
                        _ => Err(ConfigError::InvalidKey(entry.clone())),
                    }
                })
                .collect(),
        }
    }
}

/// Per-keyboard configuration.
///
/// Every keyboard instance keeps its own copy; changing one instance never
/// affects another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Key catalog identifier (e.g., "latin", "french")
    pub catalog: String,
    /// Character-class pattern such as `"[A-Z][0-9]"`
    pub pattern: Option<String>,
    /// Explicit keys; win over the pattern
    pub keys: Option<KeyList>,
    /// Layout table; the catalog's default layout when absent
    pub layout: Option<LayoutTable>,
    /// Maximum length used when the field declares none
    pub max_length: Option<usize>,
    /// Fixed container the panel is rendered into
    pub keyboard_target: Option<String>,
    /// Placement rules used when no fixed target is configured
    pub positioning: Positioning,
    /// Animate show/hide
    pub animate: bool,
    /// Treatment of keys matched by several bracket groups
    pub duplicate_keys: DuplicateKeys,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG_ID.to_string(),
            pattern: None,
            keys: None,
            layout: None,
            max_length: None,
            keyboard_target: None,
            positioning: Positioning::default(),
            animate: true,
            duplicate_keys: DuplicateKeys::default(),
        }
    }
}

impl KeyboardConfig {
    /// Explicit keys as characters, if configured.
    pub fn explicit_keys(&self) -> std::result::Result<Option<Vec<char>>, ConfigError> {
        self.keys.as_ref().map(KeyList::to_chars).transpose()
    }

    /// Where an opened panel goes.
    pub fn placement(&self) -> Placement {
        match &self.keyboard_target {
            Some(target) => Placement::Fixed(target.clone()),
            None => Placement::Anchored(self.positioning.clone()),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Keyboard defaults
    pub keyboard: KeyboardConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// - Linux: `~/.config/minkeyboard/`
    /// - macOS: `~/Library/Application Support/minkeyboard/`
    /// - Windows: `%APPDATA%\minkeyboard\`
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(APP_BINARY_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the default config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file, using defaults");
            return Ok(Self::new());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit file. The file must exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// Only checks what can be checked without the catalog database; pattern
    /// and catalog errors surface when a keyboard is built.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        self.keyboard.explicit_keys()?;
        Ok(())
    }
}
