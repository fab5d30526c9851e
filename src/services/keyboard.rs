//! One keyboard bound to one field.
//!
//! A [`KeyboardInstance`] owns its configuration copy, the resolved key set and
//! the render layout projected from it. Both are materialized when the
//! instance is built and again on every reconfiguration.

use crate::catalog::CatalogDb;
use crate::config::KeyboardConfig;
use crate::error::ConfigError;
use crate::keyset::{self, KeySet};
use crate::models::{FieldId, InstanceId, KeySpec, MaxLength};
use crate::projector::{self, RenderLayout};

/// Resolves the key set of `config` and projects its layout.
///
/// The configured pattern wins over `field_pattern`, the pattern declared by
/// the field itself. Without a configured layout the catalog's default layout
/// is used.
///
/// # Examples
///
/// ```
/// use minkeyboard::catalog::CatalogDb;
/// use minkeyboard::config::KeyboardConfig;
/// use minkeyboard::services::materialize;
///
/// let catalogs = CatalogDb::load()?;
/// let config = KeyboardConfig {
///     pattern: Some("[0-9]".to_string()),
///     ..KeyboardConfig::default()
/// };
/// let (keys, layout) = materialize(&config, None, &catalogs)?;
/// assert_eq!(keys.content_keys().count(), 10);
/// assert!(layout.find("5").is_some());
/// assert!(layout.find("A").is_none());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn materialize(
    config: &KeyboardConfig,
    field_pattern: Option<&str>,
    catalogs: &CatalogDb,
) -> Result<(KeySet, RenderLayout), ConfigError> {
    let entry = catalogs.get(&config.catalog)?;
    let explicit = config.explicit_keys()?;
    let pattern = config.pattern.as_deref().or(field_pattern);

    let key_set = keyset::resolve(
        explicit.as_deref(),
        pattern,
        &entry.catalog,
        config.duplicate_keys,
    )?;
    let table = config.layout.as_ref().unwrap_or(&entry.default_layout);
    let layout = projector::project(table, &key_set);

    Ok((key_set, layout))
}

/// A keyboard bound to a single field.
#[derive(Debug, Clone)]
pub struct KeyboardInstance {
    id: InstanceId,
    field: FieldId,
    config: KeyboardConfig,
    field_pattern: Option<String>,
    key_set: KeySet,
    layout: RenderLayout,
}

impl KeyboardInstance {
    /// Builds an instance for `field`.
    pub fn build(
        id: InstanceId,
        field: FieldId,
        config: KeyboardConfig,
        field_pattern: Option<String>,
        catalogs: &CatalogDb,
    ) -> Result<Self, ConfigError> {
        let (key_set, layout) = materialize(&config, field_pattern.as_deref(), catalogs)?;
        Ok(Self {
            id,
            field,
            config,
            field_pattern,
            key_set,
            layout,
        })
    }

    /// Replaces the configuration and re-runs resolution and projection.
    ///
    /// On error the previous configuration and layout stay in place.
    pub fn reconfigure(
        &mut self,
        config: KeyboardConfig,
        catalogs: &CatalogDb,
    ) -> Result<(), ConfigError> {
        let (key_set, layout) = materialize(&config, self.field_pattern.as_deref(), catalogs)
            .inspect_err(|e| tracing::warn!(instance = %self.id, "refused reconfiguration: {e}"))?;

        self.config = config;
        self.key_set = key_set;
        self.layout = layout;
        Ok(())
    }

    /// Instance identifier.
    pub const fn id(&self) -> InstanceId {
        self.id
    }

    /// The bound field.
    pub const fn field(&self) -> FieldId {
        self.field
    }

    /// This instance's configuration.
    pub const fn config(&self) -> &KeyboardConfig {
        &self.config
    }

    /// Resolved keys.
    pub const fn key_set(&self) -> &KeySet {
        &self.key_set
    }

    /// Current render layout.
    pub const fn layout(&self) -> &RenderLayout {
        &self.layout
    }

    /// Looks up a rendered key by name.
    pub fn key(&self, key_name: &str) -> Option<&KeySpec> {
        self.layout.find(key_name)
    }

    /// Effective maximum length given what the field declares.
    pub fn max_length(&self, declared: Option<usize>) -> MaxLength {
        MaxLength::resolve(declared, self.config.max_length)
    }
}
