//! Shared configuration loader for the corpconv toolchain.
//!
//! `defaults/corpconv.default.toml` is embedded into every binary so that docs
//! and runtime behavior stay in sync. Applications layer user-specific files on
//! top of those defaults via [`Loader`] before deserializing into
//! [`CorpusConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use corpconv::{PresetRegistry, XmlOptions};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/corpconv.default.toml");

/// Top-level configuration consumed by corpconv applications.
#[derive(Debug, Clone, Deserialize)]
pub struct CorpusConfig {
    pub xml: XmlConfig,
    pub presets: HashMap<String, String>,
}

/// Names used when sentences are delimited by XML tags.
#[derive(Debug, Clone, Deserialize)]
pub struct XmlConfig {
    pub tag: String,
    pub id: String,
}

impl From<XmlConfig> for XmlOptions {
    fn from(config: XmlConfig) -> Self {
        XmlOptions {
            tag: config.tag,
            id_attribute: config.id,
        }
    }
}

impl From<&XmlConfig> for XmlOptions {
    fn from(config: &XmlConfig) -> Self {
        XmlOptions {
            tag: config.tag.clone(),
            id_attribute: config.id.clone(),
        }
    }
}

impl CorpusConfig {
    /// Build a preset registry from the configured preset table.
    ///
    /// Configured presets are layered over the built-in ones, so a user file
    /// can redefine `conll` or add entirely new names.
    pub fn preset_registry(&self) -> PresetRegistry {
        let mut registry = PresetRegistry::with_defaults();
        for (name, descriptor) in &self.presets {
            registry.register(name.clone(), descriptor.clone());
        }
        registry
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<CorpusConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<CorpusConfig, ConfigError> {
    Loader::new().build()
}
