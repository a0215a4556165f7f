//! Named format presets
//!
//! Common fixed formats are all expressible as descriptors, so they are
//! provided as named presets instead of bespoke reader/writer code paths:
//!
//! - `conll`: tab-separated fields, one token per line with a leading token
//!   ID, `# sent_id` comments, empty line after sentences, `_` for missing
//! - `tsv`: tab-separated fields, one token per line, empty line after
//!   sentences, no IDs
//! - `vrt`: tab-separated fields, one token per line, sentences as `<s>`
//!   tags with an `id` attribute
//! - `osl`: one sentence per line, tokens separated by spaces, fields by tabs
//!
//! Applications can register further presets (e.g. from a configuration
//! file) and resolve a user-supplied format specification that is either a
//! preset name or a raw descriptor string.

use crate::descriptor::FormatDescriptor;
use crate::error::ConvertError;
use std::collections::HashMap;

/// Registry of named descriptor presets.
pub struct PresetRegistry {
    presets: HashMap<String, String>,
}

impl PresetRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        PresetRegistry {
            presets: HashMap::new(),
        }
    }

    /// Create a registry with the built-in presets
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("conll", "eltc0_");
        registry.register("tsv", "eltnne");
        registry.register("vrt", "xltxne");
        registry.register("osl", "lstnne");
        registry
    }

    /// Register a preset
    ///
    /// If a preset with the same name already exists, it will be replaced.
    pub fn register(&mut self, name: impl Into<String>, descriptor: impl Into<String>) {
        self.presets.insert(name.into(), descriptor.into());
    }

    /// Check if a preset exists
    pub fn has(&self, name: &str) -> bool {
        self.presets.contains_key(name)
    }

    /// Get a preset's descriptor string by name
    pub fn get(&self, name: &str) -> Result<&str, ConvertError> {
        self.presets
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ConvertError::PresetNotFound(name.to_string()))
    }

    /// List all presets as (name, descriptor) pairs, sorted by name
    pub fn list_presets(&self) -> Vec<(String, String)> {
        let mut presets: Vec<_> = self
            .presets
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.clone()))
            .collect();
        presets.sort();
        presets
    }

    /// Resolve a format specification: a preset name, or a raw six-character
    /// descriptor string.
    pub fn resolve(&self, spec: &str) -> Result<FormatDescriptor, ConvertError> {
        match self.presets.get(spec) {
            Some(descriptor) => descriptor.parse(),
            None if spec.chars().count() == 6 => spec.parse(),
            None => Err(ConvertError::PresetNotFound(spec.to_string())),
        }
    }
}

impl Default for PresetRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{SentenceDelimiter, TokenIdPolicy};

    #[test]
    fn test_registry_creation() {
        let registry = PresetRegistry::new();
        assert!(!registry.has("conll"));
        assert!(registry.list_presets().is_empty());
    }

    #[test]
    fn test_registry_with_defaults() {
        let registry = PresetRegistry::with_defaults();
        for name in ["conll", "tsv", "vrt", "osl"] {
            assert!(registry.has(name));
            // every built-in preset must parse as a valid descriptor
            assert!(registry.resolve(name).is_ok());
        }
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = PresetRegistry::new();
        assert!(matches!(
            registry.get("nonexistent"),
            Err(ConvertError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_registry_replace_preset() {
        let mut registry = PresetRegistry::with_defaults();
        registry.register("conll", "eltc1_");
        assert_eq!(registry.get("conll").unwrap(), "eltc1_");
        let descriptor = registry.resolve("conll").unwrap();
        assert_eq!(descriptor.token_id_policy, TokenIdPolicy::FieldIndex(1));
    }

    #[test]
    fn test_resolve_preset_name() {
        let registry = PresetRegistry::with_defaults();
        let descriptor = registry.resolve("vrt").unwrap();
        assert_eq!(descriptor.sentence_delimiter, SentenceDelimiter::XmlTag);
    }

    #[test]
    fn test_resolve_raw_descriptor() {
        let registry = PresetRegistry::with_defaults();
        let descriptor = registry.resolve("ls/nne").unwrap();
        assert_eq!(descriptor.sentence_delimiter, SentenceDelimiter::Newline);
    }

    #[test]
    fn test_resolve_unknown_name() {
        let registry = PresetRegistry::with_defaults();
        assert!(matches!(
            registry.resolve("universal"),
            Err(ConvertError::PresetNotFound(_))
        ));
    }

    #[test]
    fn test_preset_names_shadow_descriptors() {
        let mut registry = PresetRegistry::new();
        registry.register("eltnne", "xltxne");
        let descriptor = registry.resolve("eltnne").unwrap();
        assert_eq!(descriptor.sentence_delimiter, SentenceDelimiter::XmlTag);
    }

    #[test]
    fn test_list_presets_sorted() {
        let registry = PresetRegistry::with_defaults();
        let names: Vec<_> = registry
            .list_presets()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["conll", "osl", "tsv", "vrt"]);
    }
}
