//! Format registry
//!
//! Each format implements the `Formatter` trait and can be registered with
//! `FormatRegistry`. Registering a formatter under a taken name replaces it,
//! which is how callers swap in formatters built from their own options.

use crate::mml::ast::Document;
use crate::mml::error::{MmlError, MmlResult};
use std::collections::HashMap;

/// Trait for document formatters
pub trait Formatter: Send + Sync {
    /// The name of this format (e.g., "treeviz", "markup")
    fn name(&self) -> &str;

    fn serialize(&self, doc: &Document) -> MmlResult<String>;

    fn description(&self) -> &str {
        ""
    }
}

/// Registry of document formatters, looked up by name
pub struct FormatRegistry {
    formatters: HashMap<String, Box<dyn Formatter>>,
}

impl FormatRegistry {
    pub fn new() -> Self {
        FormatRegistry {
            formatters: HashMap::new(),
        }
    }

    pub fn register<F: Formatter + 'static>(&mut self, formatter: F) {
        self.formatters
            .insert(formatter.name().to_string(), Box::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&dyn Formatter> {
        self.formatters.get(name).map(|f| f.as_ref())
    }

    pub fn has(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    pub fn serialize(&self, doc: &Document, format: &str) -> MmlResult<String> {
        let formatter = self
            .get(format)
            .ok_or_else(|| MmlError::FormatNotFound(format.to_string()))?;
        formatter.serialize(doc)
    }

    /// All format names, sorted
    pub fn list_formats(&self) -> Vec<String> {
        let mut names: Vec<_> = self.formatters.keys().cloned().collect();
        names.sort();
        names
    }

    /// Name and description pairs, sorted by name
    pub fn describe(&self) -> Vec<(String, String)> {
        self.list_formats()
            .into_iter()
            .map(|name| {
                let description = self
                    .get(&name)
                    .map(|f| f.description().to_string())
                    .unwrap_or_default();
                (name, description)
            })
            .collect()
    }

    /// A registry with the built-in formatters and their default options
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(super::MarkupFormatter::default());
        registry.register(super::TreevizFormatter::default());
        registry.register(super::JsonFormatter);
        registry.register(super::YamlFormatter);
        registry
    }
}

impl Default for FormatRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestFormatter;
    impl Formatter for TestFormatter {
        fn name(&self) -> &str {
            "test"
        }
        fn serialize(&self, _doc: &Document) -> MmlResult<String> {
            Ok("test output".to_string())
        }
        fn description(&self) -> &str {
            "Test formatter"
        }
    }

    #[test]
    fn test_registry_register_and_serialize() {
        let mut registry = FormatRegistry::new();
        registry.register(TestFormatter);

        assert!(registry.has("test"));
        assert_eq!(registry.list_formats(), vec!["test"]);
        assert_eq!(
            registry.serialize(&Document::new(), "test").unwrap(),
            "test output"
        );
    }

    #[test]
    fn test_registry_serialize_not_found() {
        let registry = FormatRegistry::new();
        match registry.serialize(&Document::new(), "nonexistent") {
            Err(MmlError::FormatNotFound(name)) => assert_eq!(name, "nonexistent"),
            other => panic!("expected FormatNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_default_formats() {
        let registry = FormatRegistry::default();
        assert_eq!(
            registry.list_formats(),
            vec!["json", "markup", "treeviz", "yaml"]
        );
        assert!(registry.describe().iter().all(|(_, d)| !d.is_empty()));
    }
}
