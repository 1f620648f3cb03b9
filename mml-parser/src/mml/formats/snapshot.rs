//! JSON and YAML output of the [`NodeSnapshot`](crate::mml::ast::NodeSnapshot)

use super::registry::Formatter;
use crate::mml::ast::{snapshot_document, Document};
use crate::mml::error::{MmlError, MmlResult};

pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn serialize(&self, doc: &Document) -> MmlResult<String> {
        serde_json::to_string_pretty(&snapshot_document(doc))
            .map_err(|e| MmlError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as pretty printed JSON"
    }
}

pub struct YamlFormatter;

impl Formatter for YamlFormatter {
    fn name(&self) -> &str {
        "yaml"
    }

    fn serialize(&self, doc: &Document) -> MmlResult<String> {
        serde_yaml::to_string(&snapshot_document(doc))
            .map_err(|e| MmlError::Serialization(e.to_string()))
    }

    fn description(&self) -> &str {
        "Tree snapshot as YAML"
    }
}
