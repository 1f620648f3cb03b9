//! Document loading utilities
//!
//! `DocumentLoader` reads source text from a file or a string and runs
//! transforms on it. It is used by the CLI and by tests.
//!
//! ```rust,ignore
//! let doc = DocumentLoader::from_path("notes.md")?.parse()?;
//! let tokens = DocumentLoader::from_string("<!-- @c -->").tokenize()?;
//! let ir = loader.with(&TO_IR)?;
//! ```

use crate::mml::ast::{Document, ParseOptions};
use crate::mml::error::{MmlError, MmlResult};
use crate::mml::token::TokenStream;
use crate::mml::transforms::standard::{parse_pipeline, STRING_TO_DOCUMENT, TOKENIZATION};
use crate::mml::transforms::Transform;
use std::fs;
use std::path::Path;

/// Document loader with transform shortcuts
pub struct DocumentLoader {
    source: String,
}

impl DocumentLoader {
    /// Load from a file path. Bytes that are not UTF-8 are rejected.
    pub fn from_path<P: AsRef<Path>>(path: P) -> MmlResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let source = String::from_utf8(bytes).map_err(|e| {
            MmlError::MalformedInput(format!("{} is not valid UTF-8: {e}", path.display()))
        })?;
        log::debug!(target: "mml.loader", "loaded {} bytes from {}", source.len(), path.display());
        Ok(DocumentLoader { source })
    }

    pub fn from_string<S: Into<String>>(source: S) -> Self {
        DocumentLoader {
            source: source.into(),
        }
    }

    /// Run any transform on the source. All shortcuts go through here.
    pub fn with<O: 'static>(&self, transform: &Transform<String, O>) -> MmlResult<O> {
        transform.run(self.source.clone())
    }

    pub fn parse(&self) -> MmlResult<Document> {
        self.with(&STRING_TO_DOCUMENT)
    }

    pub fn parse_with(&self, options: &ParseOptions) -> MmlResult<Document> {
        self.with(&parse_pipeline(options))
    }

    pub fn tokenize(&self) -> MmlResult<TokenStream> {
        self.with(&TOKENIZATION)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mml::transforms::standard::TO_IR;
    use std::io::Write;

    #[test]
    fn test_from_string_and_parse() {
        let loader = DocumentLoader::from_string(r#"<!-- @n id="a" -->hi<!-- /@n -->"#);
        let doc = loader.parse().unwrap();
        assert_eq!(doc.read_content("a").unwrap(), "hi");
        assert_eq!(loader.tokenize().unwrap().len(), 3);
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"<!-- @c id="r" -->text<!-- /@c -->"#).unwrap();
        let doc = DocumentLoader::from_path(file.path()).unwrap().parse().unwrap();
        assert_eq!(doc.root_id(), "r");
    }

    #[test]
    fn test_from_path_nonexistent_is_io() {
        let err = DocumentLoader::from_path("definitely/not/here.md").err().unwrap();
        assert!(matches!(err, MmlError::Io(_)));
    }

    #[test]
    fn test_invalid_utf8_is_malformed() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0x66, 0x6f, 0xff, 0xfe]).unwrap();
        let err = DocumentLoader::from_path(file.path()).err().unwrap();
        assert!(matches!(err, MmlError::MalformedInput(_)));
    }

    #[test]
    fn test_with_custom_transform() {
        let loader = DocumentLoader::from_string("loose");
        assert_eq!(loader.with(&TO_IR).unwrap().len(), 1);
    }

    #[test]
    fn test_parse_with_seed_is_deterministic() {
        let loader = DocumentLoader::from_string("a<!-- @c --><!-- /@c -->");
        let options = ParseOptions { id_seed: Some(3) };
        assert_eq!(
            loader.parse_with(&options).unwrap(),
            loader.parse_with(&options).unwrap()
        );
    }
}
