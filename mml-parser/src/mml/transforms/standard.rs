//! Standard transform definitions
//!
//! Pre-built pipelines, defined as `once_cell::sync::Lazy` statics.

use crate::mml::assembling::Autofix;
use crate::mml::ast::{Document, ParseOptions};
use crate::mml::parsing::ParseNode;
use crate::mml::token::TokenStream;
use crate::mml::transforms::stages::{StructuralPass, Tokenization};
use crate::mml::transforms::Transform;
use once_cell::sync::Lazy;

pub type LexingTransform = Transform<String, TokenStream>;
pub type IrTransform = Transform<String, Vec<ParseNode>>;
pub type DocumentTransform = Transform<String, Document>;

/// String to marker stream
///
/// ```rust
/// use mml_parser::mml::transforms::standard::TOKENIZATION;
///
/// let tokens = TOKENIZATION.run("<!-- @c -->x<!-- /@c -->".to_string()).unwrap();
/// assert_eq!(tokens.len(), 3);
/// ```
pub static TOKENIZATION: Lazy<LexingTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then(Tokenization));

/// String to IR, before any repair
pub static TO_IR: Lazy<IrTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&TOKENIZATION).then(StructuralPass));

/// String to Document: the full pipeline, autofix included
pub static STRING_TO_DOCUMENT: Lazy<DocumentTransform> =
    Lazy::new(|| Transform::from_fn(Ok).then_transform(&TO_IR).then(Autofix::new()));

/// The full pipeline with explicit options
pub fn parse_pipeline(options: &ParseOptions) -> DocumentTransform {
    Transform::from_fn(Ok)
        .then_transform(&TO_IR)
        .then(Autofix::with_seed(options.id_seed))
}
