//! Attribute list lexing
//!
//!     The text after `@c` / `@n` in an opening marker is a whitespace separated
//!     list of `key="value"` pairs. Values are double quoted and have no escaping
//!     scheme, so a value can never contain a double quote.
//!
//!     Parsing is tolerant: anything that is not a well formed `key="value"`
//!     triple is skipped. The `id` pair is pulled out of the list since ids are
//!     not attributes.
//!
//!     A quoted value is taken as written, even one holding `-->`: the marker
//!     scanner skips over quoted runs, so such a value parses and serializes
//!     back unchanged. The document API is stricter and refuses to store `-->`
//!     (see [`Attributes::validate_pair`]), since other markdown tools end the
//!     comment there.

use crate::mml::ast::Attributes;
use logos::Logos;

/// Tokens inside an opening marker's attribute list
#[derive(Logos, Debug, PartialEq, Clone)]
pub enum AttributeToken {
    #[regex(r"[A-Za-z_][A-Za-z0-9_\-]*")]
    Key,

    #[token("=")]
    Equals,

    #[regex(r#""[^"]*""#)]
    Quoted,

    #[regex(r"[ \t\r\n]+")]
    Whitespace,
}

/// Result of parsing an attribute list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedAttributes {
    pub id: Option<String>,
    pub attributes: Attributes,
}

/// Parse the attribute list of an opening marker.
pub fn parse_attributes(source: &str) -> ParsedAttributes {
    let mut lexer = AttributeToken::lexer(source);
    let mut tokens: Vec<(Option<AttributeToken>, &str)> = Vec::new();
    while let Some(result) = lexer.next() {
        tokens.push((result.ok(), lexer.slice()));
    }

    let mut parsed = ParsedAttributes::default();
    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i..] {
            [(Some(AttributeToken::Key), key), (Some(AttributeToken::Equals), _), (Some(AttributeToken::Quoted), quoted), ..] =>
            {
                let value = &quoted[1..quoted.len() - 1];
                if *key == "id" {
                    if parsed.id.is_none() && !value.is_empty() {
                        parsed.id = Some(value.to_string());
                    }
                } else {
                    parsed.attributes.insert(*key, value);
                }
                i += 3;
            }
            [(Some(AttributeToken::Whitespace), _), ..] => i += 1,
            [(_, stray), ..] => {
                log::debug!(target: "mml.lexing", "skipping stray attribute text {stray:?}");
                i += 1;
            }
            [] => break,
        }
    }
    parsed
}
