//! Lexer
//!
//!     Splits mml source into a flat stream of marker tokens.
//!
//! Structure
//!
//!     A single compiled regular expression finds every structural comment. The
//!     bytes between two matches become one `Text` token, so the token ranges tile
//!     the source exactly and `detokenize(tokenize(s)) == s` always holds.
//!
//!     Markers must sit on a single line. The marker regex rejects `<` and line
//!     breaks outside quoted values, so an unterminated marker never swallows the
//!     marker that follows it; the broken one simply stays text.
//!
//!     Attribute lists of opening markers are handed to the logos attribute lexer,
//!     see [attributes](crate::mml::token::attributes).

use crate::mml::ast::NodeKind;
use crate::mml::token::{parse_attributes, Marker, TokenStream};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"<!--[ \t]*(?:",
        r#"(?P<close>/)?@(?P<kind>[cn])(?P<attrs>[ \t](?:"[^"\n]*"|[^"\n<-]|-[^-\n]|--[^>\n])*?)?"#,
        r"|(?P<fclose>/)?%(?P<ident>[A-Za-z0-9_]+)",
        r")[ \t]*-->",
    ))
    .expect("marker regex is valid")
});

/// Tokenize mml source into markers and text runs.
pub fn tokenize(source: &str) -> TokenStream {
    let mut tokens = Vec::new();
    let mut cursor = 0;

    for caps in MARKER_RE.captures_iter(source) {
        let Some(whole) = caps.get(0) else { continue };
        if whole.start() > cursor {
            tokens.push((Marker::Text, cursor..whole.start()));
        }
        let marker = classify(&caps);
        log::trace!(target: "mml.lexing", "marker {:?} at {:?}", marker, whole.range());
        tokens.push((marker, whole.range()));
        cursor = whole.end();
    }
    if cursor < source.len() {
        tokens.push((Marker::Text, cursor..source.len()));
    }

    TokenStream::new(source.to_string(), tokens)
}

fn classify(caps: &Captures<'_>) -> Marker {
    if let Some(ident) = caps.name("ident") {
        let identifier = ident.as_str().to_string();
        return if caps.name("fclose").is_some() {
            Marker::FragmentClose(identifier)
        } else {
            Marker::FragmentOpen(identifier)
        };
    }

    let kind = match caps.name("kind").map(|m| m.as_str()) {
        Some("c") => NodeKind::Container,
        _ => NodeKind::Content,
    };
    if caps.name("close").is_some() {
        return Marker::Close(kind);
    }

    let parsed = parse_attributes(caps.name("attrs").map_or("", |m| m.as_str()));
    Marker::Open {
        kind,
        id: parsed.id,
        attributes: parsed.attributes,
    }
}

/// Rebuild source text from a token stream
pub fn detokenize(stream: &TokenStream) -> String {
    stream.iter_with_text().map(|(_, text)| text).collect()
}

/// True if `text` holds at least one Container/Content marker
pub fn contains_structural_marker(text: &str) -> bool {
    tokenize(text)
        .tokens()
        .iter()
        .any(|(marker, _)| marker.is_structural())
}

/// True if `text` holds any marker at all
pub fn contains_marker(text: &str) -> bool {
    tokenize(text)
        .tokens()
        .iter()
        .any(|(marker, _)| !marker.is_text())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mml::ast::Attributes;

    fn markers(source: &str) -> Vec<Marker> {
        tokenize(source)
            .tokens()
            .iter()
            .map(|(marker, _)| marker.clone())
            .collect()
    }

    #[test]
    fn test_container_and_content_markers() {
        let source = r#"<!-- @c id="root" --><!-- @n id="n1" type="x" -->hello<!-- /@n --><!-- /@c -->"#;
        assert_eq!(
            markers(source),
            vec![
                Marker::Open {
                    kind: NodeKind::Container,
                    id: Some("root".into()),
                    attributes: Attributes::new(),
                },
                Marker::Open {
                    kind: NodeKind::Content,
                    id: Some("n1".into()),
                    attributes: Attributes::from_iter([("type", "x")]),
                },
                Marker::Text,
                Marker::Close(NodeKind::Content),
                Marker::Close(NodeKind::Container),
            ]
        );
    }

    #[test]
    fn test_fragment_markers() {
        assert_eq!(
            markers("a <!-- %genre -->b<!-- /%genre --> c"),
            vec![
                Marker::Text,
                Marker::FragmentOpen("genre".into()),
                Marker::Text,
                Marker::FragmentClose("genre".into()),
                Marker::Text,
            ]
        );
    }

    #[test]
    fn test_plain_comments_are_text() {
        assert_eq!(markers("<!-- just a note -->"), vec![Marker::Text]);
        assert_eq!(markers("<!-- @cx -->"), vec![Marker::Text]);
        assert_eq!(markers("<!-- % -->"), vec![Marker::Text]);
    }

    #[test]
    fn test_tolerant_whitespace() {
        assert_eq!(
            markers("<!--@c-->\n<!--   /@c   -->"),
            vec![
                Marker::Open {
                    kind: NodeKind::Container,
                    id: None,
                    attributes: Attributes::new(),
                },
                Marker::Text,
                Marker::Close(NodeKind::Container),
            ]
        );
    }

    #[test]
    fn test_unterminated_marker_does_not_swallow_next() {
        let source = r#"<!-- @n id="a" <!-- /@c -->"#;
        assert_eq!(
            markers(source),
            vec![Marker::Text, Marker::Close(NodeKind::Container)]
        );
    }

    #[test]
    fn test_quoted_value_may_contain_arrow() {
        let source = r#"<!-- @n id="a" note="x-->y" -->"#;
        match &markers(source)[..] {
            [Marker::Open { id, attributes, .. }] => {
                assert_eq!(id.as_deref(), Some("a"));
                assert_eq!(attributes.get("note"), Some("x-->y"));
            }
            other => panic!("unexpected markers {other:?}"),
        }
    }

    #[test]
    fn test_ranges_tile_source() {
        let source = "intro\n<!-- @c id=\"c\" -->\n<!-- %a -->x<!-- /%a -->\n<!-- /@c -->tail";
        let stream = tokenize(source);
        let mut cursor = 0;
        for (_, range) in stream.tokens() {
            assert_eq!(range.start, cursor);
            cursor = range.end;
        }
        assert_eq!(cursor, source.len());
        assert_eq!(detokenize(&stream), source);
    }

    #[test]
    fn test_marker_predicates() {
        assert!(contains_structural_marker("x <!-- /@n --> y"));
        assert!(!contains_structural_marker("x <!-- %a -->y<!-- /%a -->"));
        assert!(contains_marker("x <!-- %a -->"));
        assert!(!contains_marker("<!-- nothing -->"));
    }

    #[test]
    fn test_empty_source() {
        assert!(tokenize("").is_empty());
    }
}
