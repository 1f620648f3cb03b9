//! Marker tokens
//!
//!     A marker token is one of the six structural comment shapes, or a run of
//!     text between them. Markers keep their byte range in the source so the
//!     structural pass can copy raw text (including fragment markers) verbatim
//!     into content nodes.

use crate::mml::ast::{Attributes, NodeKind};
use std::ops::Range;

/// A classified slice of mml source
#[derive(Debug, Clone, PartialEq)]
pub enum Marker {
    /// `<!-- @c ... -->` or `<!-- @n ... -->`
    Open {
        kind: NodeKind,
        id: Option<String>,
        attributes: Attributes,
    },
    /// `<!-- /@c -->` or `<!-- /@n -->`
    Close(NodeKind),
    /// `<!-- %IDENT -->`
    FragmentOpen(String),
    /// `<!-- /%IDENT -->`
    FragmentClose(String),
    /// Anything else, including ordinary HTML comments
    Text,
}

impl Marker {
    /// True for Container/Content open and close markers
    pub fn is_structural(&self) -> bool {
        matches!(self, Marker::Open { .. } | Marker::Close(_))
    }

    pub fn is_fragment(&self) -> bool {
        matches!(self, Marker::FragmentOpen(_) | Marker::FragmentClose(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Marker::Text)
    }
}

/// Source text paired with its marker tokens.
///
/// Ranges are byte ranges into [`TokenStream::source`] and cover the whole
/// source without gaps or overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream {
    source: String,
    tokens: Vec<(Marker, Range<usize>)>,
}

impl TokenStream {
    pub fn new(source: String, tokens: Vec<(Marker, Range<usize>)>) -> Self {
        TokenStream { source, tokens }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tokens(&self) -> &[(Marker, Range<usize>)] {
        &self.tokens
    }

    /// Tokens without their ranges
    pub fn markers(&self) -> Vec<&Marker> {
        self.tokens.iter().map(|(marker, _)| marker).collect()
    }

    /// Raw source text of a token range
    pub fn slice(&self, range: &Range<usize>) -> &str {
        &self.source[range.clone()]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Iterate tokens together with their raw text
    pub fn iter_with_text(&self) -> impl Iterator<Item = (&Marker, &str)> + '_ {
        self.tokens
            .iter()
            .map(move |(marker, range)| (marker, &self.source[range.clone()]))
    }
}
