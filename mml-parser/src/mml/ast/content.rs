//! Fragment-aware content text
//!
//!     The text of a content node is kept as a list of segments instead of a flat
//!     string. Literal runs and fragment occurrences alternate in source order,
//!     so a fragment can be rewritten in place and the node's text renders back
//!     with every marker where it was.
//!
//! Fragment Extraction
//!
//!     Walking the marker stream of the text:
//!
//!         - an opener followed by a closer with the same identifier forms an
//!           occurrence; its inner text is kept verbatim;
//!         - a closer naming another identifier, a second opener before any
//!           closer, or an opener that is never closed leave the earlier opener
//!           as literal text;
//!         - a closer with no opener is literal text.
//!
//!     Fragments never nest. Structural markers inside content are literal text
//!     here; the document API refuses to store them in the first place.

use crate::mml::error::{MmlError, MmlResult};
use crate::mml::lexing::{contains_marker, tokenize};
use crate::mml::token::Marker;
use indexmap::IndexMap;

/// One fragment occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    pub identifier: String,
    pub text: String,
    open_marker: String,
    close_marker: String,
}

impl Fragment {
    /// A fragment with canonical markers
    pub fn new(identifier: impl Into<String>, text: impl Into<String>) -> Self {
        let identifier = identifier.into();
        Fragment {
            open_marker: format!("<!-- %{identifier} -->"),
            close_marker: format!("<!-- /%{identifier} -->"),
            identifier,
            text: text.into(),
        }
    }

    fn render_into(&self, out: &mut String) {
        out.push_str(&self.open_marker);
        out.push_str(&self.text);
        out.push_str(&self.close_marker);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Fragment(Fragment),
}

/// The text of a content node, split into literal runs and fragments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentText {
    segments: Vec<Segment>,
}

struct PendingFragment {
    identifier: String,
    open_marker: String,
    inner: String,
}

impl PendingFragment {
    fn into_literal(self) -> String {
        self.open_marker + &self.inner
    }
}

impl ContentText {
    /// Segment `text`, extracting fragment occurrences
    pub fn parse(text: &str) -> Self {
        let stream = tokenize(text);
        let mut content = ContentText::default();
        let mut literal = String::new();
        let mut pending: Option<PendingFragment> = None;

        for (marker, raw) in stream.iter_with_text() {
            match marker {
                Marker::FragmentOpen(identifier) => {
                    if let Some(earlier) = pending.take() {
                        literal.push_str(&earlier.into_literal());
                    }
                    pending = Some(PendingFragment {
                        identifier: identifier.clone(),
                        open_marker: raw.to_string(),
                        inner: String::new(),
                    });
                }
                Marker::FragmentClose(identifier) => match pending.take() {
                    Some(open) if &open.identifier == identifier => {
                        content.push_text(std::mem::take(&mut literal));
                        content.segments.push(Segment::Fragment(Fragment {
                            identifier: open.identifier,
                            text: open.inner,
                            open_marker: open.open_marker,
                            close_marker: raw.to_string(),
                        }));
                    }
                    Some(open) => {
                        literal.push_str(&open.into_literal());
                        literal.push_str(raw);
                    }
                    None => literal.push_str(raw),
                },
                _ => match pending.as_mut() {
                    Some(open) => open.inner.push_str(raw),
                    None => literal.push_str(raw),
                },
            }
        }
        if let Some(open) = pending {
            literal.push_str(&open.into_literal());
        }
        content.push_text(literal);
        content
    }

    fn push_text(&mut self, text: String) {
        if text.is_empty() {
            return;
        }
        match self.segments.last_mut() {
            Some(Segment::Text(previous)) => previous.push_str(&text),
            _ => self.segments.push(Segment::Text(text)),
        }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The full text with fragment markers in place
    pub fn render(&self) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Fragment(fragment) => fragment.render_into(&mut out),
            }
        }
        out
    }

    /// Empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.segments.iter().all(|segment| match segment {
            Segment::Text(text) => text.trim().is_empty(),
            Segment::Fragment(_) => false,
        })
    }

    pub fn fragments(&self) -> impl Iterator<Item = &Fragment> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Fragment(fragment) => Some(fragment),
            Segment::Text(_) => None,
        })
    }

    /// Fragment texts grouped by identifier (first appearance order), each
    /// group in appearance order. `identifier` narrows to one group.
    pub fn fragment_map(&self, identifier: Option<&str>) -> IndexMap<String, Vec<String>> {
        let mut map: IndexMap<String, Vec<String>> = IndexMap::new();
        for fragment in self.fragments() {
            if identifier.is_some_and(|wanted| wanted != fragment.identifier) {
                continue;
            }
            map.entry(fragment.identifier.clone())
                .or_default()
                .push(fragment.text.clone());
        }
        map
    }

    pub fn has_fragment(&self, identifier: &str) -> bool {
        self.fragments().any(|f| f.identifier == identifier)
    }

    pub fn fragment_count(&self, identifier: &str) -> usize {
        self.fragments().filter(|f| f.identifier == identifier).count()
    }

    /// Replace the text of one occurrence in place
    pub fn set_fragment(&mut self, identifier: &str, index: usize, text: &str) -> MmlResult<()> {
        if contains_marker(text) {
            return Err(MmlError::invalid(format!(
                "fragment text for {identifier} may not contain markers"
            )));
        }
        let count = self.fragment_count(identifier);
        let target = self
            .segments
            .iter_mut()
            .filter_map(|segment| match segment {
                Segment::Fragment(fragment) if fragment.identifier == identifier => Some(fragment),
                _ => None,
            })
            .nth(index)
            .ok_or_else(|| {
                MmlError::invalid(format!(
                    "fragment {identifier}[{index}] out of range ({count} occurrences)"
                ))
            })?;
        target.text = text.to_string();
        Ok(())
    }

    /// Literal marker text for embedding a fragment by hand
    pub fn fragment_markup(identifier: &str, text: &str) -> String {
        let mut out = String::new();
        Fragment::new(identifier, text).render_into(&mut out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GENRES: &str = "Genres: <!-- %genre -->horror<!-- /%genre -->, \
                          <!-- %genre -->mystery<!-- /%genre --> and \
                          <!-- %genre -->romance<!-- /%genre -->.";

    #[test]
    fn test_groups_occurrences_in_order() {
        let content = ContentText::parse(GENRES);
        let map = content.fragment_map(None);
        assert_eq!(map["genre"], vec!["horror", "mystery", "romance"]);
        assert_eq!(content.fragment_count("genre"), 3);
        assert_eq!(content.render(), GENRES);
    }

    #[test]
    fn test_set_fragment_changes_only_one_occurrence() {
        let mut content = ContentText::parse(GENRES);
        content.set_fragment("genre", 1, "X").unwrap();
        assert_eq!(
            content.render(),
            GENRES.replace(">mystery<", ">X<")
        );
        assert_eq!(content.fragment_map(Some("genre"))["genre"], vec!["horror", "X", "romance"]);
    }

    #[test]
    fn test_set_fragment_out_of_range() {
        let mut content = ContentText::parse(GENRES);
        assert!(content.set_fragment("genre", 3, "X").unwrap_err().is_invalid_operation());
        assert!(content.set_fragment("mood", 0, "X").unwrap_err().is_invalid_operation());
        assert!(content
            .set_fragment("genre", 0, "<!-- %x -->")
            .unwrap_err()
            .is_invalid_operation());
    }

    #[test]
    fn test_mismatched_closer_leaves_literal() {
        let text = "<!-- %a -->x<!-- /%b --> <!-- %a -->y<!-- /%a -->";
        let content = ContentText::parse(text);
        assert_eq!(content.fragment_map(None)["a"], vec!["y"]);
        assert_eq!(content.render(), text);
    }

    #[test]
    fn test_second_opener_demotes_first() {
        let text = "<!-- %a -->x<!-- %a -->y<!-- /%a -->";
        let content = ContentText::parse(text);
        assert_eq!(content.fragment_map(None)["a"], vec!["y"]);
        assert_eq!(content.render(), text);
    }

    #[test]
    fn test_unclosed_and_stray_markers_are_literal() {
        let text = "<!-- /%a --> lead <!-- %b -->never closed";
        let content = ContentText::parse(text);
        assert_eq!(content.fragments().count(), 0);
        assert_eq!(content.segments(), &[Segment::Text(text.to_string())]);
    }

    #[test]
    fn test_filtered_map_and_blankness() {
        let content = ContentText::parse("<!-- %a -->1<!-- /%a --><!-- %b -->2<!-- /%b -->");
        let only_b = content.fragment_map(Some("b"));
        assert_eq!(only_b.len(), 1);
        assert_eq!(only_b["b"], vec!["2"]);
        assert!(!content.is_blank());
        assert!(ContentText::parse(" \n\t").is_blank());
        assert!(ContentText::parse("").is_blank());
    }

    #[test]
    fn test_fragment_markup() {
        assert_eq!(
            ContentText::fragment_markup("tag", "value"),
            "<!-- %tag -->value<!-- /%tag -->"
        );
    }
}
