//! Filters and terminal accessors shared by [`Query`](super::Query) and
//! [`QueryMut`](super::QueryMut)

use crate::mml::ast::{Attributes, Document, NodeKind};

/// A document plus an ordered match set
pub trait Selection: Sized {
    fn document(&self) -> &Document;

    /// Current matches, in document order
    fn ids(&self) -> &[String];

    /// The document and a mutable handle on the match set
    fn parts(&mut self) -> (&Document, &mut Vec<String>);

    /// Keep the matches for which `keep` holds
    fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&Document, &str) -> bool,
    {
        let (doc, matches) = self.parts();
        matches.retain(|id| keep(doc, id));
        self
    }

    // ------------------------------------------------------------------
    // Filters
    // ------------------------------------------------------------------

    /// Nodes having every given attribute with exactly that value
    fn where_attrs<I, K, V>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let wanted: Vec<(K, V)> = attributes.into_iter().collect();
        self.retain(|doc, id| {
            doc.get(id).is_some_and(|node| {
                wanted
                    .iter()
                    .all(|(k, v)| node.attribute(k.as_ref()) == Some(v.as_ref()))
            })
        })
    }

    /// Nodes whose `key` value is one of `values`
    fn where_in<I, S>(self, key: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let values: Vec<S> = values.into_iter().collect();
        self.retain(|doc, id| {
            doc.get(id)
                .and_then(|node| node.attribute(key))
                .is_some_and(|value| values.iter().any(|v| v.as_ref() == value))
        })
    }

    /// Nodes that have `key` and whose value contains `substring`
    fn where_contains(self, key: &str, substring: &str) -> Self {
        self.retain(|doc, id| {
            doc.get(id)
                .and_then(|node| node.attribute(key))
                .is_some_and(|value| value.contains(substring))
        })
    }

    /// Direct children of `container_id`, or all its descendants when
    /// `recursive`. An absent id or a content node matches nothing.
    fn where_container(self, container_id: &str, recursive: bool) -> Self {
        let is_container = self
            .document()
            .get(container_id)
            .is_some_and(|node| node.is_container());
        self.retain(|doc, id| {
            is_container
                && if recursive {
                    doc.is_ancestor(container_id, id)
                } else {
                    doc.read_parent(id).ok().flatten() == Some(container_id)
                }
        })
    }

    fn where_type(self, kind: NodeKind) -> Self {
        self.retain(|doc, id| doc.get(id).is_some_and(|node| node.kind() == kind))
    }

    /// Content nodes holding at least one fragment named `identifier`
    fn where_has_fragment(self, identifier: &str) -> Self {
        self.retain(|doc, id| {
            doc.get(id)
                .and_then(|node| node.content_text())
                .is_some_and(|text| text.has_fragment(identifier))
        })
    }

    /// Nodes for which `predicate(id, attributes)` holds
    fn where_lambda<F>(self, mut predicate: F) -> Self
    where
        F: FnMut(&str, &Attributes) -> bool,
    {
        self.retain(|doc, id| {
            doc.get(id)
                .is_some_and(|node| predicate(id, node.attributes()))
        })
    }

    /// Drop the given ids from the match set
    fn where_not<I, S>(self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let excluded: Vec<S> = ids.into_iter().collect();
        self.retain(|_, id| !excluded.iter().any(|x| x.as_ref() == id))
    }

    // ------------------------------------------------------------------
    // Terminal accessors
    // ------------------------------------------------------------------

    fn get_ids(&self) -> Vec<String> {
        self.ids().to_vec()
    }

    fn get_count(&self) -> usize {
        self.ids().len()
    }

    fn get_first(&self) -> Option<&str> {
        self.get_at(0)
    }

    fn get_at(&self, index: usize) -> Option<&str> {
        self.ids().get(index).map(String::as_str)
    }

    fn has_results(&self) -> bool {
        !self.ids().is_empty()
    }

    /// Call `f` for every match, in order
    fn each<F>(&self, mut f: F)
    where
        F: FnMut(&str),
    {
        for id in self.ids() {
            f(id);
        }
    }
}
