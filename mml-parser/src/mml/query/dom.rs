//! The document holder and the two query flavours

use super::selection::Selection;
use crate::mml::ast::{Attributes, Document};
use crate::mml::error::{MmlError, MmlResult};
use indexmap::IndexMap;

/// Holder of at most one document; the entry point for queries
#[derive(Debug, Clone, Default)]
pub struct Dom {
    document: Option<Document>,
}

impl Dom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `text` and make it the current document
    pub fn set_document(&mut self, text: &str) -> MmlResult<()> {
        self.document = Some(Document::parse(text)?);
        Ok(())
    }

    /// Make an already built document current
    pub fn load(&mut self, document: Document) {
        self.document = Some(document);
    }

    /// Serialize the current document
    pub fn get_document(&self) -> MmlResult<String> {
        Ok(self.document()?.serialize())
    }

    pub fn document(&self) -> MmlResult<&Document> {
        self.document.as_ref().ok_or_else(no_document)
    }

    pub fn document_mut(&mut self) -> MmlResult<&mut Document> {
        self.document.as_mut().ok_or_else(no_document)
    }

    pub fn take_document(&mut self) -> Option<Document> {
        self.document.take()
    }

    /// A read-only query over every node
    pub fn query(&self) -> MmlResult<Query<'_>> {
        Ok(Query::new(self.document()?))
    }

    /// A query over every node that can also mutate the document
    pub fn query_mut(&mut self) -> MmlResult<QueryMut<'_>> {
        Ok(QueryMut::new(self.document_mut()?))
    }
}

fn no_document() -> MmlError {
    MmlError::invalid("no document loaded")
}

/// Read-only view: a shared borrow and a match set
#[derive(Debug, Clone)]
pub struct Query<'d> {
    doc: &'d Document,
    matches: Vec<String>,
}

impl<'d> Query<'d> {
    pub fn new(doc: &'d Document) -> Self {
        Query {
            matches: doc.all_ids(),
            doc,
        }
    }
}

impl Selection for Query<'_> {
    fn document(&self) -> &Document {
        self.doc
    }

    fn ids(&self) -> &[String] {
        &self.matches
    }

    fn parts(&mut self) -> (&Document, &mut Vec<String>) {
        (self.doc, &mut self.matches)
    }
}

/// Mutating view: an exclusive borrow, a match set and the bulk operations
#[derive(Debug)]
pub struct QueryMut<'d> {
    doc: &'d mut Document,
    matches: Vec<String>,
    skipped: usize,
}

impl Selection for QueryMut<'_> {
    fn document(&self) -> &Document {
        &*self.doc
    }

    fn ids(&self) -> &[String] {
        &self.matches
    }

    fn parts(&mut self) -> (&Document, &mut Vec<String>) {
        (&*self.doc, &mut self.matches)
    }
}

impl<'d> QueryMut<'d> {
    pub fn new(doc: &'d mut Document) -> Self {
        QueryMut {
            matches: doc.all_ids(),
            doc,
            skipped: 0,
        }
    }

    /// Items skipped by bulk operations so far
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn skip(&mut self, op: &str, id: &str, err: &MmlError) {
        self.skipped += 1;
        log::warn!(target: "mml.query", "{op}: skipping {id}: {err}");
    }

    /// Set the given attributes on every match
    pub fn bulk_set_attributes<I, K, V>(&mut self, attributes: I) -> MmlResult<&mut Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: Attributes = attributes.into_iter().collect();
        attributes.validate()?;

        for id in self.matches.clone() {
            if let Err(err) = self.doc.update_attributes(&id, &attributes) {
                self.skip("bulk_set_attributes", &id, &err);
            }
        }
        Ok(self)
    }

    /// Replace the text of every matched content node with
    /// `transform(old_text, attributes)`. Containers are passed over.
    pub fn bulk_set_content<F>(&mut self, mut transform: F) -> MmlResult<&mut Self>
    where
        F: FnMut(&str, &Attributes) -> String,
    {
        let targets: Vec<String> = self
            .matches
            .iter()
            .filter(|id| self.doc.get(id).is_some_and(|node| node.is_content()))
            .cloned()
            .collect();
        if targets.is_empty() && !self.matches.is_empty() {
            return Err(MmlError::invalid(
                "bulk_set_content needs content nodes, the match set holds only containers",
            ));
        }

        for id in targets {
            let result = match self.doc.get(&id) {
                Some(node) => {
                    let old = node.text().unwrap_or_default();
                    let new = transform(&old, node.attributes());
                    self.doc.update_content(&id, &new)
                }
                None => Err(MmlError::not_found(&id)),
            };
            if let Err(err) = result {
                self.skip("bulk_set_content", &id, &err);
            }
        }
        Ok(self)
    }

    /// Delete every match (containers with their subtrees). Returns how many
    /// matched nodes were removed at the top level, i.e. not as part of the
    /// subtree of another match. The root is never deleted. The match set is
    /// empty afterwards.
    pub fn bulk_delete(&mut self) -> MmlResult<usize> {
        let root = self.doc.root_id().to_string();
        let mut matches = std::mem::take(&mut self.matches);
        matches.retain(|id| *id != root);
        let top_level: Vec<&String> = matches
            .iter()
            .filter(|id| {
                !matches
                    .iter()
                    .any(|other| other != *id && self.doc.is_ancestor(other, id))
            })
            .collect();

        let mut removed = 0;
        for id in top_level {
            match self.doc.delete_node(id) {
                Ok(()) => removed += 1,
                Err(err) => self.skip("bulk_delete", id, &err),
            }
        }
        log::debug!(target: "mml.query", "bulk_delete removed {removed} node(s)");
        Ok(removed)
    }

    /// Append every match to `target_id`, in match order. The root and moves
    /// into a node's own subtree are skipped.
    pub fn bulk_move(&mut self, target_id: &str) -> MmlResult<&mut Self> {
        if !self.doc.node(target_id)?.is_container() {
            return Err(MmlError::invalid(format!("{target_id} is not a container")));
        }
        for id in self.matches.clone() {
            if let Err(err) = self.doc.move_node(&id, target_id, None) {
                self.skip("bulk_move", &id, &err);
            }
        }
        Ok(self)
    }

    /// For each parent of matched nodes, sort the matched children among
    /// themselves by the value of `key` (missing sorts as empty). Sorting is
    /// stable, and the sorted nodes go back into the slots matched children
    /// held before, so unmatched siblings keep their positions.
    pub fn sort_parents_children(&mut self, key: &str, reverse: bool) -> MmlResult<&mut Self> {
        let mut by_parent: IndexMap<String, Vec<String>> = IndexMap::new();
        for id in &self.matches {
            if let Ok(Some(parent)) = self.doc.read_parent(id) {
                by_parent
                    .entry(parent.to_string())
                    .or_default()
                    .push(id.clone());
            }
        }

        for (parent, matched) in by_parent {
            let siblings = self.doc.read_children(&parent)?.to_vec();
            let slots: Vec<usize> = siblings
                .iter()
                .enumerate()
                .filter(|(_, id)| matched.contains(id))
                .map(|(i, _)| i)
                .collect();

            let mut sorted: Vec<String> = slots.iter().map(|&i| siblings[i].clone()).collect();
            let value = |id: &String| -> String {
                self.doc
                    .get(id)
                    .and_then(|node| node.attribute(key))
                    .unwrap_or_default()
                    .to_string()
            };
            if reverse {
                sorted.sort_by_cached_key(|id| std::cmp::Reverse(value(id)));
            } else {
                sorted.sort_by_cached_key(value);
            }

            let mut order = siblings;
            for (slot, id) in slots.into_iter().zip(sorted) {
                order[slot] = id;
            }
            self.doc.replace_children(&parent, order)?;
        }
        Ok(self)
    }
}
