//! Testing utilities: fluent document assertions
//!
//!     Tests that walk a document by hand (`read_children`, index, `read_content`,
//!     repeat) are long and break whenever the model shifts. [`assert_doc`]
//!     states the expected tree instead, and each failure message carries the
//!     path that led to it.
//!
//! Usage Example
//!
//!     ```rust,ignore
//!     use mml_parser::mml::testing::assert_doc;
//!
//!     let doc = Document::parse(source).unwrap();
//!     assert_doc(&doc)
//!         .root_id("root")
//!         .child_count(2)
//!         .child(0, |c| {
//!             c.is_container()
//!                 .attr("type", "chapter")
//!                 .child(0, |n| n.is_content().text("Once").fragments("genre", &["tale"]))
//!         })
//!         .node("n1", |n| n.attr("status", "done"));
//!     ```

use crate::mml::ast::{Document, Node, NodeKind};

/// Create an assertion builder for a document
pub fn assert_doc(doc: &Document) -> DocumentAssertion<'_> {
    DocumentAssertion { doc }
}

pub struct DocumentAssertion<'a> {
    doc: &'a Document,
}

impl<'a> DocumentAssertion<'a> {
    #[track_caller]
    pub fn root_id(self, expected: &str) -> Self {
        assert_eq!(self.doc.root_id(), expected, "root id");
        self
    }

    #[track_caller]
    pub fn node_count(self, expected: usize) -> Self {
        assert_eq!(self.doc.node_count(), expected, "node count");
        self
    }

    #[track_caller]
    pub fn missing(self, id: &str) -> Self {
        assert!(!self.doc.exists(id), "expected {id} to be absent");
        self
    }

    /// Assertions on the root's children
    #[track_caller]
    pub fn child_count(self, expected: usize) -> Self {
        self.root().child_count(expected);
        self
    }

    #[track_caller]
    pub fn child<F>(self, index: usize, f: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        self.root().child(index, f);
        self
    }

    /// Assertions on any node by id
    #[track_caller]
    pub fn node<F>(self, id: &str, f: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let node = self
            .doc
            .get(id)
            .unwrap_or_else(|| panic!("expected node {id} to exist"));
        f(NodeAssertion {
            doc: self.doc,
            node,
            context: id.to_string(),
        });
        self
    }

    fn root(&self) -> NodeAssertion<'a> {
        NodeAssertion {
            doc: self.doc,
            node: self.doc.root(),
            context: self.doc.root_id().to_string(),
        }
    }
}

pub struct NodeAssertion<'a> {
    doc: &'a Document,
    node: &'a Node,
    context: String,
}

impl<'a> NodeAssertion<'a> {
    #[track_caller]
    pub fn id(self, expected: &str) -> Self {
        assert_eq!(self.node.id(), expected, "{}: id", self.context);
        self
    }

    #[track_caller]
    pub fn id_prefix(self, prefix: &str) -> Self {
        assert!(
            self.node.id().starts_with(prefix),
            "{}: expected id starting with {prefix}, got {}",
            self.context,
            self.node.id()
        );
        self
    }

    #[track_caller]
    pub fn is_container(self) -> Self {
        assert_eq!(self.node.kind(), NodeKind::Container, "{}: kind", self.context);
        self
    }

    #[track_caller]
    pub fn is_content(self) -> Self {
        assert_eq!(self.node.kind(), NodeKind::Content, "{}: kind", self.context);
        self
    }

    #[track_caller]
    pub fn attr(self, key: &str, value: &str) -> Self {
        assert_eq!(
            self.node.attribute(key),
            Some(value),
            "{}: attribute {key}",
            self.context
        );
        self
    }

    #[track_caller]
    pub fn no_attr(self, key: &str) -> Self {
        assert_eq!(self.node.attribute(key), None, "{}: attribute {key}", self.context);
        self
    }

    /// Attribute keys in insertion order
    #[track_caller]
    pub fn attr_keys(self, expected: &[&str]) -> Self {
        let keys: Vec<&str> = self.node.attributes().keys().collect();
        assert_eq!(keys, expected, "{}: attribute order", self.context);
        self
    }

    #[track_caller]
    pub fn text(self, expected: &str) -> Self {
        assert_eq!(
            self.node.text().as_deref(),
            Some(expected),
            "{}: text",
            self.context
        );
        self
    }

    #[track_caller]
    pub fn text_contains(self, needle: &str) -> Self {
        let text = self.node.text().unwrap_or_default();
        assert!(
            text.contains(needle),
            "{}: expected text containing {needle:?}, got {text:?}",
            self.context
        );
        self
    }

    #[track_caller]
    pub fn fragments(self, identifier: &str, expected: &[&str]) -> Self {
        let map = self
            .node
            .content_text()
            .map(|text| text.fragment_map(Some(identifier)))
            .unwrap_or_default();
        let found: Vec<&str> = map
            .get(identifier)
            .map(|texts| texts.iter().map(String::as_str).collect())
            .unwrap_or_default();
        assert_eq!(found, expected, "{}: fragments {identifier}", self.context);
        self
    }

    #[track_caller]
    pub fn child_count(self, expected: usize) -> Self {
        let count = self.node.children().map_or(0, <[String]>::len);
        assert_eq!(count, expected, "{}: child count", self.context);
        self
    }

    #[track_caller]
    pub fn child_ids(self, expected: &[&str]) -> Self {
        let ids: Vec<&str> = self
            .node
            .children()
            .unwrap_or_default()
            .iter()
            .map(String::as_str)
            .collect();
        assert_eq!(ids, expected, "{}: children", self.context);
        self
    }

    #[track_caller]
    pub fn child<F>(self, index: usize, f: F) -> Self
    where
        F: FnOnce(NodeAssertion<'a>) -> NodeAssertion<'a>,
    {
        let children = self.node.children().unwrap_or_default();
        let child_id = children.get(index).unwrap_or_else(|| {
            panic!(
                "{}: no child {index} ({} children)",
                self.context,
                children.len()
            )
        });
        let node = self
            .doc
            .get(child_id)
            .unwrap_or_else(|| panic!("{}: dangling child {child_id}", self.context));
        f(NodeAssertion {
            doc: self.doc,
            node,
            context: format!("{} > {}", self.context, child_id),
        });
        self
    }
}
