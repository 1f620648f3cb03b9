//! The document: node store, parent index and the CRUD API
//!
//!     Validation (existence, kind, attribute and content rules) always happens
//!     before mutation, so a failing call leaves the tree untouched.
//!
//! Text Round Trip
//!
//!     The API stores content verbatim, but parsing trims content text and
//!     drops content nodes that are blank and attribute-less. So after a
//!     serialize/parse cycle, `create_node("  padded  ")` reads back as
//!     `"padded"` and a node created with empty text and no attributes is
//!     gone. Give such a node an attribute to keep it.
//!
//! Ownership
//!
//!     `nodes` owns every node. Structure is expressed twice: each container's
//!     child id list (ordering) and `parents` (child id to parent id). Both are
//!     only changed together, by `attach` and `detach`.

use super::attributes::Attributes;
use super::content::ContentText;
use super::ids::IdGenerator;
use super::node::{Node, NodeKind};
use crate::mml::error::{MmlError, MmlResult};
use crate::mml::formats::markup::{serialize_document, SerializeOptions};
use crate::mml::lexing::contains_structural_marker;
use crate::mml::transforms::standard::{parse_pipeline, STRING_TO_DOCUMENT};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Conventional id of the root container
pub const ROOT_ID: &str = "root";

/// Options for parsing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Seed for generated ids; `None` seeds from the OS
    pub id_seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Document {
    root: String,
    nodes: HashMap<String, Node>,
    parents: HashMap<String, String>,
    ids: IdGenerator,
}

impl PartialEq for Document {
    /// Structural equality: same ids, kinds, attributes, child order, content
    /// and fragments. The id generator state is not part of the tree.
    fn eq(&self, other: &Self) -> bool {
        self.root == other.root && self.nodes == other.nodes && self.parents == other.parents
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// An empty document: just the root container
    pub fn new() -> Self {
        Self::with_generator(IdGenerator::new())
    }

    fn with_generator(mut ids: IdGenerator) -> Self {
        ids.reserve(ROOT_ID);
        let root = Node::container(
            ROOT_ID.to_string(),
            Attributes::from_iter([("type", "root")]),
        );
        Document {
            root: ROOT_ID.to_string(),
            nodes: HashMap::from([(ROOT_ID.to_string(), root)]),
            parents: HashMap::new(),
            ids,
        }
    }

    /// Assemble a document from a root node. Used by autofix, which has
    /// already reserved every id in `ids`.
    pub(crate) fn from_root(root: Node, ids: IdGenerator) -> Self {
        let root_id = root.id().to_string();
        Document {
            root: root_id.clone(),
            nodes: HashMap::from([(root_id, root)]),
            parents: HashMap::new(),
            ids,
        }
    }

    /// Parse text, repairing any structural damage (see autofix).
    pub fn parse(text: &str) -> MmlResult<Document> {
        STRING_TO_DOCUMENT.run(text.to_string())
    }

    /// Parse with explicit options
    pub fn parse_with(text: &str, options: &ParseOptions) -> MmlResult<Document> {
        parse_pipeline(options).run(text.to_string())
    }

    /// Emit the document as mml markup.
    ///
    /// Parsing the output yields an equal document, except that content text
    /// is trimmed and blank, attribute-less content nodes are dropped (see the
    /// module docs).
    pub fn serialize(&self) -> String {
        serialize_document(self, &SerializeOptions::default())
    }

    pub fn serialize_with(&self, options: &SerializeOptions) -> String {
        serialize_document(self, options)
    }

    // ------------------------------------------------------------------
    // Lookup
    // ------------------------------------------------------------------

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn root(&self) -> &Node {
        &self.nodes[&self.root]
    }

    pub fn get(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node(&self, id: &str) -> MmlResult<&Node> {
        self.nodes.get(id).ok_or_else(|| MmlError::not_found(id))
    }

    fn node_mut(&mut self, id: &str) -> MmlResult<&mut Node> {
        self.nodes.get_mut(id).ok_or_else(|| MmlError::not_found(id))
    }

    fn container(&self, id: &str) -> MmlResult<&Node> {
        let node = self.node(id)?;
        if !node.is_container() {
            return Err(MmlError::invalid(format!("{id} is not a container")));
        }
        Ok(node)
    }

    fn content_node(&self, id: &str) -> MmlResult<&Node> {
        let node = self.node(id)?;
        if !node.is_content() {
            return Err(MmlError::invalid(format!("{id} is a container")));
        }
        Ok(node)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, root included
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Every live id in document order (depth first, pre-order, root first)
    pub fn all_ids(&self) -> Vec<String> {
        let mut ids = vec![self.root.clone()];
        ids.extend(self.descendants_of(&self.root));
        ids
    }

    /// Every descendant id of a container in document order. Empty for
    /// content nodes and unknown ids.
    pub fn descendants_of(&self, container_id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let Some(children) = self.get(container_id).and_then(Node::children) else {
            return out;
        };
        let mut stack: Vec<&String> = children.iter().rev().collect();
        while let Some(id) = stack.pop() {
            out.push(id.clone());
            if let Some(grandchildren) = self.get(id).and_then(Node::children) {
                stack.extend(grandchildren.iter().rev());
            }
        }
        out
    }

    /// True if `ancestor` is a proper ancestor of `id`
    pub fn is_ancestor(&self, ancestor: &str, id: &str) -> bool {
        let mut current = self.parents.get(id);
        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.parents.get(parent);
        }
        false
    }

    /// Depth below the root (root is 0)
    pub fn depth(&self, id: &str) -> usize {
        let mut depth = 0;
        let mut current = self.parents.get(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parents.get(parent);
        }
        depth
    }

    // ------------------------------------------------------------------
    // Create
    // ------------------------------------------------------------------

    /// Append a new container to `parent_id`, returning its generated id
    pub fn create_container<I, K, V>(&mut self, parent_id: &str, attributes: I) -> MmlResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: Attributes = attributes.into_iter().collect();
        attributes.validate()?;
        self.container(parent_id)?;

        let id = self.ids.generate(NodeKind::Container);
        self.nodes
            .insert(id.clone(), Node::container(id.clone(), attributes));
        self.attach(&id, parent_id, None);
        Ok(id)
    }

    /// Append a new content node to `parent_id`, returning its generated id
    pub fn create_node<I, K, V>(
        &mut self,
        content: &str,
        parent_id: &str,
        attributes: I,
    ) -> MmlResult<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: Attributes = attributes.into_iter().collect();
        attributes.validate()?;
        validate_content(content)?;
        self.container(parent_id)?;

        let id = self.ids.generate(NodeKind::Content);
        self.nodes.insert(
            id.clone(),
            Node::content(id.clone(), attributes, ContentText::parse(content)),
        );
        self.attach(&id, parent_id, None);
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn read_content(&self, id: &str) -> MmlResult<String> {
        Ok(self.content_node(id)?.text().unwrap_or_default())
    }

    pub fn read_attribute(&self, id: &str, key: &str) -> MmlResult<Option<&str>> {
        Ok(self.node(id)?.attribute(key))
    }

    pub fn read_attributes(&self, id: &str) -> MmlResult<&Attributes> {
        Ok(self.node(id)?.attributes())
    }

    pub fn read_children(&self, container_id: &str) -> MmlResult<&[String]> {
        Ok(self
            .container(container_id)?
            .children()
            .unwrap_or_default())
    }

    /// Parent id, `None` for the root
    pub fn read_parent(&self, id: &str) -> MmlResult<Option<&str>> {
        self.node(id)?;
        Ok(self.parents.get(id).map(String::as_str))
    }

    pub fn read_type(&self, id: &str) -> MmlResult<NodeKind> {
        Ok(self.node(id)?.kind())
    }

    /// Fragment texts of a content node grouped by identifier
    pub fn get_fragments(
        &self,
        content_id: &str,
        identifier: Option<&str>,
    ) -> MmlResult<IndexMap<String, Vec<String>>> {
        let node = self.content_node(content_id)?;
        Ok(node
            .content_text()
            .map(|text| text.fragment_map(identifier))
            .unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Update
    // ------------------------------------------------------------------

    pub fn update_content(&mut self, id: &str, text: &str) -> MmlResult<()> {
        self.content_node(id)?;
        validate_content(text)?;
        if let Some(content) = self.node_mut(id)?.content_text_mut() {
            *content = ContentText::parse(text);
        }
        Ok(())
    }

    /// Replace the text of occurrence `index` (zero based) of `identifier`
    pub fn update_fragment(
        &mut self,
        content_id: &str,
        identifier: &str,
        index: usize,
        text: &str,
    ) -> MmlResult<()> {
        self.content_node(content_id)?;
        match self.node_mut(content_id)?.content_text_mut() {
            Some(content) => content.set_fragment(identifier, index, text),
            None => Err(MmlError::invalid(format!("{content_id} is a container"))),
        }
    }

    pub fn update_attribute(&mut self, id: &str, key: &str, value: &str) -> MmlResult<()> {
        Attributes::validate_pair(key, value)?;
        self.node_mut(id)?.attributes.insert(key, value);
        Ok(())
    }

    pub fn update_attributes<I, K, V>(&mut self, id: &str, attributes: I) -> MmlResult<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let attributes: Attributes = attributes.into_iter().collect();
        attributes.validate()?;
        self.node_mut(id)?.attributes.extend_from(&attributes);
        Ok(())
    }

    /// Remove an attribute; absent keys are a no-op
    pub fn delete_attribute(&mut self, id: &str, key: &str) -> MmlResult<()> {
        self.node_mut(id)?.attributes.remove(key);
        Ok(())
    }

    // ------------------------------------------------------------------
    // Structure
    // ------------------------------------------------------------------

    /// Delete a node and, for containers, every descendant
    pub fn delete_node(&mut self, id: &str) -> MmlResult<()> {
        self.node(id)?;
        if id == self.root {
            return Err(MmlError::invalid("the root container cannot be deleted"));
        }
        let doomed = self.descendants_of(id);
        self.detach(id);
        for victim in doomed.iter().map(String::as_str).chain([id]) {
            self.nodes.remove(victim);
            self.parents.remove(victim);
        }
        log::debug!(target: "mml.document", "deleted {id} and {} descendants", doomed.len());
        Ok(())
    }

    /// Move `id` under `new_parent_id` at `position` (append when `None`;
    /// positions past the end append).
    pub fn move_node(
        &mut self,
        id: &str,
        new_parent_id: &str,
        position: Option<usize>,
    ) -> MmlResult<()> {
        self.node(id)?;
        self.container(new_parent_id)?;
        if id == self.root {
            return Err(MmlError::invalid("the root container cannot be moved"));
        }
        if id == new_parent_id || self.is_ancestor(id, new_parent_id) {
            return Err(MmlError::invalid(format!(
                "cannot move {id} into itself or its own descendant {new_parent_id}"
            )));
        }
        self.detach(id);
        self.attach(id, new_parent_id, position);
        Ok(())
    }

    /// Stable sort of a container's direct children by a derived key
    pub fn sort_children<K, F>(&mut self, container_id: &str, mut key_fn: F) -> MmlResult<()>
    where
        K: Ord,
        F: FnMut(&Node) -> K,
    {
        let mut children = self.read_children(container_id)?.to_vec();
        children.sort_by_cached_key(|child| key_fn(&self.nodes[child]));
        self.replace_children(container_id, children)
    }

    /// Replace a container's child order with a permutation of itself
    pub(crate) fn replace_children(
        &mut self,
        container_id: &str,
        order: Vec<String>,
    ) -> MmlResult<()> {
        let node = self.node_mut(container_id)?;
        match node.children_mut() {
            Some(children) => {
                debug_assert_eq!(children.len(), order.len());
                *children = order;
                Ok(())
            }
            None => Err(MmlError::invalid(format!("{container_id} is not a container"))),
        }
    }

    /// Literal marker text for embedding a fragment into content by hand
    pub fn generate_fragment_markup(identifier: &str, text: &str) -> String {
        ContentText::fragment_markup(identifier, text)
    }

    // ------------------------------------------------------------------
    // Internals shared with autofix
    // ------------------------------------------------------------------

    pub(crate) fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    /// Insert an already validated child under `parent_id` (a container).
    pub(crate) fn insert_child(&mut self, node: Node, parent_id: &str) {
        let id = node.id().to_string();
        self.nodes.insert(id.clone(), node);
        self.attach(&id, parent_id, None);
    }

    fn attach(&mut self, id: &str, parent_id: &str, position: Option<usize>) {
        if let Some(children) = self.nodes.get_mut(parent_id).and_then(Node::children_mut) {
            let at = position.unwrap_or(children.len()).min(children.len());
            children.insert(at, id.to_string());
            self.parents.insert(id.to_string(), parent_id.to_string());
        }
    }

    fn detach(&mut self, id: &str) {
        if let Some(parent) = self.parents.remove(id) {
            if let Some(children) = self.nodes.get_mut(&parent).and_then(Node::children_mut) {
                children.retain(|child| child != id);
            }
        }
    }
}

/// Content stored in a node may carry fragments but never structure
fn validate_content(text: &str) -> MmlResult<()> {
    if contains_structural_marker(text) {
        return Err(MmlError::invalid(
            "content may not contain container or node markers",
        ));
    }
    Ok(())
}
