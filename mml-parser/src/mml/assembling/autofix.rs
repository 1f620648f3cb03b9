//! Autofix stage
//!
//!     Receives the IR from the structural pass and builds the document. The
//!     repairs run in this order, each over the whole tree:
//!
//!         1. Content nodes with blank text and no attributes are dropped.
//!         2. Loose text runs that are not blank are wrapped into fresh,
//!            attribute-less content nodes (blank runs are dropped).
//!         3. A top level holding exactly one container makes it the root; any
//!            content nodes beside it move inside, leading ones before its
//!            children and trailing ones after. With no container or several,
//!            a root container is synthesized and the top level nodes become
//!            its children, in order. It takes the id `root` when that id is
//!            free and carries `type="root"`.
//!         4. Every node is inserted into the document: content text is trimmed
//!            and segmented into fragments, missing and duplicate ids are
//!            replaced by generated ones.
//!
//!     Each repair is logged at debug level under the `mml.autofix` target.

use crate::mml::ast::{Attributes, ContentText, Document, IdGenerator, Node, NodeKind, ROOT_ID};
use crate::mml::error::MmlResult;
use crate::mml::parsing::ParseNode;
use crate::mml::transforms::Runnable;
use std::collections::HashSet;

/// Repair the IR and assemble a [`Document`]
#[derive(Debug, Clone, Default)]
pub struct Autofix {
    seed: Option<u64>,
}

impl Autofix {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a deterministic id generator
    pub fn seeded(seed: u64) -> Self {
        Autofix { seed: Some(seed) }
    }

    pub fn with_seed(seed: Option<u64>) -> Self {
        Autofix { seed }
    }

    pub fn apply(&self, nodes: Vec<ParseNode>) -> Document {
        let nodes = drop_blank_content(nodes);
        let nodes = wrap_loose_text(nodes);
        let (root_id, root_attributes, children) = ensure_root(nodes);

        let mut ids = match self.seed {
            Some(seed) => IdGenerator::seeded(seed),
            None => IdGenerator::new(),
        };
        let mut explicit: Vec<&str> = root_id.as_deref().into_iter().collect();
        for child in &children {
            child.collect_ids(&mut explicit);
        }
        for id in explicit {
            ids.reserve(id);
        }

        let mut assembler = Assembler::default();
        let root_id = assembler.assign(&mut ids, root_id, NodeKind::Container);
        let mut doc = Document::from_root(Node::container(root_id.clone(), root_attributes), ids);
        for child in children {
            assembler.insert(&mut doc, child, &root_id);
        }

        log::debug!(target: "mml.autofix", "assembled document with {} node(s)", doc.node_count());
        doc
    }
}

impl Runnable<Vec<ParseNode>, Document> for Autofix {
    fn run(&self, nodes: Vec<ParseNode>) -> MmlResult<Document> {
        Ok(self.apply(nodes))
    }
}

fn is_blank_content(node: &ParseNode) -> bool {
    matches!(
        node,
        ParseNode::Content { attributes, text, .. } if attributes.is_empty() && text.trim().is_empty()
    )
}

fn drop_blank_content(nodes: Vec<ParseNode>) -> Vec<ParseNode> {
    nodes
        .into_iter()
        .filter_map(|node| {
            if is_blank_content(&node) {
                log::debug!(
                    target: "mml.autofix",
                    "dropping empty content node {}",
                    node.id().unwrap_or("<unnamed>")
                );
                return None;
            }
            Some(match node {
                ParseNode::Container {
                    id,
                    attributes,
                    children,
                } => ParseNode::Container {
                    id,
                    attributes,
                    children: drop_blank_content(children),
                },
                other => other,
            })
        })
        .collect()
}

fn wrap_loose_text(nodes: Vec<ParseNode>) -> Vec<ParseNode> {
    nodes
        .into_iter()
        .filter_map(|node| match node {
            ParseNode::Loose(text) if text.trim().is_empty() => None,
            ParseNode::Loose(text) => {
                log::debug!(target: "mml.autofix", "wrapping loose text {:?}", snippet(&text));
                Some(ParseNode::Content {
                    id: None,
                    attributes: Attributes::new(),
                    text,
                })
            }
            ParseNode::Container {
                id,
                attributes,
                children,
            } => Some(ParseNode::Container {
                id,
                attributes,
                children: wrap_loose_text(children),
            }),
            content => Some(content),
        })
        .collect()
}

/// Id, attributes and children of the root container.
///
/// A lone top level container is the root; content beside it (typically
/// wrapped loose text typed above or below the markers) moves inside it,
/// leading nodes first and trailing nodes last.
fn ensure_root(mut nodes: Vec<ParseNode>) -> (Option<String>, Attributes, Vec<ParseNode>) {
    if nodes.iter().filter(|node| node.is_container()).count() == 1 {
        let mut leading = Vec::new();
        let mut trailing = Vec::new();
        let mut root: Option<(Option<String>, Attributes, Vec<ParseNode>)> = None;
        for node in std::mem::take(&mut nodes) {
            match node {
                ParseNode::Container {
                    id,
                    attributes,
                    children,
                } => root = Some((id, attributes, children)),
                other if root.is_none() => leading.push(other),
                other => trailing.push(other),
            }
        }
        if let Some((id, attributes, children)) = root {
            if !leading.is_empty() || !trailing.is_empty() {
                log::debug!(
                    target: "mml.autofix",
                    "moving {} leading and {} trailing node(s) into root {}",
                    leading.len(),
                    trailing.len(),
                    id.as_deref().unwrap_or("<unnamed>")
                );
            }
            leading.extend(children);
            leading.extend(trailing);
            return (id, attributes, leading);
        }
        nodes = leading;
    }

    let mut taken = Vec::new();
    for node in &nodes {
        node.collect_ids(&mut taken);
    }
    let id = if taken.contains(&ROOT_ID) {
        None
    } else {
        Some(ROOT_ID.to_string())
    };
    log::debug!(
        target: "mml.autofix",
        "synthesizing root container over {} top level node(s)",
        nodes.len()
    );
    (id, Attributes::from_iter([("type", "root")]), nodes)
}

fn snippet(text: &str) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() > 40 {
        format!("{}...", trimmed.chars().take(40).collect::<String>())
    } else {
        trimmed.to_string()
    }
}

#[derive(Default)]
struct Assembler {
    placed: HashSet<String>,
}

impl Assembler {
    /// The id a node ends up with: its own unless missing or already used
    fn assign(&mut self, ids: &mut IdGenerator, id: Option<String>, kind: NodeKind) -> String {
        match id {
            Some(id) if self.placed.insert(id.clone()) => id,
            Some(duplicate) => {
                let fresh = ids.generate(kind);
                self.placed.insert(fresh.clone());
                log::debug!(target: "mml.autofix", "duplicate id {duplicate} renamed to {fresh}");
                fresh
            }
            None => {
                let fresh = ids.generate(kind);
                self.placed.insert(fresh.clone());
                fresh
            }
        }
    }

    fn insert(&mut self, doc: &mut Document, node: ParseNode, parent: &str) {
        match node {
            ParseNode::Container {
                id,
                attributes,
                children,
            } => {
                let id = self.assign(doc.ids_mut(), id, NodeKind::Container);
                doc.insert_child(Node::container(id.clone(), attributes), parent);
                for child in children {
                    self.insert(doc, child, &id);
                }
            }
            ParseNode::Content {
                id,
                attributes,
                text,
            } => {
                let id = self.assign(doc.ids_mut(), id, NodeKind::Content);
                let text = ContentText::parse(text.trim());
                doc.insert_child(Node::content(id, attributes, text), parent);
            }
            ParseNode::Loose(_) => {}
        }
    }
}
