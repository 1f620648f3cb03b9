//! Intermediate representation produced by the structural pass
//!
//! The IR describes the nesting found in the source without any of the
//! document invariants: ids may be missing or duplicated, loose text may sit
//! next to nodes, and there may be any number of top level nodes.

use crate::mml::ast::Attributes;

/// A node in the parse tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseNode {
    Container {
        id: Option<String>,
        attributes: Attributes,
        children: Vec<ParseNode>,
    },
    Content {
        id: Option<String>,
        attributes: Attributes,
        /// Raw text between the markers, fragment markers included
        text: String,
    },
    /// Text outside any content node
    Loose(String),
}

impl ParseNode {
    pub fn is_container(&self) -> bool {
        matches!(self, ParseNode::Container { .. })
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            ParseNode::Container { id, .. } | ParseNode::Content { id, .. } => id.as_deref(),
            ParseNode::Loose(_) => None,
        }
    }

    pub fn children(&self) -> &[ParseNode] {
        match self {
            ParseNode::Container { children, .. } => children,
            _ => &[],
        }
    }

    /// Explicit ids of this node and everything below it, in document order
    pub fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        if let Some(id) = self.id() {
            out.push(id);
        }
        for child in self.children() {
            child.collect_ids(out);
        }
    }
}
