//! Nodes and node kinds

use super::attributes::Attributes;
use super::content::ContentText;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two addressable node kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Container,
    Content,
}

impl NodeKind {
    /// Prefix of generated ids: `c_…` for containers, `n_…` for content
    pub fn id_prefix(self) -> &'static str {
        match self {
            NodeKind::Container => "c",
            NodeKind::Content => "n",
        }
    }

    /// Marker tag: `@c` or `@n`
    pub fn tag(self) -> &'static str {
        match self {
            NodeKind::Container => "@c",
            NodeKind::Content => "@n",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Container => "container",
            NodeKind::Content => "content",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "container" | "c" => Ok(NodeKind::Container),
            "content" | "node" | "n" => Ok(NodeKind::Content),
            other => Err(format!("unknown node kind '{other}'")),
        }
    }
}

/// What a node holds: children or text, never both
#[derive(Debug, Clone, PartialEq)]
pub enum NodeBody {
    Container { children: Vec<String> },
    Content { text: ContentText },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: String,
    pub(crate) attributes: Attributes,
    pub(crate) body: NodeBody,
}

impl Node {
    pub(crate) fn container(id: String, attributes: Attributes) -> Self {
        Node {
            id,
            attributes,
            body: NodeBody::Container {
                children: Vec::new(),
            },
        }
    }

    pub(crate) fn content(id: String, attributes: Attributes, text: ContentText) -> Self {
        Node {
            id,
            attributes,
            body: NodeBody::Content { text },
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::Container { .. } => NodeKind::Container,
            NodeBody::Content { .. } => NodeKind::Content,
        }
    }

    pub fn is_container(&self) -> bool {
        self.kind() == NodeKind::Container
    }

    pub fn is_content(&self) -> bool {
        self.kind() == NodeKind::Content
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key)
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    /// Child ids, `None` for content nodes
    pub fn children(&self) -> Option<&[String]> {
        match &self.body {
            NodeBody::Container { children } => Some(children),
            NodeBody::Content { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut Vec<String>> {
        match &mut self.body {
            NodeBody::Container { children } => Some(children),
            NodeBody::Content { .. } => None,
        }
    }

    /// Segmented text, `None` for containers
    pub fn content_text(&self) -> Option<&ContentText> {
        match &self.body {
            NodeBody::Content { text } => Some(text),
            NodeBody::Container { .. } => None,
        }
    }

    pub(crate) fn content_text_mut(&mut self) -> Option<&mut ContentText> {
        match &mut self.body {
            NodeBody::Content { text } => Some(text),
            NodeBody::Container { .. } => None,
        }
    }

    /// Rendered text, `None` for containers
    pub fn text(&self) -> Option<String> {
        self.content_text().map(ContentText::render)
    }

    /// Content node owning at least one fragment
    pub fn owns_fragments(&self) -> bool {
        self.content_text()
            .is_some_and(|text| text.fragments().next().is_some())
    }
}
