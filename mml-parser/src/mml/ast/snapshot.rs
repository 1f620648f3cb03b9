//! Document snapshot: a normalized, serializable view of the tree
//!
//!     The snapshot is the single traversal shared by the treeviz, json and yaml
//!     formats; each of them only deals with presentation. Content nodes carry
//!     their rendered text and fragment map, containers carry their children.

use super::document::Document;
use super::node::{Node, NodeBody, NodeKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A snapshot of one node and everything below it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: String,
    pub kind: NodeKind,
    pub attributes: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub fragments: IndexMap<String, Vec<String>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeSnapshot>,
}

impl NodeSnapshot {
    /// Number of nodes in this subtree, itself included
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(NodeSnapshot::count).sum::<usize>()
    }
}

/// Snapshot the whole document, starting at the root
pub fn snapshot_document(doc: &Document) -> NodeSnapshot {
    snapshot_node(doc, doc.root())
}

fn snapshot_node(doc: &Document, node: &Node) -> NodeSnapshot {
    let attributes = node
        .attributes()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

    match node.body() {
        NodeBody::Container { children } => NodeSnapshot {
            id: node.id().to_string(),
            kind: NodeKind::Container,
            attributes,
            content: None,
            fragments: IndexMap::new(),
            children: children
                .iter()
                .filter_map(|child| doc.get(child))
                .map(|child| snapshot_node(doc, child))
                .collect(),
        },
        NodeBody::Content { text } => NodeSnapshot {
            id: node.id().to_string(),
            kind: NodeKind::Content,
            attributes,
            content: Some(text.render()),
            fragments: text.fragment_map(None),
            children: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mml::ast::ROOT_ID;

    #[test]
    fn test_snapshot_mirrors_tree() {
        let mut doc = Document::new();
        let section = doc.create_container(ROOT_ID, [("type", "s")]).unwrap();
        doc.create_node("hi <!-- %x -->there<!-- /%x -->", &section, [("k", "v")])
            .unwrap();

        let snapshot = snapshot_document(&doc);
        assert_eq!(snapshot.id, ROOT_ID);
        assert_eq!(snapshot.count(), 3);

        let content = &snapshot.children[0].children[0];
        assert_eq!(content.kind, NodeKind::Content);
        assert_eq!(content.attributes["k"], "v");
        assert_eq!(content.fragments["x"], vec!["there".to_string()]);
        assert_eq!(
            content.content.as_deref(),
            Some("hi <!-- %x -->there<!-- /%x -->")
        );
    }

    #[test]
    fn test_snapshot_json_omits_empty_fields() {
        let doc = Document::new();
        let json = serde_json::to_value(snapshot_document(&doc)).unwrap();
        assert_eq!(json["kind"], "container");
        assert!(json.get("children").is_none());
        assert!(json.get("content").is_none());
    }
}
