//! Treeviz formatter
//!
//! One line per node, nesting drawn with box connectors, which makes a tree
//! quick to scan:
//!
//!     ⧉ root {type=root}
//!     ├─ ▤ c_0a1b2c3d {type=chapter}
//!     │ └─ ¶ n_4e5f6a7b "Once upon a time…" %genre×2
//!     └─ ¶ n_8c9d0e1f "The end"
//!
//! Icons
//!     Root: ⧉
//!     Container: ▤
//!     Content: ¶
//!
//! Content labels are the node text on one line, truncated to the configured
//! width. Fragments are summarized per identifier with their occurrence count.

use super::registry::Formatter;
use crate::mml::ast::{snapshot_document, Document, NodeKind, NodeSnapshot};
use crate::mml::error::MmlResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreevizOptions {
    /// Maximum characters of content text shown per line
    pub label_width: usize,
    pub show_attributes: bool,
}

impl Default for TreevizOptions {
    fn default() -> Self {
        TreevizOptions {
            label_width: 30,
            show_attributes: true,
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push('…');
        truncated
    } else {
        s.to_string()
    }
}

fn icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Container => "▤",
        NodeKind::Content => "¶",
    }
}

fn label(snapshot: &NodeSnapshot, options: &TreevizOptions) -> String {
    let mut label = snapshot.id.clone();
    if options.show_attributes && !snapshot.attributes.is_empty() {
        let pairs: Vec<String> = snapshot
            .attributes
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        label.push_str(&format!(" {{{}}}", pairs.join(", ")));
    }
    if let Some(content) = &snapshot.content {
        let flat = content.split_whitespace().collect::<Vec<_>>().join(" ");
        label.push_str(&format!(" \"{}\"", truncate(&flat, options.label_width)));
    }
    for (identifier, occurrences) in &snapshot.fragments {
        label.push_str(&format!(" %{identifier}×{}", occurrences.len()));
    }
    label
}

fn format_snapshot(
    snapshot: &NodeSnapshot,
    prefix: &str,
    is_last: bool,
    options: &TreevizOptions,
    output: &mut String,
) {
    let connector = if is_last { "└─" } else { "├─" };
    output.push_str(&format!(
        "{prefix}{connector} {} {}\n",
        icon(snapshot.kind),
        label(snapshot, options)
    ));

    let child_prefix = format!("{prefix}{}", if is_last { "  " } else { "│ " });
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, &child_prefix, i + 1 == count, options, output);
    }
}

pub fn to_treeviz_str(doc: &Document, options: &TreevizOptions) -> String {
    let snapshot = snapshot_document(doc);
    let mut output = format!("⧉ {}\n", label(&snapshot, options));
    let count = snapshot.children.len();
    for (i, child) in snapshot.children.iter().enumerate() {
        format_snapshot(child, "", i + 1 == count, options, &mut output);
    }
    output
}

/// Formatter implementation for treeviz format
#[derive(Debug, Clone, Default)]
pub struct TreevizFormatter {
    options: TreevizOptions,
}

impl TreevizFormatter {
    pub fn new(options: TreevizOptions) -> Self {
        TreevizFormatter { options }
    }
}

impl Formatter for TreevizFormatter {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn serialize(&self, doc: &Document) -> MmlResult<String> {
        Ok(to_treeviz_str(doc, &self.options))
    }

    fn description(&self) -> &str {
        "Visual tree representation with connectors and icons"
    }
}
