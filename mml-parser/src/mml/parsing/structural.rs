//! Structural pass: marker stream to [`ParseNode`] tree

use super::ir::ParseNode;
use crate::mml::ast::{Attributes, NodeKind};
use crate::mml::token::{Marker, TokenStream};

/// An open node waiting for its closer
enum Frame {
    Container {
        id: Option<String>,
        attributes: Attributes,
        children: Vec<ParseNode>,
    },
    Content {
        id: Option<String>,
        attributes: Attributes,
        text: String,
    },
}

impl Frame {
    fn open(kind: NodeKind, id: Option<String>, attributes: Attributes) -> Self {
        match kind {
            NodeKind::Container => Frame::Container {
                id,
                attributes,
                children: Vec::new(),
            },
            NodeKind::Content => Frame::Content {
                id,
                attributes,
                text: String::new(),
            },
        }
    }

    fn into_node(self) -> ParseNode {
        match self {
            Frame::Container {
                id,
                attributes,
                children,
            } => ParseNode::Container {
                id,
                attributes,
                children,
            },
            Frame::Content {
                id,
                attributes,
                text,
            } => ParseNode::Content {
                id,
                attributes,
                text,
            },
        }
    }
}

struct Builder {
    top: Vec<ParseNode>,
    stack: Vec<Frame>,
}

impl Builder {
    fn siblings(&mut self) -> &mut Vec<ParseNode> {
        for frame in self.stack.iter_mut().rev() {
            if let Frame::Container { children, .. } = frame {
                return children;
            }
        }
        &mut self.top
    }

    fn push_text(&mut self, raw: &str) {
        if let Some(Frame::Content { text, .. }) = self.stack.last_mut() {
            text.push_str(raw);
            return;
        }
        let siblings = self.siblings();
        match siblings.last_mut() {
            Some(ParseNode::Loose(run)) => run.push_str(raw),
            _ => siblings.push(ParseNode::Loose(raw.to_string())),
        }
    }

    fn close_top(&mut self) {
        if let Some(frame) = self.stack.pop() {
            let node = frame.into_node();
            self.siblings().push(node);
        }
    }

    /// Content nodes cannot hold structure: any structural marker ends one
    fn close_open_content(&mut self, reason: &str) {
        if let Some(Frame::Content { id, .. }) = self.stack.last() {
            log::debug!(
                target: "mml.autofix",
                "implicitly closing content node {} ({reason})",
                id.as_deref().unwrap_or("<unnamed>")
            );
            self.close_top();
        }
    }

    fn open(&mut self, kind: NodeKind, id: Option<String>, attributes: Attributes) {
        self.close_open_content("structural marker inside content");
        self.stack.push(Frame::open(kind, id, attributes));
    }

    fn close(&mut self, kind: NodeKind, raw: &str) {
        match kind {
            NodeKind::Content => {
                if matches!(self.stack.last(), Some(Frame::Content { .. })) {
                    self.close_top();
                } else {
                    log::debug!(target: "mml.autofix", "dropping stray closer {raw:?}");
                }
            }
            NodeKind::Container => {
                self.close_open_content("container closer");
                if self.stack.is_empty() {
                    log::debug!(target: "mml.autofix", "dropping stray closer {raw:?}");
                } else {
                    self.close_top();
                }
            }
        }
    }

    fn finish(mut self) -> Vec<ParseNode> {
        if !self.stack.is_empty() {
            log::debug!(
                target: "mml.autofix",
                "closing {} node(s) left open at end of input",
                self.stack.len()
            );
        }
        while !self.stack.is_empty() {
            self.close_top();
        }
        self.top
    }
}

/// Build the raw nesting of a token stream. Never fails.
pub fn build_ir(stream: &TokenStream) -> Vec<ParseNode> {
    let mut builder = Builder {
        top: Vec::new(),
        stack: Vec::new(),
    };

    for (marker, raw) in stream.iter_with_text() {
        match marker {
            Marker::Open {
                kind,
                id,
                attributes,
            } => builder.open(*kind, id.clone(), attributes.clone()),
            Marker::Close(kind) => builder.close(*kind, raw),
            Marker::FragmentOpen(_) | Marker::FragmentClose(_) | Marker::Text => {
                builder.push_text(raw)
            }
        }
    }

    let nodes = builder.finish();
    log::debug!(target: "mml.parsing", "structural pass: {} top level node(s)", nodes.len());
    nodes
}
