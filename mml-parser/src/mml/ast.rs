//! Document model
//!
//!     A [`Document`] owns every node of one tree, indexed by id, plus a
//!     child to parent index used for path queries and moves. Nodes never point
//!     at each other; structure lives in the containers' child id lists and in
//!     the parent index, both owned by the document.
//!
//!     There are two addressable node kinds (see [`NodeKind`]):
//!
//!         - Container: an ordered list of child ids, no text.
//!         - Content: text which may embed fragments, no children.
//!
//!     Fragments are not nodes. They are segments of a content node's text,
//!     addressed by (content id, identifier, occurrence index). See
//!     [content](content).

pub mod attributes;
pub mod content;
pub mod document;
pub mod ids;
pub mod node;
pub mod snapshot;

pub use attributes::Attributes;
pub use content::{ContentText, Fragment, Segment};
pub use document::{Document, ParseOptions, ROOT_ID};
pub use ids::IdGenerator;
pub use node::{Node, NodeBody, NodeKind};
pub use snapshot::{snapshot_document, NodeSnapshot};
