//! Parsing: from a marker stream to raw nesting
//!
//!     The processing pipeline from source text to a [`Document`](crate::mml::ast::Document):
//!         1. Lexing: source text to a flat marker stream. See [lexing](crate::mml::lexing).
//!         2. Structural pass: markers to a tree of [`ParseNode`]s. See [structural].
//!         3. Assembling: autofix and id assignment. See [assembling](crate::mml::assembling).
//!
//! Structural Pass
//!
//!     A single left to right pass over the markers with a stack of open nodes.
//!     A closing marker closes the innermost open node of its family; nothing is
//!     matched by id. The pass never fails: damage is recorded in the shape of
//!     the IR (loose text runs, implicitly closed nodes) and repaired by autofix.
//!
//! Terminology
//!
//!     - loose text: text not enclosed in a content node, at any depth.
//!     - IR: the [`ParseNode`] tree, which still allows loose text, missing ids
//!       and any number of top level nodes.

pub mod ir;
pub mod structural;

pub use ir::ParseNode;
pub use structural::build_ir;
