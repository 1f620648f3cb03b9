//! Assembling module
//!
//!     The assembling stage turns the raw nesting found by the structural pass
//!     into a well formed [`Document`](crate::mml::ast::Document). Parsing never
//!     fails on structure; everything that is off is repaired here, in a fixed
//!     order, so that re-parsing serialized output is a no-op.
//!
//! Current stages:
//!
//!     - `autofix`: drops empty content, wraps loose text, guarantees a single
//!       root, segments fragments and assigns unique ids.
//!       See [autofix](autofix::Autofix) for details.

pub mod autofix;

pub use autofix::Autofix;
