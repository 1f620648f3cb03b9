//! Query engine
//!
//!     [`Dom`] holds at most one [`Document`](crate::mml::ast::Document) and hands
//!     out queries over it. A query is a borrow of the document plus an ordered
//!     match set of node ids; it never copies the tree.
//!
//!         - [`Query`]: shared borrow, filters and terminal accessors only.
//!         - [`QueryMut`]: exclusive borrow, adds the `bulk_*` mutations.
//!
//!     Both start from every node id in document order, root included. The
//!     filters live on the [`Selection`] trait and consume the query, returning
//!     a narrowed one; clone a [`Query`] to branch a chain.
//!
//! Bulk operations
//!
//!     Bulk operations apply per item. An item that fails is skipped, counted in
//!     [`QueryMut::skipped`] and logged as a warning under `mml.query`; the batch
//!     goes on. Errors that concern the whole call (invalid attributes, a missing
//!     move target, content edits over a match set without content nodes) are
//!     returned before anything changes.
//!
//!     ```rust,ignore
//!     let mut dom = Dom::new();
//!     dom.set_document(text)?;
//!     dom.query_mut()?
//!         .where_attrs([("type", "x")])
//!         .bulk_set_attributes([("status", "done")])?;
//!     ```

pub mod dom;
pub mod selection;

pub use dom::{Dom, Query, QueryMut};
pub use selection::Selection;
