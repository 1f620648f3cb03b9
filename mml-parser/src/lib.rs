//! # mml
//!
//! A parser, document model and query engine for mml: markdown with structure
//! embedded in HTML comments.
//!
//! File Layout
//!
//!     The processing pipeline mirrors the data flow, leaves first:
//!
//!         src/mml
//!           ├── token        Marker and attribute tokens
//!           ├── lexing       Source text to a flat marker stream
//!           ├── parsing      Marker stream to raw nesting (IR)
//!           ├── assembling   Autofix: IR to a well formed Document
//!           ├── ast          Document, nodes, attributes, fragment-aware content
//!           ├── formats      Markup serializer, treeviz, json/yaml snapshots
//!           ├── query        Dom and the chainable Query / QueryMut engine
//!           └── transforms   Composable stage pipeline tying the above together
//!
//! For testing helpers see the [testing module](mml::testing).

pub mod mml;

pub use mml::ast::{Attributes, Document, Node, NodeKind, ParseOptions};
pub use mml::error::{MmlError, MmlResult};
pub use mml::formats::{FormatRegistry, Formatter, SerializeOptions, TreevizOptions};
pub use mml::loader::DocumentLoader;
pub use mml::query::{Dom, Query, QueryMut, Selection};
