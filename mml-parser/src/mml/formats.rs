//! Output formats
//!
//!     - markup: the mml wire format, the dual of parsing
//!     - treeviz: one line per node, for eyeballing a tree
//!     - json / yaml: a serde snapshot of the tree
//!
//!     Every format implements [`Formatter`] and is reachable by name through the
//!     [`FormatRegistry`].

pub mod markup;
pub mod registry;
pub mod snapshot;
pub mod treeviz;

pub use markup::{serialize_document, MarkupFormatter, SerializeOptions};
pub use registry::{FormatRegistry, Formatter};
pub use snapshot::{JsonFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter, TreevizOptions};
