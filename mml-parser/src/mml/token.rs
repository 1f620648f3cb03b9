//! Token types shared by the lexer, the structural pass and the content model.
//!
//!     mml lives inside HTML comments, so lexing happens in two layers:
//!
//!     Marker Tokens:
//!         The source is split into markers (the six comment shapes that carry
//!         structure) and the plain text between them. See [marker](marker).
//!
//!         | Construct    | Opening                      | Closing            |
//!         |--------------|------------------------------|--------------------|
//!         | Container    | `<!-- @c id="ID" [k="v"]* -->` | `<!-- /@c -->`     |
//!         | Content node | `<!-- @n id="ID" [k="v"]* -->` | `<!-- /@n -->`     |
//!         | Fragment     | `<!-- %IDENT -->`              | `<!-- /%IDENT -->` |
//!
//!     Attribute Tokens:
//!         The inside of an opening Container/Content marker is lexed again by a
//!         logos lexer into keys, equals signs and quoted values. See
//!         [attributes](attributes).
//!
//!     Any HTML comment that does not have one of the six shapes is text.

pub mod attributes;
pub mod marker;

pub use attributes::{parse_attributes, AttributeToken, ParsedAttributes};
pub use marker::{Marker, TokenStream};
