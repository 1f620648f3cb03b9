//! Error types for document, query and pipeline operations

use thiserror::Error;

/// Errors raised by the mml core.
///
/// Structural problems in parsed text are never errors: autofix normalizes them.
/// Everything here is raised synchronously by the call that broke a contract,
/// before any mutation happens.
#[derive(Error, Debug)]
pub enum MmlError {
    /// The id is not (or no longer) present in the document.
    #[error("node not found: {0}")]
    NodeNotFound(String),

    /// Kind mismatch, out of range fragment index, cyclic move, bad attribute
    /// or a query without a loaded document.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),

    /// Input that cannot be treated as text at all.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// No formatter registered under this name.
    #[error("format '{0}' not found")]
    FormatNotFound(String),

    /// A formatter failed to produce output.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl MmlError {
    pub(crate) fn not_found(id: &str) -> Self {
        MmlError::NodeNotFound(id.to_string())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        MmlError::InvalidOperation(msg.into())
    }

    /// True for errors that name a missing node
    pub fn is_not_found(&self) -> bool {
        matches!(self, MmlError::NodeNotFound(_))
    }

    /// True for kind mismatches and other contract violations
    pub fn is_invalid_operation(&self) -> bool {
        matches!(self, MmlError::InvalidOperation(_))
    }
}

pub type MmlResult<T> = Result<T, MmlError>;
