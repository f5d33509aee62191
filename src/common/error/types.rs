//! Error type definitions.
//!
//! Lookups that are optional by nature (an enclosing `mc:AlternateContent`,
//! an anchor that cannot be reached) never produce an error; they resolve to
//! `None` at the call site instead.
use thiserror::Error;

/// Main error type for text-box geometry operations.
///
/// The type is `Clone` so that a construction failure recorded for one node
/// can be reported every time that node (or one of its descendants) is
/// resolved, without poisoning sibling subtrees.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A required child or attribute is missing, duplicated or malformed
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// XML parsing error
    #[error("XML error: {0}")]
    Xml(String),

    /// Node id does not belong to the tree
    #[error("Node not found: {0}")]
    NodeNotFound(usize),

    /// Operation was called on a node of the wrong kind
    #[error("Unexpected node: expected {expected}, got {got}")]
    UnexpectedNode { expected: String, got: String },
}

impl Error {
    /// Shorthand for a [`Error::SchemaViolation`].
    #[inline]
    pub(crate) fn schema(message: impl Into<String>) -> Self {
        Error::SchemaViolation(message.into())
    }

    /// Shorthand for an [`Error::UnexpectedNode`].
    #[inline]
    pub(crate) fn unexpected(expected: impl Into<String>, got: impl Into<String>) -> Self {
        Error::UnexpectedNode {
            expected: expected.into(),
            got: got.into(),
        }
    }
}

/// Result type for text-box geometry operations.
pub type Result<T> = std::result::Result<T, Error>;
