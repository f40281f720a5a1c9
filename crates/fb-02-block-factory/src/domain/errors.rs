//! Error types for block construction.

use fb_01_canonical::CanonicalError;
use thiserror::Error;

/// Reasons a block cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BlockError {
    /// Empty block type.
    #[error("Block type is required and must be a non-empty string")]
    MissingType,

    /// `update` without a hash to supersede.
    #[error("Previous hash is required")]
    MissingPreviousHash,

    /// A ref value that is neither a string nor a list of strings.
    #[error("refs.{role} {reason}")]
    InvalidRef { role: String, reason: &'static str },

    /// A required argument was empty.
    #[error("{name} is required")]
    MissingArgument { name: &'static str },

    /// `@name` with no registered alias.
    #[error("Unresolved alias \"@{0}\"")]
    UnresolvedAlias(String),

    /// Content has no canonical form.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),
}

/// Result alias for the block factory.
pub type BlockResult<T> = Result<T, BlockError>;
