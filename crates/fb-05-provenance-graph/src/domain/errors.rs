//! Error types for graph traversal.

use fb_02_block_factory::BlockError;
use thiserror::Error;

/// Failures reported by a resolver collaborator.
///
/// A hash the resolver does not know is not an error; it resolves to
/// `None` or an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolverError {
    /// Backing store could not be reached.
    #[error("Resolver unavailable: {message}")]
    Unavailable { message: String },

    /// Lookup exceeded the resolver's own deadline.
    #[error("Resolver timed out during {operation}")]
    Timeout { operation: String },

    /// Caller cancelled the traversal.
    #[error("Traversal cancelled")]
    Cancelled,
}

/// Traversal and merge failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error(transparent)]
    Resolver(#[from] ResolverError),

    /// Merge strategy name not recognised.
    #[error("Unknown merge strategy '{0}'")]
    UnknownStrategy(String),

    /// Merge block construction failed.
    #[error(transparent)]
    Block(#[from] BlockError),
}

pub type GraphResult<T> = Result<T, GraphError>;
