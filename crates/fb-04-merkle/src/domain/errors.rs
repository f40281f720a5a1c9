//! Error types for Merkle operations.

use fb_02_block_factory::BlockError;
use thiserror::Error;

/// Merkle and snapshot failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MerkleError {
    /// A field value holds NaN or an infinity.
    #[error("Field {field} contains a non-finite number")]
    NonFiniteNumber { field: String },

    /// Leaf serialization failed.
    #[error("Leaf encoding failed for {field}: {reason}")]
    LeafEncoding { field: String, reason: String },

    /// A proof entry is not a 64-character lowercase hex digest.
    #[error("Proof entry {index} is not a SHA-256 hex digest")]
    MalformedProofEntry { index: usize },

    /// Snapshot requested over no blocks.
    #[error("Snapshot requires at least one block with a hash")]
    EmptySnapshot,

    /// Snapshot block construction failed.
    #[error(transparent)]
    Block(#[from] BlockError),
}
