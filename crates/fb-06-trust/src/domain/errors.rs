//! Error types for trust computation.

use fb_02_block_factory::BlockError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrustError {
    /// Empty actor hash.
    #[error("actor_hash is required")]
    MissingActor,

    /// A required argument was empty.
    #[error("{name} is required")]
    MissingArgument { name: &'static str },

    /// Attestation, dispute or policy block construction failed.
    #[error(transparent)]
    Block(#[from] BlockError),
}
