//! Error types for the signature layer.

use fb_01_canonical::CanonicalError;
use fb_02_block_factory::BlockError;
use shared_crypto::CryptoError;
use thiserror::Error;

/// Failures while signing or building agent blocks.
///
/// Verification never errors; it answers `false`.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// Malformed key material.
    #[error("Key error: {0}")]
    Key(#[from] CryptoError),

    /// Block content has no canonical form.
    #[error(transparent)]
    Canonical(#[from] CanonicalError),

    /// Agent or draft block construction failed.
    #[error(transparent)]
    Block(#[from] BlockError),

    /// A required argument was empty.
    #[error("{name} is required")]
    MissingArgument { name: &'static str },
}
