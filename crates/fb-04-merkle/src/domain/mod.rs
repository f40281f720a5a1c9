//! Domain layer: tree construction and disclosure proofs.
//!
//! Depends only on SHA-256, not on the canonical block codec.

pub mod disclosure;
pub mod errors;
pub mod tree;
