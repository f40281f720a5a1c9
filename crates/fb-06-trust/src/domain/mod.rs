//! Domain layer: scoring, attestations and policies.

pub mod attestation;
pub mod entities;
pub mod errors;
pub mod policy;
pub mod scoring;
