//! # Trust Subsystem
//!
//! Two independent trust measures over a block corpus:
//!
//! - **Actor trust** ([`compute_trust`]): a weighted sum of certifications,
//!   density-discounted peer reviews, distinct counterparties, verified
//!   orders and account age.
//! - **Block trust** ([`trust_score`]): attestations minus disputes aimed
//!   at one block.
//!
//! ## Sybil Resistance
//!
//! A review's weight is `1 - connection_density(reviewer, actor)`, the
//! Jaccard similarity of the hashes each side co-appears with in refs.
//! Reviewers whose neighbourhood mirrors the actor's count for little.
//!
//! ## Default Weights
//!
//! | Input | Weight |
//! |-------|--------|
//! | `authority_certs` | 3.0 |
//! | `peer_reviews` | 1.0 |
//! | `chain_depth` | 2.0 |
//! | `verified_orders` | 1.5 |
//! | `account_age` (days, max 365) | 0.5 |

pub mod domain;

pub use domain::attestation::{
    attest, dispute, trace_attestations, trust_score, AttestationTrace, ATTESTATION_TYPE,
    CONFIDENCE_WEIGHTS, DEFAULT_CONFIDENCE, DEFAULT_DISPUTE_WEIGHT, DISPUTE_TYPE, DISPUTE_WEIGHTS,
};
pub use domain::entities::{
    parse_timestamp, PeerReviews, TrustBlock, TrustInputs, TrustPolicy, TrustReport, TrustWeights,
};
pub use domain::errors::TrustError;
pub use domain::policy::{create_trust_policy, TRUST_POLICY_TYPE};
pub use domain::scoring::{
    compute_trust, compute_trust_at, connection_density, CERTIFICATION_TYPE, ORDER_TYPE_PREFIX,
    REVIEW_TYPE,
};
