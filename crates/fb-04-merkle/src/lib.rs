//! # Merkle Disclosure Subsystem
//!
//! Builds a Merkle tree over the fields of a block's state so that a holder
//! can reveal some fields and prove they belong to the full state without
//! revealing the rest. Also summarizes block collections into
//! `observe.snapshot` blocks anchored by a Merkle root.
//!
//! ## Tree Shape
//!
//! ```text
//!            root
//!          /      \
//!       h(01)     h(22)        odd node pairs with itself
//!       /   \      /  \
//!     L0    L1   L2   L2       leaves in sorted field-name order
//! ```
//!
//! Pair hashing is `sha256(left_hex || right_hex)` over the hex strings.
//! It is order-sensitive, so pairing always runs left to right.
//!
//! ## Proof Format
//!
//! A proof is a flat, ordered list of sibling hashes with no position
//! markers. The verifier rebuilds the root by consuming disclosed leaves
//! first and proof entries second. Disclosures anchored at the left edge of
//! each pair (the lowest-sorted field, or all fields) always verify; other
//! subsets may not, because the format cannot say which side a sibling is on.

pub mod domain;
pub mod snapshot;

pub use domain::disclosure::{selective_disclose, verify_proof, Disclosure};
pub use domain::errors::MerkleError;
pub use domain::tree::{hash_pair, leaf_hash, merkleize, MerkleTree};
pub use snapshot::{
    create_snapshot, summarize, verify_snapshot, DateRange, SnapshotSummary, SnapshotVerification,
    SNAPSHOT_TYPE,
};
