//! # FoodBlock Test Suite
//!
//! Unified test crate exercising the subsystems together.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared corpus and logging setup
//! │
//! ├── integration/      # Cross-subsystem scenarios
//! │   ├── lifecycle.rs      # create, update, head, tombstone, aliases
//! │   ├── supply_chain.rs   # recall, forward, explain over a store
//! │   ├── signing.rs        # signatures, agents, encrypted fields
//! │   ├── disclosure.rs     # Merkle proofs and snapshots
//! │   ├── merging.rs        # forks and merge blocks
//! │   └── trust.rs          # actor trust and attestations
//! │
//! └── adversarial/      # Hostile or malformed inputs
//!     ├── cycles.rs         # reference loops and unbounded graphs
//!     ├── tampering.rs      # edited blocks, proofs and signatures
//!     └── sybil.rs          # colluding reviewers
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p fb-tests
//!
//! # By category
//! cargo test -p fb-tests integration::
//! cargo test -p fb-tests adversarial::
//!
//! # Benchmarks
//! cargo bench -p fb-tests
//! ```

pub mod adversarial;
pub mod fixtures;
pub mod integration;
