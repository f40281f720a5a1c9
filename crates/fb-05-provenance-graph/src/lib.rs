//! # Provenance Graph Subsystem
//!
//! Traverses the graph that block refs form. Storage is never owned here:
//! every operation takes a resolver implementing the outbound ports.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): traversal algorithms, pure apart from
//!   resolver calls
//! - **Ports Layer** (`ports/`)
//!   - `ProvenanceApi`: driving port
//!   - `BlockResolver`, `ForwardResolver`: driven ports
//! - **Adapters Layer** (`adapters/`): `InMemoryBlockStore`
//! - **Service Layer** (`service.rs`): `ProvenanceService`
//!
//! ## Operations
//!
//! | Operation | Direction | Bound |
//! |-----------|-----------|-------|
//! | `chain` | back along `updates` | `chain_max_depth` blocks |
//! | `tree` | back along every ref | `tree_max_depth` levels |
//! | `head` | forward along `updates` | `head_max_steps` |
//! | `forward` | one hop forward | - |
//! | `recall` / `downstream` | breadth-first forward | `recall_max_depth` hops |
//! | `detect_conflict` / `merge` / `auto_merge` | back along `updates` | 100 blocks |
//! | `explain` | direct inputs and their sources | - |
//!
//! ## Guarantees
//!
//! - Every walk keeps a per-call visited set, so cycles terminate.
//! - A hash the resolver does not know ends that branch; it never fails
//!   the walk. A `ResolverError` always does.
//! - Resolver calls are issued one at a time.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::InMemoryBlockStore;
pub use domain::chain::{chain, head, tree};
pub use domain::entities::{Ancestry, ConflictReport, ForwardResult, ProvenanceTree, RecallResult, Referencing};
pub use domain::errors::{GraphError, GraphResult, ResolverError};
pub use domain::explain::explain;
pub use domain::forward::{downstream, forward, recall, SUBSTANCE_PREFIX};
pub use domain::merge::{auto_merge, detect_conflict, merge, MERGE_METADATA, MERGE_TYPE};
pub use domain::value_objects::{FieldDefinition, MergeStrategy, RecallFilter, TraversalConfig, Vocabulary};
pub use ports::{BlockResolver, ForwardResolver, ProvenanceApi};
pub use service::ProvenanceService;
