//! # Block Factory Subsystem
//!
//! Builds blocks: strips nulls, injects instance identifiers on event
//! types, validates refs and derives the content hash.
//!
//! ## Operations
//!
//! | Function | Result |
//! |----------|--------|
//! | [`create`] | New block from raw (unvalidated) refs |
//! | [`create_with_refs`] | New block from typed refs |
//! | [`update`] | Block superseding `previous_hash` |
//! | [`merge_update`] | Update whose state is the previous state plus changes |
//! | [`tombstone`] | Erasure marker superseding a target |
//! | [`validate`] | Schema check producing readable error strings |
//!
//! ## Invariants
//!
//! - `block.hash == sha256(canonical(type, state, refs))`
//! - No `Null` survives in a constructed block's state or refs.
//! - Event types (`transfer.*`, `transform.*`, `observe.*` minus the
//!   definitional registry types) always carry `state.instance_id`.

pub mod domain;
pub mod registry;

pub use domain::errors::BlockError;
pub use domain::event_types::{is_event_type, DEFINITIONAL_TYPES, EVENT_PREFIXES, INSTANCE_ID};
pub use domain::factory::{
    compute_hash, create, create_with_refs, merge_update, omit_nulls, update, update_with_refs,
    validate_refs, RawRefs,
};
pub use domain::schema::{core_schemas, validate, validate_with_registry, FieldKind, FieldRule, SchemaDefinition};
pub use domain::tombstone::{tombstone, DEFAULT_TOMBSTONE_REASON, TOMBSTONE_TYPE};
pub use registry::AliasRegistry;
