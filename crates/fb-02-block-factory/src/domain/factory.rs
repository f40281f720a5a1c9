//! # Block Construction
//!
//! The only way to obtain a `Block` whose hash matches its content.

use super::errors::{BlockError, BlockResult};
use super::event_types::{is_event_type, INSTANCE_ID};
use fb_01_canonical::canonical;
use shared_crypto::sha256_hex;
use shared_types::{Block, RefValue, Refs, State, Value};
use std::collections::BTreeMap;
use tracing::trace;
use uuid::Uuid;

/// Unvalidated refs as they arrive from callers or the wire.
pub type RawRefs = BTreeMap<String, Value>;

/// Role that links an update to the block it supersedes.
const UPDATES_ROLE: &str = "updates";

/// SHA-256 hex of the canonical form.
pub fn compute_hash(block_type: &str, state: &State, refs: &Refs) -> BlockResult<String> {
    let text = canonical(block_type, state, refs)?;
    Ok(sha256_hex(text.as_bytes()))
}

/// Removes `Null` from maps and arrays at every depth.
pub fn omit_nulls(map: BTreeMap<String, Value>) -> BTreeMap<String, Value> {
    map.into_iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (k, strip_value(v)))
        .collect()
}

fn strip_value(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(omit_nulls(map)),
        Value::Array(items) => Value::Array(
            items
                .into_iter()
                .filter(|v| !v.is_null())
                .map(strip_value)
                .collect(),
        ),
        other => other,
    }
}

/// Turns raw refs into typed refs.
///
/// Nulls are dropped first. Every remaining value must be a string or an
/// array whose elements are all strings.
pub fn validate_refs(raw: RawRefs) -> BlockResult<Refs> {
    let mut refs = Refs::new();
    for (role, value) in omit_nulls(raw) {
        let target = match value {
            Value::String(hash) => RefValue::Single(hash),
            Value::Array(items) => {
                let mut hashes = Vec::with_capacity(items.len());
                for item in items {
                    match item {
                        Value::String(hash) => hashes.push(hash),
                        _ => {
                            return Err(BlockError::InvalidRef {
                                role,
                                reason: "array contains a non-string value",
                            })
                        }
                    }
                }
                RefValue::Multiple(hashes)
            }
            _ => {
                return Err(BlockError::InvalidRef {
                    role,
                    reason: "must be a string or an array of strings",
                })
            }
        };
        refs.insert(role, target);
    }
    Ok(refs)
}

/// Creates a block from raw refs.
///
/// # Errors
///
/// `MissingType` for an empty type, `InvalidRef` naming the first bad role,
/// `Canonical` when state holds NaN or Infinity.
pub fn create(block_type: &str, state: State, refs: RawRefs) -> BlockResult<Block> {
    if block_type.is_empty() {
        return Err(BlockError::MissingType);
    }
    let refs = validate_refs(refs)?;
    create_with_refs(block_type, state, refs)
}

/// Creates a block from already-typed refs.
pub fn create_with_refs(block_type: &str, state: State, refs: Refs) -> BlockResult<Block> {
    if block_type.is_empty() {
        return Err(BlockError::MissingType);
    }

    let mut state = omit_nulls(state);
    if is_event_type(block_type) && !state.contains_key(INSTANCE_ID) {
        state.insert(
            INSTANCE_ID.to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
    }

    let hash = compute_hash(block_type, &state, &refs)?;
    trace!(block_type, %hash, "block created");

    Ok(Block {
        hash,
        block_type: block_type.to_string(),
        state,
        refs,
    })
}

/// Creates a block superseding `previous_hash`.
///
/// Any caller-supplied `updates` ref is overwritten.
pub fn update(
    previous_hash: &str,
    block_type: &str,
    state: State,
    mut refs: RawRefs,
) -> BlockResult<Block> {
    if previous_hash.is_empty() {
        return Err(BlockError::MissingPreviousHash);
    }
    refs.insert(
        UPDATES_ROLE.to_string(),
        Value::String(previous_hash.to_string()),
    );
    create(block_type, state, refs)
}

/// Typed-refs form of [`update`].
pub fn update_with_refs(
    previous_hash: &str,
    block_type: &str,
    state: State,
    mut refs: Refs,
) -> BlockResult<Block> {
    if previous_hash.is_empty() {
        return Err(BlockError::MissingPreviousHash);
    }
    refs.insert(
        UPDATES_ROLE.to_string(),
        RefValue::Single(previous_hash.to_string()),
    );
    create_with_refs(block_type, state, refs)
}

/// Updates `previous` with a shallow merge of `state_changes` over its state.
///
/// Keeps the previous type. A `Null` in `state_changes` removes that field.
pub fn merge_update(previous: &Block, state_changes: State, additional_refs: Refs) -> BlockResult<Block> {
    if previous.hash.is_empty() {
        return Err(BlockError::MissingPreviousHash);
    }
    let mut merged = previous.state.clone();
    merged.extend(state_changes);
    update_with_refs(&previous.hash, &previous.block_type, merged, additional_refs)
}
