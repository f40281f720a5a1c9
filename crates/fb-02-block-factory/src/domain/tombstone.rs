//! Erasure markers.
//!
//! A tombstone supersedes its target through `refs.updates`, so `head`
//! resolves to the tombstone and readers know the content was withdrawn.

use super::errors::{BlockError, BlockResult};
use super::factory::create_with_refs;
use chrono::{SecondsFormat, Utc};
use shared_types::{Block, RefValue, Refs, State, Value};

/// Block type of erasure markers.
pub const TOMBSTONE_TYPE: &str = "observe.tombstone";

/// Reason recorded when the caller gives none.
pub const DEFAULT_TOMBSTONE_REASON: &str = "erasure_request";

/// Marks `target_hash` for content erasure on behalf of `requested_by`.
pub fn tombstone(target_hash: &str, requested_by: &str, reason: Option<&str>) -> BlockResult<Block> {
    if target_hash.is_empty() {
        return Err(BlockError::MissingArgument { name: "target_hash" });
    }
    if requested_by.is_empty() {
        return Err(BlockError::MissingArgument {
            name: "requested_by",
        });
    }

    let state = State::from([
        (
            "reason".to_string(),
            Value::from(reason.unwrap_or(DEFAULT_TOMBSTONE_REASON)),
        ),
        ("requested_by".to_string(), Value::from(requested_by)),
        (
            "requested_at".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
        ),
    ]);
    let refs = Refs::from([
        ("target".to_string(), RefValue::from(target_hash)),
        ("updates".to_string(), RefValue::from(target_hash)),
    ]);
    create_with_refs(TOMBSTONE_TYPE, state, refs)
}
