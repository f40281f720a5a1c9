//! # Snapshots
//!
//! An `observe.snapshot` block commits to a collection of blocks through a
//! Merkle root over their hashes, so a later holder of the same blocks can
//! show nothing was added, dropped or altered.

use crate::domain::errors::MerkleError;
use crate::domain::tree::merkleize;
use chrono::{SecondsFormat, Utc};
use fb_02_block_factory::create_with_refs;
use serde::{Deserialize, Serialize};
use shared_types::{Block, RefValue, Refs, State, Value};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

pub const SNAPSHOT_TYPE: &str = "observe.snapshot";

/// Inclusive period a snapshot covers, as ISO-8601 strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

/// Block counts by type.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SnapshotSummary {
    pub total: usize,
    pub by_type: BTreeMap<String, usize>,
}

/// Outcome of [`verify_snapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotVerification {
    pub valid: bool,
    /// Committed hashes absent from the supplied blocks, sorted.
    pub missing: Vec<String>,
}

/// Merkle root over a set of hashes, each leaf being `hash: hash`.
fn hashes_root(hashes: &[&str]) -> Result<String, MerkleError> {
    let state: State = hashes
        .iter()
        .map(|h| ((*h).to_string(), Value::String((*h).to_string())))
        .collect();
    Ok(merkleize(&state)?.root)
}

/// Counts blocks per type. Blocks with an empty type count as `unknown`.
pub fn summarize(blocks: &[Block]) -> SnapshotSummary {
    let mut by_type = BTreeMap::new();
    for block in blocks {
        let key = if block.block_type.is_empty() {
            "unknown"
        } else {
            block.block_type.as_str()
        };
        *by_type.entry(key.to_string()).or_insert(0) += 1;
    }
    SnapshotSummary {
        total: blocks.len(),
        by_type,
    }
}

/// Builds an `observe.snapshot` block over `blocks`.
///
/// `block_count` counts every block carrying a hash, duplicates included;
/// the Merkle root covers the distinct hashes.
pub fn create_snapshot(
    blocks: &[Block],
    summary: Option<&str>,
    date_range: Option<&DateRange>,
) -> Result<Block, MerkleError> {
    let hashes: Vec<&str> = blocks
        .iter()
        .map(|b| b.hash.as_str())
        .filter(|h| !h.is_empty())
        .collect();
    if hashes.is_empty() {
        return Err(MerkleError::EmptySnapshot);
    }

    let root = hashes_root(&hashes)?;
    let mut sorted: Vec<String> = hashes.iter().map(|h| h.to_string()).collect();
    sorted.sort();

    let by_type: BTreeMap<String, Value> = summarize(blocks)
        .by_type
        .into_iter()
        .map(|(t, n)| (t, Value::from(n)))
        .collect();

    let mut state = State::new();
    state.insert("merkle_root".into(), Value::String(root));
    state.insert("block_count".into(), Value::from(hashes.len()));
    state.insert(
        "block_hashes".into(),
        Value::Array(sorted.iter().cloned().map(Value::String).collect()),
    );
    state.insert("by_type".into(), Value::Object(by_type));
    state.insert(
        "created_at".into(),
        Value::String(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    if let Some(text) = summary.filter(|s| !s.is_empty()) {
        state.insert("summary".into(), Value::from(text));
    }
    if let Some(range) = date_range {
        state.insert(
            "date_range".into(),
            Value::Object(BTreeMap::from([
                ("start".to_string(), Value::from(range.start.as_str())),
                ("end".to_string(), Value::from(range.end.as_str())),
            ])),
        );
    }

    let refs = Refs::from([("blocks".to_string(), RefValue::Multiple(sorted))]);
    let snapshot = create_with_refs(SNAPSHOT_TYPE, state, refs)?;
    debug!(hash = %snapshot.hash, count = hashes.len(), "snapshot created");
    Ok(snapshot)
}

/// Checks that `blocks` contain every hash committed by `snapshot` and that
/// they reproduce its Merkle root.
pub fn verify_snapshot(snapshot: &Block, blocks: &[Block]) -> SnapshotVerification {
    let expected: BTreeSet<&str> = snapshot
        .state
        .get("block_hashes")
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    let provided: BTreeSet<&str> = blocks
        .iter()
        .map(|b| b.hash.as_str())
        .filter(|h| !h.is_empty())
        .collect();

    let missing: Vec<String> = expected
        .difference(&provided)
        .map(|h| h.to_string())
        .collect();

    let matching: Vec<&str> = blocks
        .iter()
        .map(|b| b.hash.as_str())
        .filter(|h| expected.contains(h))
        .collect();

    let root_matches = missing.is_empty()
        && !matching.is_empty()
        && hashes_root(&matching)
            .is_ok_and(|root| Some(root.as_str()) == snapshot.state_str("merkle_root"));

    SnapshotVerification {
        valid: missing.is_empty() && root_matches,
        missing,
    }
}
