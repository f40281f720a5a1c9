//! # Attestations and Disputes
//!
//! Actors vouch for blocks with `observe.attestation` and challenge them
//! with `observe.dispute`. The net of both is a block-level trust score.

use super::errors::TrustError;
use fb_02_block_factory::create_with_refs;
use serde::{Deserialize, Serialize};
use shared_types::{Block, RefValue, Refs, State, Value};
use tracing::debug;

pub const ATTESTATION_TYPE: &str = "observe.attestation";
pub const DISPUTE_TYPE: &str = "observe.dispute";

/// Confidence recorded when the caller gives none.
pub const DEFAULT_CONFIDENCE: &str = "verified";

/// Points per attestation confidence level. Unlisted levels score 1.
pub const CONFIDENCE_WEIGHTS: [(&str, i64); 4] =
    [("verified", 3), ("witnessed", 2), ("reported", 1), ("uncertain", 0)];

/// Points per dispute severity. Unlisted or absent severities score
/// [`DEFAULT_DISPUTE_WEIGHT`].
pub const DISPUTE_WEIGHTS: [(&str, i64); 3] = [("critical", -5), ("major", -3), ("minor", -1)];

pub const DEFAULT_DISPUTE_WEIGHT: i64 = -2;

/// Attestations and disputes found for one block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttestationTrace {
    pub attestations: Vec<Block>,
    pub disputes: Vec<Block>,
    pub score: i64,
}

fn require(value: &str, name: &'static str) -> Result<(), TrustError> {
    if value.is_empty() {
        return Err(TrustError::MissingArgument { name });
    }
    Ok(())
}

/// `attestor_hash` vouches for `target_hash`.
pub fn attest(
    target_hash: &str,
    attestor_hash: &str,
    confidence: Option<&str>,
    method: Option<&str>,
) -> Result<Block, TrustError> {
    require(target_hash, "target_hash")?;
    require(attestor_hash, "attestor_hash")?;

    let mut state = State::new();
    state.insert(
        "confidence".into(),
        Value::from(confidence.unwrap_or(DEFAULT_CONFIDENCE)),
    );
    if let Some(method) = method.filter(|m| !m.is_empty()) {
        state.insert("method".into(), Value::from(method));
    }

    let refs = Refs::from([
        ("confirms".to_string(), RefValue::from(target_hash)),
        ("attestor".to_string(), RefValue::from(attestor_hash)),
    ]);
    Ok(create_with_refs(ATTESTATION_TYPE, state, refs)?)
}

/// `disputor_hash` challenges `target_hash`. `extra_state` carries fields
/// such as `severity` or `evidence`; `reason` always wins over an
/// `extra_state` entry of the same name.
pub fn dispute(
    target_hash: &str,
    disputor_hash: &str,
    reason: &str,
    extra_state: State,
) -> Result<Block, TrustError> {
    require(target_hash, "target_hash")?;
    require(disputor_hash, "disputor_hash")?;
    require(reason, "reason")?;

    let mut state = extra_state;
    state.insert("reason".into(), Value::from(reason));

    let refs = Refs::from([
        ("challenges".to_string(), RefValue::from(target_hash)),
        ("disputor".to_string(), RefValue::from(disputor_hash)),
    ]);
    Ok(create_with_refs(DISPUTE_TYPE, state, refs)?)
}

fn confidence_weight(confidence: &str) -> i64 {
    CONFIDENCE_WEIGHTS
        .iter()
        .find(|(level, _)| *level == confidence)
        .map_or(1, |(_, points)| *points)
}

fn severity_weight(severity: Option<&str>) -> i64 {
    severity
        .and_then(|s| DISPUTE_WEIGHTS.iter().find(|(level, _)| *level == s))
        .map_or(DEFAULT_DISPUTE_WEIGHT, |(_, points)| *points)
}

/// Collects the attestations and disputes aimed at `hash` and nets them.
pub fn trace_attestations<'a, I>(hash: &str, blocks: I) -> AttestationTrace
where
    I: IntoIterator<Item = &'a Block>,
{
    let mut trace = AttestationTrace::default();
    for block in blocks {
        if block.block_type == ATTESTATION_TYPE && block.single_ref("confirms") == Some(hash) {
            trace.score += confidence_weight(block.state_str("confidence").unwrap_or("reported"));
            trace.attestations.push(block.clone());
        } else if block.block_type == DISPUTE_TYPE && block.single_ref("challenges") == Some(hash) {
            trace.score += severity_weight(block.state_str("severity"));
            trace.disputes.push(block.clone());
        }
    }
    debug!(
        hash,
        attestations = trace.attestations.len(),
        disputes = trace.disputes.len(),
        score = trace.score,
        "attestations traced"
    );
    trace
}

/// Net attestation score of `hash`. Can be negative.
pub fn trust_score<'a, I>(hash: &str, blocks: I) -> i64
where
    I: IntoIterator<Item = &'a Block>,
{
    trace_attestations(hash, blocks).score
}
