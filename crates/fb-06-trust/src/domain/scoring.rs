//! # Trust Scoring
//!
//! Scores an actor from a flat corpus of blocks. Nothing is cached: every
//! call rescans the corpus.
//!
//! ```text
//! score = certs * w.authority_certs
//!       + reviews.weighted_score * w.peer_reviews
//!       + chain_depth * w.chain_depth
//!       + verified_orders * w.verified_orders
//!       + account_age_days * w.account_age
//! ```

use super::entities::{parse_timestamp, PeerReviews, TrustBlock, TrustInputs, TrustPolicy, TrustReport};
use super::errors::TrustError;
use chrono::{DateTime, Utc};
use shared_types::Value;
use std::collections::HashSet;
use tracing::debug;

pub const CERTIFICATION_TYPE: &str = "observe.certification";
pub const REVIEW_TYPE: &str = "observe.review";
pub const ORDER_TYPE_PREFIX: &str = "transfer.order";

/// Highest rating a review can give.
const RATING_SCALE: f64 = 5.0;

/// Account age cap in days.
const MAX_ACCOUNT_AGE_DAYS: f64 = 365.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Scores `actor_hash` as of now.
pub fn compute_trust(
    actor_hash: &str,
    blocks: &[TrustBlock],
    policy: Option<&TrustPolicy>,
) -> Result<TrustReport, TrustError> {
    compute_trust_at(actor_hash, blocks, policy, Utc::now())
}

/// Scores `actor_hash` as of `now`.
///
/// # Errors
///
/// `MissingActor` for an empty hash.
pub fn compute_trust_at(
    actor_hash: &str,
    blocks: &[TrustBlock],
    policy: Option<&TrustPolicy>,
    now: DateTime<Utc>,
) -> Result<TrustReport, TrustError> {
    if actor_hash.is_empty() {
        return Err(TrustError::MissingActor);
    }
    let default_policy = TrustPolicy::default();
    let policy = policy.unwrap_or(&default_policy);
    let w = &policy.weights;

    let inputs = TrustInputs {
        authority_certs: count_authority_certs(actor_hash, blocks, now),
        peer_reviews: peer_reviews(actor_hash, blocks),
        chain_depth: chain_depth(actor_hash, blocks),
        verified_orders: count_verified_orders(actor_hash, blocks),
        account_age: account_age(actor_hash, blocks, now),
    };

    let score = inputs.authority_certs as f64 * w.authority_certs
        + inputs.peer_reviews.weighted_score * w.peer_reviews
        + inputs.chain_depth as f64 * w.chain_depth
        + inputs.verified_orders as f64 * w.verified_orders
        + inputs.account_age * w.account_age;

    debug!(actor = actor_hash, score, "trust computed");

    Ok(TrustReport {
        score,
        inputs,
        meets_minimum: score >= policy.min_score,
    })
}

/// Certifications of the actor that have not expired. An unparsable
/// `valid_until` never expires.
fn count_authority_certs(actor_hash: &str, blocks: &[TrustBlock], now: DateTime<Utc>) -> usize {
    blocks
        .iter()
        .map(|tb| &tb.block)
        .filter(|b| b.block_type == CERTIFICATION_TYPE && b.single_ref("subject") == Some(actor_hash))
        .filter(|b| {
            b.state
                .get("valid_until")
                .filter(|v| v.is_truthy())
                .and_then(Value::as_str)
                .and_then(parse_timestamp)
                .map_or(true, |until| until >= now)
        })
        .count()
}

fn peer_reviews(actor_hash: &str, blocks: &[TrustBlock]) -> PeerReviews {
    let reviews: Vec<(f64, Option<&str>)> = blocks
        .iter()
        .filter(|tb| {
            tb.block.block_type == REVIEW_TYPE && tb.block.single_ref("subject") == Some(actor_hash)
        })
        .filter_map(|tb| {
            let rating = tb.block.state.get("rating").and_then(Value::as_f64)?;
            let reviewer = tb
                .block
                .single_ref("author")
                .filter(|h| !h.is_empty())
                .or(tb.author_hash.as_deref());
            Some((rating, reviewer))
        })
        .collect();

    if reviews.is_empty() {
        return PeerReviews::default();
    }

    let mut total_weighted = 0.0;
    let mut total_weight = 0.0;
    for (rating, reviewer) in &reviews {
        let density = reviewer.map_or(0.0, |r| connection_density(r, actor_hash, blocks));
        let weight = 1.0 - density;
        total_weighted += rating / RATING_SCALE * weight;
        total_weight += weight;
    }

    let count = reviews.len();
    let avg_score = reviews.iter().map(|(rating, _)| rating).sum::<f64>() / count as f64;
    let weighted_score = if total_weight > 0.0 {
        total_weighted / total_weight * count as f64
    } else {
        0.0
    };

    PeerReviews {
        count,
        avg_score,
        weighted_score,
    }
}

/// Distinct signing authors of blocks that reference the actor.
fn chain_depth(actor_hash: &str, blocks: &[TrustBlock]) -> usize {
    blocks
        .iter()
        .filter(|tb| tb.block.references(actor_hash))
        .filter_map(|tb| tb.author_hash.as_deref().filter(|a| !a.is_empty()))
        .collect::<HashSet<_>>()
        .len()
}

/// Orders naming the actor as buyer or seller that carry a payment or
/// adapter reference.
fn count_verified_orders(actor_hash: &str, blocks: &[TrustBlock]) -> usize {
    blocks
        .iter()
        .map(|tb| &tb.block)
        .filter(|b| b.block_type.starts_with(ORDER_TYPE_PREFIX))
        .filter(|b| b.single_ref("buyer") == Some(actor_hash) || b.single_ref("seller") == Some(actor_hash))
        .filter(|b| {
            ["adapter_ref", "payment_ref"]
                .iter()
                .any(|field| b.state.get(*field).is_some_and(Value::is_truthy))
        })
        .count()
}

/// Days since the actor's own block was stored, between 0 and 365.
fn account_age(actor_hash: &str, blocks: &[TrustBlock], now: DateTime<Utc>) -> f64 {
    blocks
        .iter()
        .filter(|tb| tb.block.hash == actor_hash)
        .find_map(|tb| tb.created_at.as_deref().and_then(parse_timestamp))
        .map_or(0.0, |created| {
            let days = (now - created).num_seconds() as f64 / SECONDS_PER_DAY;
            days.clamp(0.0, MAX_ACCOUNT_AGE_DAYS)
        })
}

fn neighbours<'a>(actor: &str, blocks: &'a [TrustBlock]) -> HashSet<&'a str> {
    let mut found = HashSet::new();
    for tb in blocks {
        let targets: Vec<&str> = tb.block.refs.values().flat_map(|r| r.hashes()).collect();
        if targets.contains(&actor) {
            found.extend(targets.into_iter().filter(|t| *t != actor));
        }
    }
    found
}

/// Jaccard similarity of the sets of hashes each actor co-appears with in
/// refs. 0 when either actor is empty or has no neighbours.
pub fn connection_density(actor_a: &str, actor_b: &str, blocks: &[TrustBlock]) -> f64 {
    if actor_a.is_empty() || actor_b.is_empty() {
        return 0.0;
    }
    let refs_a = neighbours(actor_a, blocks);
    let refs_b = neighbours(actor_b, blocks);
    if refs_a.is_empty() || refs_b.is_empty() {
        return 0.0;
    }
    let shared = refs_a.intersection(&refs_b).count();
    let union = refs_a.union(&refs_b).count();
    shared as f64 / union as f64
}
