//! # Trust Entities
//!
//! The corpus element, weights, policy and score breakdown.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use shared_types::{Block, BlockHash, SignedBlock};

/// A block as seen by the trust scan: the block plus the storage metadata
/// some signals need.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustBlock {
    #[serde(flatten)]
    pub block: Block,
    /// Actor that signed the block, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_hash: Option<BlockHash>,
    /// When the store first saw the block, ISO-8601.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl TrustBlock {
    pub fn new(block: Block) -> Self {
        Self {
            block,
            author_hash: None,
            created_at: None,
        }
    }

    pub fn authored_by(mut self, author_hash: &str) -> Self {
        self.author_hash = Some(author_hash.to_string());
        self
    }

    pub fn created_at(mut self, timestamp: &str) -> Self {
        self.created_at = Some(timestamp.to_string());
        self
    }
}

impl From<Block> for TrustBlock {
    fn from(block: Block) -> Self {
        Self::new(block)
    }
}

impl From<SignedBlock> for TrustBlock {
    fn from(signed: SignedBlock) -> Self {
        Self {
            block: signed.foodblock,
            author_hash: Some(signed.author_hash),
            created_at: None,
        }
    }
}

/// Weight applied to each trust input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustWeights {
    pub authority_certs: f64,
    pub peer_reviews: f64,
    pub chain_depth: f64,
    pub verified_orders: f64,
    pub account_age: f64,
}

impl Default for TrustWeights {
    fn default() -> Self {
        Self {
            authority_certs: 3.0,
            peer_reviews: 1.0,
            chain_depth: 2.0,
            verified_orders: 1.5,
            account_age: 0.5,
        }
    }
}

/// Scoring overrides. The default policy uses default weights and a
/// minimum score of zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TrustPolicy {
    pub weights: TrustWeights,
    pub min_score: f64,
    /// Authorities the policy author recognises. Carried for consumers;
    /// scoring does not filter on it.
    pub required_authorities: Vec<BlockHash>,
}

/// Review statistics for one actor.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PeerReviews {
    pub count: usize,
    pub avg_score: f64,
    /// Density-discounted score on the same scale as a plain sum of
    /// `rating / 5`.
    pub weighted_score: f64,
}

/// The five signals behind a score.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TrustInputs {
    pub authority_certs: usize,
    pub peer_reviews: PeerReviews,
    pub chain_depth: usize,
    pub verified_orders: usize,
    /// Days, capped at 365.
    pub account_age: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrustReport {
    pub score: f64,
    pub inputs: TrustInputs,
    pub meets_minimum: bool,
}

/// Parses an RFC 3339 timestamp, a naive date-time (taken as UTC) or a
/// bare `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
