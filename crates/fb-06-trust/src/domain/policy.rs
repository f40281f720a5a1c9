//! # Trust Policies
//!
//! A trust policy is published as an `observe.trust_policy` block so that
//! consumers can share scoring rules by hash.

use super::entities::{TrustPolicy, TrustWeights};
use super::errors::TrustError;
use fb_02_block_factory::create_with_refs;
use shared_types::{Block, RefValue, Refs, State, Value};
use std::collections::BTreeMap;

pub const TRUST_POLICY_TYPE: &str = "observe.trust_policy";

fn weights_value(weights: &TrustWeights) -> Value {
    Value::Object(BTreeMap::from([
        ("authority_certs".to_string(), Value::from(weights.authority_certs)),
        ("peer_reviews".to_string(), Value::from(weights.peer_reviews)),
        ("chain_depth".to_string(), Value::from(weights.chain_depth)),
        ("verified_orders".to_string(), Value::from(weights.verified_orders)),
        ("account_age".to_string(), Value::from(weights.account_age)),
    ]))
}

/// Publishes a policy block.
pub fn create_trust_policy(
    name: &str,
    weights: &TrustWeights,
    required_authorities: Option<&[String]>,
    min_score: Option<f64>,
    author: Option<&str>,
) -> Result<Block, TrustError> {
    if name.is_empty() {
        return Err(TrustError::MissingArgument { name: "name" });
    }

    let mut state = State::new();
    state.insert("name".into(), Value::from(name));
    state.insert("weights".into(), weights_value(weights));
    if let Some(authorities) = required_authorities {
        state.insert(
            "required_authorities".into(),
            Value::Array(authorities.iter().cloned().map(Value::String).collect()),
        );
    }
    if let Some(min) = min_score {
        state.insert("min_score".into(), Value::from(min));
    }

    let mut refs = Refs::new();
    if let Some(author) = author.filter(|a| !a.is_empty()) {
        refs.insert("author".into(), RefValue::from(author));
    }

    Ok(create_with_refs(TRUST_POLICY_TYPE, state, refs)?)
}

impl TrustPolicy {
    /// Reads a policy back from its block. Missing or non-numeric weights
    /// keep their defaults.
    pub fn from_block(block: &Block) -> Self {
        let mut policy = TrustPolicy::default();

        if let Some(weights) = block.state.get("weights").and_then(Value::as_object) {
            let w = &mut policy.weights;
            for (field, slot) in [
                ("authority_certs", &mut w.authority_certs),
                ("peer_reviews", &mut w.peer_reviews),
                ("chain_depth", &mut w.chain_depth),
                ("verified_orders", &mut w.verified_orders),
                ("account_age", &mut w.account_age),
            ] {
                if let Some(value) = weights.get(field).and_then(Value::as_f64) {
                    *slot = value;
                }
            }
        }
        if let Some(min) = block.state.get("min_score").and_then(Value::as_f64) {
            policy.min_score = min;
        }
        if let Some(authorities) = block.state.get("required_authorities").and_then(Value::as_array) {
            policy.required_authorities = authorities
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        policy
    }
}
