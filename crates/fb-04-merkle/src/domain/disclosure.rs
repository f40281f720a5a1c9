//! # Selective Disclosure
//!
//! Reveals a subset of state fields together with the sibling hashes needed
//! to recompute the state's Merkle root.

use super::errors::MerkleError;
use super::tree::{hash_pair, leaf_hash, merkleize};
use serde::{Deserialize, Serialize};
use shared_types::State;
use std::collections::BTreeSet;

/// Disclosed fields plus the proof tying them to `root`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disclosure {
    pub disclosed: State,
    /// Sibling hashes in the order the verifier consumes them.
    pub proof: Vec<String>,
    pub root: String,
}

/// Discloses `field_names` from `state`. Names absent from `state` are
/// skipped.
pub fn selective_disclose(state: &State, field_names: &[&str]) -> Result<Disclosure, MerkleError> {
    let tree = merkleize(state)?;

    let disclosed: State = field_names
        .iter()
        .filter_map(|name| state.get(*name).map(|v| ((*name).to_string(), v.clone())))
        .collect();

    let mut current: BTreeSet<usize> = state
        .keys()
        .enumerate()
        .filter(|(_, field)| disclosed.contains_key(field.as_str()))
        .map(|(index, _)| index)
        .collect();

    let mut proof = Vec::new();
    let layer_count = tree.tree.len();
    for layer in tree.tree.iter().take(layer_count.saturating_sub(1)) {
        let mut next = BTreeSet::new();
        for &index in &current {
            let sibling = index ^ 1;
            if sibling >= layer.len() {
                // Self-paired odd node.
                proof.push(layer[index].clone());
            } else if !current.contains(&sibling) {
                proof.push(layer[sibling].clone());
            }
            next.insert(index / 2);
        }
        current = next;
    }

    Ok(Disclosure {
        disclosed,
        proof,
        root: tree.root,
    })
}

fn is_digest(entry: &str) -> bool {
    entry.len() == 64 && entry.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}

/// Recomputes the root from `disclosed` and `proof` and compares it with
/// `root`.
///
/// Returns `Ok(false)` for an empty disclosure or a root mismatch.
///
/// # Errors
///
/// `MalformedProofEntry` when a proof entry is not a hex digest, and
/// `NonFiniteNumber` for a disclosed NaN or infinity.
pub fn verify_proof(disclosed: &State, proof: &[String], root: &str) -> Result<bool, MerkleError> {
    if disclosed.is_empty() {
        return Ok(false);
    }
    if let Some(index) = proof.iter().position(|entry| !is_digest(entry)) {
        return Err(MerkleError::MalformedProofEntry { index });
    }

    let mut current = disclosed
        .iter()
        .map(|(field, value)| leaf_hash(field, value))
        .collect::<Result<Vec<_>, _>>()?;
    let mut remaining = proof.iter();
    let mut proof_left = proof.len();

    while current.len() > 1 || proof_left > 0 {
        let mut next = Vec::with_capacity(current.len() / 2 + 1);
        let mut i = 0;
        while i < current.len() {
            let left = &current[i];
            let right = if i + 1 < current.len() {
                i += 2;
                current[i - 1].as_str()
            } else if let Some(sibling) = remaining.next() {
                proof_left -= 1;
                i += 1;
                sibling.as_str()
            } else {
                i += 1;
                left.as_str()
            };
            next.push(hash_pair(left, right));
        }
        current = next;
    }

    Ok(current.len() == 1 && current[0] == root)
}
