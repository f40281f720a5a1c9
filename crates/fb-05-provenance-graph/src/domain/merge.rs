//! # Fork Detection and Merging
//!
//! Two independent updates of the same block fork its chain. These
//! operations find the fork point and mint an `observe.merge` block that
//! reconciles both heads.

use super::chain::chain;
use super::entities::ConflictReport;
use super::errors::GraphResult;
use super::value_objects::{MergeStrategy, Vocabulary};
use crate::ports::outbound::BlockResolver;
use fb_02_block_factory::create_with_refs;
use shared_types::{Block, RefValue, Refs, State, Value};
use std::collections::{BTreeMap, HashSet};
use tracing::{debug, info};

pub const MERGE_TYPE: &str = "observe.merge";

/// State key holding merge metadata.
pub const MERGE_METADATA: &str = "_merge";

/// Chain depth used when looking for a common ancestor.
const CONFLICT_CHAIN_DEPTH: usize = 100;

fn trim_to(chain: Vec<Block>, ancestor: Option<&str>) -> Vec<Block> {
    let Some(ancestor) = ancestor else {
        return chain;
    };
    let mut trimmed = Vec::new();
    for block in chain {
        let stop = block.hash == ancestor;
        trimmed.push(block);
        if stop {
            break;
        }
    }
    trimmed
}

/// Compares the update chains behind two heads.
///
/// A conflict needs a common ancestor and neither head lying on the
/// other's chain.
pub async fn detect_conflict<R>(hash_a: &str, hash_b: &str, resolver: &R) -> GraphResult<ConflictReport>
where
    R: BlockResolver + ?Sized,
{
    if hash_a == hash_b {
        let chain: Vec<Block> = resolver.resolve(hash_a).await?.into_iter().collect();
        return Ok(ConflictReport {
            is_conflict: false,
            common_ancestor: Some(hash_a.to_string()),
            chain_a: chain.clone(),
            chain_b: chain,
        });
    }

    let chain_a = chain(hash_a, resolver, CONFLICT_CHAIN_DEPTH).await?;
    let chain_b = chain(hash_b, resolver, CONFLICT_CHAIN_DEPTH).await?;

    let hashes_a: HashSet<&str> = chain_a.iter().map(|b| b.hash.as_str()).collect();
    let hashes_b: HashSet<&str> = chain_b.iter().map(|b| b.hash.as_str()).collect();

    let common_ancestor = chain_a
        .iter()
        .find(|b| hashes_b.contains(b.hash.as_str()))
        .or_else(|| chain_b.iter().find(|b| hashes_a.contains(b.hash.as_str())))
        .map(|b| b.hash.clone());

    let is_conflict =
        common_ancestor.is_some() && !hashes_b.contains(hash_a) && !hashes_a.contains(hash_b);

    debug!(hash_a, hash_b, is_conflict, ancestor = ?common_ancestor, "conflict check");

    Ok(ConflictReport {
        is_conflict,
        chain_a: trim_to(chain_a, common_ancestor.as_deref()),
        chain_b: trim_to(chain_b, common_ancestor.as_deref()),
        common_ancestor,
    })
}

async fn state_of<R>(hash: &str, resolver: &R) -> GraphResult<State>
where
    R: BlockResolver + ?Sized,
{
    Ok(resolver
        .resolve(hash)
        .await?
        .map(|block| block.state)
        .unwrap_or_default())
}

/// Creates an `observe.merge` block over two heads.
///
/// Without an explicit `state`, the strategy derives one. An unresolvable
/// head contributes an empty state.
pub async fn merge<R>(
    hash_a: &str,
    hash_b: &str,
    resolver: &R,
    state: Option<State>,
    strategy: MergeStrategy,
) -> GraphResult<Block>
where
    R: BlockResolver + ?Sized,
{
    let mut merged = match state {
        Some(state) => state,
        None => match strategy {
            MergeStrategy::AWins => state_of(hash_a, resolver).await?,
            MergeStrategy::BWins => state_of(hash_b, resolver).await?,
            MergeStrategy::Manual => {
                let mut combined = state_of(hash_b, resolver).await?;
                combined.extend(state_of(hash_a, resolver).await?);
                combined
            }
        },
    };

    let conflict = detect_conflict(hash_a, hash_b, resolver).await?;

    let mut metadata = BTreeMap::new();
    metadata.insert("strategy".to_string(), Value::from(strategy.as_str()));
    metadata.insert("is_conflict".to_string(), Value::Bool(conflict.is_conflict));
    if let Some(ancestor) = conflict.common_ancestor {
        metadata.insert("common_ancestor".to_string(), Value::String(ancestor));
    }
    merged.insert(MERGE_METADATA.to_string(), Value::Object(metadata));

    let refs = Refs::from([
        ("merge_a".to_string(), RefValue::from(hash_a)),
        ("merge_b".to_string(), RefValue::from(hash_b)),
    ]);
    let block = create_with_refs(MERGE_TYPE, merged, refs)?;
    info!(hash = %block.hash, %strategy, is_conflict = conflict.is_conflict, "merge created");
    Ok(block)
}

/// Present, non-null field value.
fn field<'a>(state: &'a State, name: &str) -> Option<&'a Value> {
    state.get(name).filter(|v| !v.is_null())
}

/// Field-aware merge of two heads.
///
/// Starts from the union of both states with A winning. For fields the
/// vocabulary defines, a required field present on both sides keeps A's
/// value, an optional one keeps A's unless it is falsy.
pub async fn auto_merge<R>(
    hash_a: &str,
    hash_b: &str,
    resolver: &R,
    vocabulary: Option<&Vocabulary>,
) -> GraphResult<Block>
where
    R: BlockResolver + ?Sized,
{
    let state_a = state_of(hash_a, resolver).await?;
    let state_b = state_of(hash_b, resolver).await?;

    let mut merged = state_b.clone();
    merged.extend(state_a.clone());

    if let Some(vocabulary) = vocabulary {
        for (name, definition) in &vocabulary.fields {
            let chosen = match (field(&state_a, name), field(&state_b, name)) {
                (Some(a), Some(b)) => {
                    if definition.required || a.is_truthy() {
                        a
                    } else {
                        b
                    }
                }
                (Some(a), None) => a,
                (None, Some(b)) => b,
                (None, None) => continue,
            };
            merged.insert(name.clone(), chosen.clone());
        }
    }

    merge(hash_a, hash_b, resolver, Some(merged), MergeStrategy::Manual).await
}
