//! # Forward Traversal
//!
//! Impact analysis: which blocks were built on top of a given block.

use super::entities::{ForwardResult, RecallResult, Referencing};
use super::errors::GraphResult;
use super::value_objects::RecallFilter;
use crate::ports::outbound::ForwardResolver;
use shared_types::{Block, BlockHash};
use std::collections::{HashSet, VecDeque};
use tracing::debug;

/// Type prefix reported by [`downstream`].
pub const SUBSTANCE_PREFIX: &str = "substance";

/// Every block that references `hash`, once per matching role.
pub async fn forward<R>(hash: &str, resolver: &R) -> GraphResult<ForwardResult>
where
    R: ForwardResolver + ?Sized,
{
    let children = resolver.resolve_forward(hash).await?;
    let mut referencing = Vec::new();
    for block in children {
        let roles: Vec<String> = block
            .refs
            .iter()
            .filter(|(_, target)| target.contains(hash))
            .map(|(role, _)| role.clone())
            .collect();
        for role in roles {
            referencing.push(Referencing {
                block: block.clone(),
                role,
            });
        }
    }
    let count = referencing.len();
    Ok(ForwardResult { referencing, count })
}

/// Breadth-first search downstream of `source_hash`.
///
/// A child is followed only when one of its roles (restricted to
/// `filter.roles` if set) points back at the block it was found from. Each
/// hash is entered once. Children outside `filter.types` are still walked
/// through but not reported.
pub async fn recall<R>(
    source_hash: &str,
    resolver: &R,
    max_depth: usize,
    filter: &RecallFilter,
) -> GraphResult<RecallResult>
where
    R: ForwardResolver + ?Sized,
{
    let mut visited: HashSet<BlockHash> = HashSet::from([source_hash.to_string()]);
    let mut result = RecallResult::default();
    let mut queue = VecDeque::from([(source_hash.to_string(), 0usize, vec![source_hash.to_string()])]);

    while let Some((current, depth, path)) = queue.pop_front() {
        if depth >= max_depth {
            debug!(hash = %current, depth, "recall depth bound reached");
            continue;
        }

        for block in resolver.resolve_forward(&current).await? {
            if block.hash.is_empty() || visited.contains(&block.hash) {
                continue;
            }
            let linked = block
                .refs
                .iter()
                .any(|(role, target)| target.contains(&current) && filter.accepts_role(role));
            if !linked {
                continue;
            }
            visited.insert(block.hash.clone());

            let mut next_path = path.clone();
            next_path.push(block.hash.clone());
            let next_depth = depth + 1;

            if filter.accepts_type(&block.block_type) {
                result.depth = result.depth.max(next_depth);
                result.paths.push(next_path.clone());
                queue.push_back((block.hash.clone(), next_depth, next_path));
                result.affected.push(block);
            } else {
                queue.push_back((block.hash, next_depth, next_path));
            }
        }
    }

    Ok(result)
}

/// Substance blocks downstream of an ingredient.
pub async fn downstream<R>(ingredient_hash: &str, resolver: &R, max_depth: usize) -> GraphResult<Vec<Block>>
where
    R: ForwardResolver + ?Sized,
{
    let filter = RecallFilter::types([SUBSTANCE_PREFIX]);
    Ok(recall(ingredient_hash, resolver, max_depth, &filter).await?.affected)
}
