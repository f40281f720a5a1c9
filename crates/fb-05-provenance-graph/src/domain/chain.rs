//! # Backward Traversal
//!
//! Walks provenance towards the past: along `refs.updates` (`chain`), along
//! every ref (`tree`), and forward again to the newest version (`head`).

use super::entities::{Ancestry, ProvenanceTree};
use super::errors::GraphResult;
use crate::ports::outbound::{BlockResolver, ForwardResolver};
use shared_types::{Block, BlockHash};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// Follows `refs.updates` back from `start_hash`, newest first.
///
/// Stops at a missing block, a revisited hash or after `max_depth` blocks.
pub async fn chain<R>(start_hash: &str, resolver: &R, max_depth: usize) -> GraphResult<Vec<Block>>
where
    R: BlockResolver + ?Sized,
{
    let mut visited = HashSet::new();
    let mut result = Vec::new();
    let mut current = Some(start_hash.to_string()).filter(|h| !h.is_empty());

    while let Some(hash) = current.take() {
        if result.len() >= max_depth {
            debug!(start = start_hash, max_depth, "chain depth bound reached");
            break;
        }
        if !visited.insert(hash.clone()) {
            debug!(hash = %hash, "update cycle detected");
            break;
        }
        let Some(block) = resolver.resolve(&hash).await? else {
            break;
        };
        current = block.updates().filter(|h| !h.is_empty()).map(str::to_string);
        result.push(block);
    }

    Ok(result)
}

/// Pending resolution of one hash in the tree walk.
struct Visit {
    hash: BlockHash,
    depth: usize,
    /// Arena index of the parent and slot index of the role within it.
    parent: Option<(usize, usize)>,
}

struct Node {
    block: Block,
    /// Role name and arena indices of resolved children, in ref order.
    slots: Vec<(String, Vec<usize>)>,
}

/// Resolves every ref recursively from `start_hash`.
///
/// Each hash is expanded at most once across the whole walk, in depth-first
/// pre-order, so a block shared by two parents hangs under the first one
/// reached. Returns `None` only when `start_hash` itself does not resolve.
pub async fn tree<R>(start_hash: &str, resolver: &R, max_depth: usize) -> GraphResult<Option<ProvenanceTree>>
where
    R: BlockResolver + ?Sized,
{
    let mut visited: HashSet<BlockHash> = HashSet::new();
    let mut arena: Vec<Node> = Vec::new();
    let mut stack = vec![Visit {
        hash: start_hash.to_string(),
        depth: 0,
        parent: None,
    }];

    while let Some(visit) = stack.pop() {
        if visit.hash.is_empty() || visit.depth >= max_depth || visited.contains(&visit.hash) {
            continue;
        }
        visited.insert(visit.hash.clone());

        let Some(block) = resolver.resolve(&visit.hash).await? else {
            continue;
        };

        let index = arena.len();
        if let Some((parent, slot)) = visit.parent {
            arena[parent].slots[slot].1.push(index);
        }

        let mut slots = Vec::with_capacity(block.refs.len());
        let mut children = Vec::new();
        for (slot, (role, target)) in block.refs.iter().enumerate() {
            slots.push((role.clone(), Vec::new()));
            for hash in target.hashes() {
                children.push(Visit {
                    hash: hash.to_string(),
                    depth: visit.depth + 1,
                    parent: Some((index, slot)),
                });
            }
        }
        // Reversed so the first ref is expanded first.
        stack.extend(children.into_iter().rev());
        arena.push(Node { block, slots });
    }

    Ok(assemble(arena))
}

/// Folds the arena into nested trees. Children always sit at higher indices
/// than their parent, so a reverse sweep sees every child before its parent.
fn assemble(arena: Vec<Node>) -> Option<ProvenanceTree> {
    let mut built: Vec<Option<ProvenanceTree>> = Vec::with_capacity(arena.len());
    built.resize_with(arena.len(), || None);

    for (index, node) in arena.into_iter().enumerate().rev() {
        let mut ancestors = BTreeMap::new();
        for (role, child_indices) in node.slots {
            let mut subtrees: Vec<ProvenanceTree> = child_indices
                .into_iter()
                .filter_map(|i| built.get_mut(i).and_then(Option::take))
                .collect();
            match subtrees.len() {
                0 => {}
                1 => {
                    if let Some(only) = subtrees.pop() {
                        ancestors.insert(role, Ancestry::Single(Box::new(only)));
                    }
                }
                _ => {
                    ancestors.insert(role, Ancestry::Multiple(subtrees));
                }
            }
        }
        built[index] = Some(ProvenanceTree {
            block: node.block,
            ancestors,
        });
    }

    built.into_iter().next().flatten()
}

/// Walks forward from any version to the newest one.
///
/// At each step the first block returned by `resolve_forward` whose
/// `updates` ref contains the current hash becomes current. A forward cycle
/// ends the walk at whichever cycle member was current when the repeat was
/// seen; `max_steps` bounds the walk otherwise.
pub async fn head<R>(start_hash: &str, resolver: &R, max_steps: usize) -> GraphResult<BlockHash>
where
    R: ForwardResolver + ?Sized,
{
    let mut current = start_hash.to_string();
    let mut visited = HashSet::from([current.clone()]);

    for _ in 0..max_steps {
        let children = resolver.resolve_forward(&current).await?;
        let updater = children.into_iter().find(|child| {
            child
                .refs
                .get("updates")
                .is_some_and(|updates| updates.contains(&current))
        });
        let Some(updater) = updater else {
            return Ok(current);
        };
        if !visited.insert(updater.hash.clone()) {
            debug!(hash = %current, "forward update cycle detected");
            return Ok(current);
        }
        current = updater.hash;
    }

    debug!(start = start_hash, max_steps, "head step bound reached");
    Ok(current)
}
