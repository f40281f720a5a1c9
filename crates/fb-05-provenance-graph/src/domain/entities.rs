//! # Traversal Results
//!
//! Owned result shapes returned by the traversal operations. All of them
//! serialize to the JSON layout the other FoodBlock SDKs produce.

use serde::{Deserialize, Serialize};
use shared_types::{Block, BlockHash};
use std::collections::BTreeMap;

/// A block with every resolvable ancestor, grouped by ref role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProvenanceTree {
    pub block: Block,
    pub ancestors: BTreeMap<String, Ancestry>,
}

/// Subtrees reached through one role.
///
/// A role with exactly one resolved target collapses to `Single`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Ancestry {
    Single(Box<ProvenanceTree>),
    Multiple(Vec<ProvenanceTree>),
}

impl Ancestry {
    /// Every subtree under this role, in ref order.
    pub fn subtrees(&self) -> &[ProvenanceTree] {
        match self {
            Ancestry::Single(tree) => std::slice::from_ref(tree.as_ref()),
            Ancestry::Multiple(trees) => trees,
        }
    }
}

impl ProvenanceTree {
    /// Number of blocks in this tree, root included.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.ancestors.values().flat_map(Ancestry::subtrees));
        }
        count
    }
}

/// One block pointing at the queried hash, and the role it uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Referencing {
    pub block: Block,
    pub role: String,
}

/// Single-hop forward lookup.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForwardResult {
    pub referencing: Vec<Referencing>,
    pub count: usize,
}

/// Blocks downstream of a recalled source.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RecallResult {
    pub affected: Vec<Block>,
    /// Deepest hop at which an affected block was found.
    pub depth: usize,
    /// One path per affected block, source first.
    pub paths: Vec<Vec<BlockHash>>,
}

/// Fork analysis of two chain heads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictReport {
    pub is_conflict: bool,
    pub common_ancestor: Option<BlockHash>,
    /// From `hash_a` back to the common ancestor, inclusive.
    pub chain_a: Vec<Block>,
    pub chain_b: Vec<Block>,
}
