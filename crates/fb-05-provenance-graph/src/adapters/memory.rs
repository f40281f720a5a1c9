//! In-memory block store implementing both resolver ports.

use crate::domain::errors::ResolverError;
use crate::ports::outbound::{BlockResolver, ForwardResolver};
use async_trait::async_trait;
use shared_types::{Block, BlockHash};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct StoreInner {
    blocks: HashMap<BlockHash, Block>,
    /// Hashes in insertion order.
    order: Vec<BlockHash>,
    /// Target hash to the blocks referencing it, in insertion order.
    referencing: HashMap<BlockHash, Vec<BlockHash>>,
}

impl StoreInner {
    fn insert(&mut self, block: Block) -> bool {
        if block.hash.is_empty() || self.blocks.contains_key(&block.hash) {
            return false;
        }
        for target in block.refs.values().flat_map(|r| r.hashes()) {
            let sources = self.referencing.entry(target.to_string()).or_default();
            if !sources.contains(&block.hash) {
                sources.push(block.hash.clone());
            }
        }
        self.order.push(block.hash.clone());
        self.blocks.insert(block.hash.clone(), block);
        true
    }
}

/// Blocks indexed by hash and by reverse reference.
///
/// Forward lookups return referencing blocks in the order they were
/// inserted, so traversal output is deterministic.
#[derive(Default)]
pub struct InMemoryBlockStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from blocks. Blocks without a hash and repeated
    /// hashes are skipped.
    pub fn from_blocks<I: IntoIterator<Item = Block>>(blocks: I) -> Self {
        let mut inner = StoreInner::default();
        for block in blocks {
            inner.insert(block);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Adds a block. Returns `false` when it was already present or has no
    /// hash.
    pub async fn insert(&self, block: Block) -> bool {
        self.inner.write().await.insert(block)
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.order.is_empty()
    }

    pub async fn contains(&self, hash: &str) -> bool {
        self.inner.read().await.blocks.contains_key(hash)
    }

    /// All blocks in insertion order.
    pub async fn blocks(&self) -> Vec<Block> {
        let inner = self.inner.read().await;
        inner
            .order
            .iter()
            .filter_map(|h| inner.blocks.get(h).cloned())
            .collect()
    }
}

#[async_trait]
impl BlockResolver for InMemoryBlockStore {
    async fn resolve(&self, hash: &str) -> Result<Option<Block>, ResolverError> {
        Ok(self.inner.read().await.blocks.get(hash).cloned())
    }
}

#[async_trait]
impl ForwardResolver for InMemoryBlockStore {
    async fn resolve_forward(&self, hash: &str) -> Result<Vec<Block>, ResolverError> {
        let inner = self.inner.read().await;
        Ok(inner
            .referencing
            .get(hash)
            .map(|sources| {
                sources
                    .iter()
                    .filter_map(|h| inner.blocks.get(h).cloned())
                    .collect()
            })
            .unwrap_or_default())
    }
}
