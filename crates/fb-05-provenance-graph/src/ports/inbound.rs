//! # Inbound Ports (Driving Ports)
//!
//! The provenance API exposed to applications. Depth bounds come from the
//! implementation's `TraversalConfig`.

use crate::domain::entities::{ConflictReport, ForwardResult, ProvenanceTree, RecallResult};
use crate::domain::errors::GraphError;
use crate::domain::value_objects::{MergeStrategy, RecallFilter, Vocabulary};
use async_trait::async_trait;
use shared_types::{Block, BlockHash, State};

#[async_trait]
pub trait ProvenanceApi: Send + Sync {
    /// Update history of `hash`, newest first.
    async fn chain(&self, hash: &str) -> Result<Vec<Block>, GraphError>;

    /// Every resolvable ancestor of `hash`.
    async fn tree(&self, hash: &str) -> Result<Option<ProvenanceTree>, GraphError>;

    /// Newest version in the update chain containing `hash`.
    async fn head(&self, hash: &str) -> Result<BlockHash, GraphError>;

    async fn forward(&self, hash: &str) -> Result<ForwardResult, GraphError>;

    /// Everything downstream of `hash`.
    async fn recall(&self, hash: &str, filter: &RecallFilter) -> Result<RecallResult, GraphError>;

    async fn downstream(&self, hash: &str) -> Result<Vec<Block>, GraphError>;

    async fn detect_conflict(&self, hash_a: &str, hash_b: &str) -> Result<ConflictReport, GraphError>;

    async fn merge(
        &self,
        hash_a: &str,
        hash_b: &str,
        state: Option<State>,
        strategy: MergeStrategy,
    ) -> Result<Block, GraphError>;

    async fn auto_merge(
        &self,
        hash_a: &str,
        hash_b: &str,
        vocabulary: Option<&Vocabulary>,
    ) -> Result<Block, GraphError>;

    /// Human-readable provenance narrative.
    async fn explain(&self, hash: &str) -> Result<String, GraphError>;
}
