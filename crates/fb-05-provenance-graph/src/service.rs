//! # Provenance Service
//!
//! Implements `ProvenanceApi` over any store that provides both resolver
//! ports, applying the bounds from `TraversalConfig`.

use crate::domain::entities::{ConflictReport, ForwardResult, ProvenanceTree, RecallResult};
use crate::domain::errors::GraphError;
use crate::domain::value_objects::{MergeStrategy, RecallFilter, TraversalConfig, Vocabulary};
use crate::domain::{chain, explain, forward, merge};
use crate::ports::inbound::ProvenanceApi;
use crate::ports::outbound::{BlockResolver, ForwardResolver};
use async_trait::async_trait;
use shared_types::{Block, BlockHash, State};
use std::sync::Arc;
use tracing::{info, instrument};

pub struct ProvenanceService<R> {
    resolver: Arc<R>,
    config: TraversalConfig,
}

impl<R> ProvenanceService<R>
where
    R: BlockResolver + ForwardResolver,
{
    pub fn new(resolver: Arc<R>) -> Self {
        Self::with_config(resolver, TraversalConfig::default())
    }

    pub fn with_config(resolver: Arc<R>, config: TraversalConfig) -> Self {
        Self { resolver, config }
    }

    pub fn config(&self) -> &TraversalConfig {
        &self.config
    }

    pub fn resolver(&self) -> &Arc<R> {
        &self.resolver
    }
}

#[async_trait]
impl<R> ProvenanceApi for ProvenanceService<R>
where
    R: BlockResolver + ForwardResolver + 'static,
{
    #[instrument(skip(self))]
    async fn chain(&self, hash: &str) -> Result<Vec<Block>, GraphError> {
        chain::chain(hash, self.resolver.as_ref(), self.config.chain_max_depth).await
    }

    #[instrument(skip(self))]
    async fn tree(&self, hash: &str) -> Result<Option<ProvenanceTree>, GraphError> {
        chain::tree(hash, self.resolver.as_ref(), self.config.tree_max_depth).await
    }

    #[instrument(skip(self))]
    async fn head(&self, hash: &str) -> Result<BlockHash, GraphError> {
        chain::head(hash, self.resolver.as_ref(), self.config.head_max_steps).await
    }

    #[instrument(skip(self))]
    async fn forward(&self, hash: &str) -> Result<ForwardResult, GraphError> {
        forward::forward(hash, self.resolver.as_ref()).await
    }

    #[instrument(skip(self))]
    async fn recall(&self, hash: &str, filter: &RecallFilter) -> Result<RecallResult, GraphError> {
        let result =
            forward::recall(hash, self.resolver.as_ref(), self.config.recall_max_depth, filter).await?;
        info!(affected = result.affected.len(), depth = result.depth, "recall complete");
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn downstream(&self, hash: &str) -> Result<Vec<Block>, GraphError> {
        forward::downstream(hash, self.resolver.as_ref(), self.config.recall_max_depth).await
    }

    #[instrument(skip(self))]
    async fn detect_conflict(&self, hash_a: &str, hash_b: &str) -> Result<ConflictReport, GraphError> {
        merge::detect_conflict(hash_a, hash_b, self.resolver.as_ref()).await
    }

    #[instrument(skip(self, state))]
    async fn merge(
        &self,
        hash_a: &str,
        hash_b: &str,
        state: Option<State>,
        strategy: MergeStrategy,
    ) -> Result<Block, GraphError> {
        merge::merge(hash_a, hash_b, self.resolver.as_ref(), state, strategy).await
    }

    #[instrument(skip(self, vocabulary))]
    async fn auto_merge(
        &self,
        hash_a: &str,
        hash_b: &str,
        vocabulary: Option<&Vocabulary>,
    ) -> Result<Block, GraphError> {
        merge::auto_merge(hash_a, hash_b, self.resolver.as_ref(), vocabulary).await
    }

    #[instrument(skip(self))]
    async fn explain(&self, hash: &str) -> Result<String, GraphError> {
        explain::explain(hash, self.resolver.as_ref(), self.config.explain_max_depth).await
    }
}
