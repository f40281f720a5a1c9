//! # Reference Loops and Unbounded Graphs
//!
//! Content addressing makes true cycles impossible to mint, but a store can
//! still be fed raw blocks that point at each other, and a remote resolver
//! can fabricate an endless graph. Traversals stay bounded either way.

#[cfg(test)]
mod tests {
    use crate::fixtures::init_test_logging;
    use async_trait::async_trait;
    use fb_05_provenance_graph::{
        BlockResolver, ForwardResolver, InMemoryBlockStore, ProvenanceApi, ProvenanceService, RecallFilter,
        ResolverError, TraversalConfig,
    };
    use shared_types::{Block, RefValue, Refs, State};
    use std::sync::Arc;
    use std::time::Duration;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn raw(hash: &str, refs: &[(&str, &str)]) -> Block {
        Block {
            hash: hash.to_string(),
            block_type: "substance.product".into(),
            state: State::new(),
            refs: refs
                .iter()
                .map(|(role, target)| (role.to_string(), RefValue::from(*target)))
                .collect::<Refs>(),
        }
    }

    /// Fabricates a fresh ancestor and a fresh descendant for every hash.
    struct EndlessResolver;

    fn successor(hash: &str) -> String {
        format!("{hash}+")
    }

    #[async_trait]
    impl BlockResolver for EndlessResolver {
        async fn resolve(&self, hash: &str) -> Result<Option<Block>, ResolverError> {
            let next = successor(hash);
            Ok(Some(raw(hash, &[("updates", next.as_str())])))
        }
    }

    #[async_trait]
    impl ForwardResolver for EndlessResolver {
        async fn resolve_forward(&self, hash: &str) -> Result<Vec<Block>, ResolverError> {
            let next = successor(hash);
            Ok(vec![raw(&next, &[("updates", hash)])])
        }
    }

    /// Answers every lookup after a long delay.
    struct StalledResolver;

    #[async_trait]
    impl BlockResolver for StalledResolver {
        async fn resolve(&self, _hash: &str) -> Result<Option<Block>, ResolverError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(None)
        }
    }

    #[async_trait]
    impl ForwardResolver for StalledResolver {
        async fn resolve_forward(&self, _hash: &str) -> Result<Vec<Block>, ResolverError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(Vec::new())
        }
    }

    fn looped_store() -> InMemoryBlockStore {
        init_test_logging();
        InMemoryBlockStore::from_blocks([
            raw("loop-a", &[("updates", "loop-b"), ("inputs", "loop-b")]),
            raw("loop-b", &[("updates", "loop-a"), ("inputs", "loop-a")]),
        ])
    }

    // =============================================================================
    // STORED LOOPS
    // =============================================================================

    #[tokio::test]
    async fn test_chain_stops_at_loop() {
        let svc = ProvenanceService::new(Arc::new(looped_store()));
        let history = svc.chain("loop-a").await.unwrap();
        let hashes: Vec<&str> = history.iter().map(|b| b.hash.as_str()).collect();
        assert_eq!(hashes, vec!["loop-a", "loop-b"]);
    }

    #[tokio::test]
    async fn test_tree_visits_each_block_once() {
        let svc = ProvenanceService::new(Arc::new(looped_store()));
        let tree = svc.tree("loop-a").await.unwrap().unwrap();
        assert_eq!(tree.size(), 2);
    }

    #[tokio::test]
    async fn test_head_stops_inside_loop() {
        let svc = ProvenanceService::new(Arc::new(looped_store()));
        assert_eq!(svc.head("loop-a").await.unwrap(), "loop-b");
    }

    #[tokio::test]
    async fn test_recall_never_revisits() {
        let svc = ProvenanceService::new(Arc::new(looped_store()));
        let result = svc.recall("loop-a", &RecallFilter::default()).await.unwrap();
        assert_eq!(result.affected.len(), 1);
        assert_eq!(result.affected[0].hash, "loop-b");
    }

    #[tokio::test]
    async fn test_self_update_is_its_own_head() {
        let store = InMemoryBlockStore::from_blocks([raw("selfish", &[("updates", "selfish")])]);
        let svc = ProvenanceService::new(Arc::new(store));
        assert_eq!(svc.chain("selfish").await.unwrap().len(), 1);
        assert_eq!(svc.head("selfish").await.unwrap(), "selfish");
    }

    // =============================================================================
    // FABRICATED GRAPHS
    // =============================================================================

    #[tokio::test]
    async fn test_endless_graph_is_bounded() {
        init_test_logging();
        let config = TraversalConfig::default();
        let svc = ProvenanceService::new(Arc::new(EndlessResolver));

        assert_eq!(svc.chain("g").await.unwrap().len(), config.chain_max_depth);
        assert_eq!(svc.tree("g").await.unwrap().unwrap().size(), config.tree_max_depth);

        let head = svc.head("g").await.unwrap();
        assert_eq!(head.len(), 1 + config.head_max_steps);

        let result = svc.recall("g", &RecallFilter::default()).await.unwrap();
        assert_eq!(result.affected.len(), config.recall_max_depth);
        assert_eq!(result.depth, config.recall_max_depth);
    }

    #[tokio::test]
    async fn test_tight_bounds_respected() {
        let config = TraversalConfig {
            chain_max_depth: 3,
            tree_max_depth: 2,
            recall_max_depth: 1,
            head_max_steps: 4,
            explain_max_depth: 0,
        };
        let svc = ProvenanceService::with_config(Arc::new(EndlessResolver), config);
        assert_eq!(svc.chain("g").await.unwrap().len(), 3);
        assert_eq!(svc.tree("g").await.unwrap().unwrap().size(), 2);
        assert_eq!(svc.head("g").await.unwrap(), "g++++");
        assert_eq!(svc.recall("g", &RecallFilter::default()).await.unwrap().affected.len(), 1);
    }

    #[tokio::test]
    async fn test_stalled_resolver_can_be_abandoned() {
        let svc = ProvenanceService::new(Arc::new(StalledResolver));
        let outcome = tokio::time::timeout(Duration::from_millis(50), svc.chain("g")).await;
        assert!(outcome.is_err());
    }
}
