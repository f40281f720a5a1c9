//! # Supply Chain Traversal
//!
//! Backward and forward traversal over the bakery corpus held in the
//! in-memory store, driven through the provenance service.

#[cfg(test)]
mod tests {
    use crate::fixtures::{block, init_test_logging, Bakery};
    use fb_05_provenance_graph::{
        Ancestry, InMemoryBlockStore, ProvenanceApi, ProvenanceService, RecallFilter, TraversalConfig,
    };
    use serde_json::json;
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn setup() -> (Bakery, ProvenanceService<InMemoryBlockStore>) {
        init_test_logging();
        let bakery = Bakery::build();
        let store = InMemoryBlockStore::from_blocks(bakery.blocks());
        (bakery, ProvenanceService::new(Arc::new(store)))
    }

    fn hashes(blocks: &[shared_types::Block]) -> Vec<&str> {
        blocks.iter().map(|b| b.hash.as_str()).collect()
    }

    // =============================================================================
    // BACKWARD: where did this come from?
    // =============================================================================

    #[tokio::test]
    async fn test_tree_reaches_the_farm() {
        let (bakery, svc) = setup();
        let tree = svc.tree(&bakery.bread.hash).await.unwrap().unwrap();

        assert_eq!(tree.size(), 6);
        let flour = match &tree.ancestors["inputs"] {
            Ancestry::Single(flour) => flour,
            Ancestry::Multiple(_) => panic!("single input expected"),
        };
        assert_eq!(flour.block.hash, bakery.flour.hash);
        let wheat = &flour.ancestors["source"].subtrees()[0];
        assert_eq!(wheat.ancestors["seller"].subtrees()[0].block.hash, bakery.farm.hash);
    }

    #[tokio::test]
    async fn test_tree_of_unknown_block_is_none() {
        let (_, svc) = setup();
        assert!(svc.tree(&"0".repeat(64)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_explain_bread() {
        let (bakery, svc) = setup();
        assert_eq!(
            svc.explain(&bakery.bread.hash).await.unwrap(),
            "Sourdough ($4.5). By Green Acres Bakery. Made from Flour (Stone Mill)."
        );
        assert_eq!(
            svc.explain("missing").await.unwrap(),
            "Block not found: missing"
        );
    }

    #[tokio::test]
    async fn test_shallow_explain_config_keeps_sources() {
        let bakery = Bakery::build();
        let store = Arc::new(InMemoryBlockStore::from_blocks(bakery.blocks()));
        let config = TraversalConfig {
            explain_max_depth: 0,
            ..TraversalConfig::default()
        };
        let svc = ProvenanceService::with_config(store, config);
        assert_eq!(
            svc.explain(&bakery.bread.hash).await.unwrap(),
            "Sourdough ($4.5). By Green Acres Bakery. Made from Flour (Stone Mill)."
        );
    }

    // =============================================================================
    // FORWARD: what did this become?
    // =============================================================================

    #[tokio::test]
    async fn test_forward_lists_roles() {
        let (bakery, svc) = setup();
        let result = svc.forward(&bakery.bakery.hash).await.unwrap();
        assert_eq!(result.count, 2);
        assert!(result.referencing.iter().all(|r| r.role == "seller"));

        let flour_users = svc.forward(&bakery.flour.hash).await.unwrap();
        assert_eq!(flour_users.count, 1);
        assert_eq!(flour_users.referencing[0].role, "inputs");
        assert_eq!(flour_users.referencing[0].block.hash, bakery.bread.hash);
    }

    #[tokio::test]
    async fn test_contaminated_wheat_recall() {
        let (bakery, svc) = setup();
        let result = svc.recall(&bakery.wheat.hash, &RecallFilter::default()).await.unwrap();

        assert_eq!(
            hashes(&result.affected),
            vec![bakery.flour.hash.as_str(), bakery.bread.hash.as_str(), bakery.order.hash.as_str()]
        );
        assert_eq!(result.depth, 3);
        assert_eq!(
            result.paths.last().unwrap(),
            &vec![
                bakery.wheat.hash.clone(),
                bakery.flour.hash.clone(),
                bakery.bread.hash.clone(),
                bakery.order.hash.clone(),
            ]
        );
    }

    #[tokio::test]
    async fn test_recall_filters() {
        let (bakery, svc) = setup();

        let by_role = RecallFilter::default().with_roles(["source"]);
        let result = svc.recall(&bakery.wheat.hash, &by_role).await.unwrap();
        assert_eq!(hashes(&result.affected), vec![bakery.flour.hash.as_str()]);

        let orders_only = RecallFilter::types(["transfer"]);
        let result = svc.recall(&bakery.wheat.hash, &orders_only).await.unwrap();
        assert_eq!(hashes(&result.affected), vec![bakery.order.hash.as_str()]);
        assert_eq!(result.depth, 3);
    }

    #[tokio::test]
    async fn test_downstream_reports_substances() {
        let (bakery, svc) = setup();
        let products = svc.downstream(&bakery.wheat.hash).await.unwrap();
        assert_eq!(hashes(&products), vec![bakery.flour.hash.as_str(), bakery.bread.hash.as_str()]);
    }

    #[tokio::test]
    async fn test_store_grows_while_serving() {
        let (bakery, svc) = setup();
        let resale = block(
            "transfer.order",
            json!({"quantity": 1}),
            json!({"item": bakery.bread.hash}),
        );
        assert!(svc.resolver().insert(resale.clone()).await);
        assert!(!svc.resolver().insert(resale.clone()).await);

        let result = svc.recall(&bakery.bread.hash, &RecallFilter::default()).await.unwrap();
        assert_eq!(result.affected.len(), 2);
        assert!(hashes(&result.affected).contains(&resale.hash.as_str()));
    }
}
