//! # Selective Disclosure and Snapshots
//!
//! A seller proves individual fields of a product without revealing the
//! rest, and an auditor commits to a whole corpus with one snapshot block.

#[cfg(test)]
mod tests {
    use crate::fixtures::{init_test_logging, Bakery};
    use fb_04_merkle::{
        create_snapshot, merkleize, selective_disclose, summarize, verify_proof, verify_snapshot, DateRange,
        MerkleError, SNAPSHOT_TYPE,
    };
    use fb_05_provenance_graph::{InMemoryBlockStore, ProvenanceApi, ProvenanceService};
    use shared_types::{json_object, Value};
    use std::sync::Arc;

    // =============================================================================
    // FIELD DISCLOSURE
    // =============================================================================

    #[test]
    fn test_prove_product_name_without_price() {
        let bakery = Bakery::build();
        let root = merkleize(&bakery.bread.state).unwrap().root;

        let disclosure = selective_disclose(&bakery.bread.state, &["name"]).unwrap();
        assert_eq!(disclosure.root, root);
        assert_eq!(disclosure.disclosed.len(), 1);
        assert!(!disclosure.disclosed.contains_key("price"));
        assert_eq!(disclosure.proof.len(), 1);
        assert!(verify_proof(&disclosure.disclosed, &disclosure.proof, &root).unwrap());
    }

    #[test]
    fn test_disclosure_travels_as_json() {
        let bakery = Bakery::build();
        let disclosure = selective_disclose(&bakery.bread.state, &["name", "price"]).unwrap();
        let wire = serde_json::to_string(&disclosure).unwrap();
        let received: fb_04_merkle::Disclosure = serde_json::from_str(&wire).unwrap();
        assert_eq!(received, disclosure);
        assert!(verify_proof(&received.disclosed, &received.proof, &received.root).unwrap());
    }

    #[test]
    fn test_root_changes_with_any_field() {
        let bakery = Bakery::build();
        let mut cheaper = bakery.bread.state.clone();
        cheaper.insert("price".into(), Value::Number(3.5));
        assert_ne!(
            merkleize(&bakery.bread.state).unwrap().root,
            merkleize(&cheaper).unwrap().root
        );
    }

    #[test]
    fn test_non_finite_state_cannot_be_merkleized() {
        let mut state = json_object(serde_json::json!({"name": "Sourdough"}));
        state.insert("price".into(), Value::Number(f64::INFINITY));
        assert!(matches!(merkleize(&state), Err(MerkleError::NonFiniteNumber { .. })));
    }

    // =============================================================================
    // SNAPSHOTS
    // =============================================================================

    #[test]
    fn test_snapshot_commits_to_corpus() {
        init_test_logging();
        let bakery = Bakery::build();
        let blocks = bakery.blocks();
        let range = DateRange {
            start: "2026-01-01".into(),
            end: "2026-01-31".into(),
        };
        let snapshot = create_snapshot(&blocks, Some("January audit"), Some(&range)).unwrap();

        assert_eq!(snapshot.block_type, SNAPSHOT_TYPE);
        assert_eq!(snapshot.state.get("block_count"), Some(&Value::Number(7.0)));
        assert_eq!(snapshot.state_str("summary"), Some("January audit"));
        assert_eq!(snapshot.refs["blocks"].hashes().count(), 7);

        let summary = summarize(&blocks);
        assert_eq!(summary.total, 7);
        assert_eq!(summary.by_type["actor.producer"], 2);
        assert_eq!(summary.by_type["substance.ingredient"], 2);

        let check = verify_snapshot(&snapshot, &blocks);
        assert!(check.valid);
        assert!(check.missing.is_empty());

        let mut reordered = blocks.clone();
        reordered.reverse();
        assert!(verify_snapshot(&snapshot, &reordered).valid);
    }

    #[test]
    fn test_snapshot_detects_dropped_block() {
        let bakery = Bakery::build();
        let snapshot = create_snapshot(&bakery.blocks(), None, None).unwrap();

        let partial: Vec<_> = bakery
            .blocks()
            .into_iter()
            .filter(|b| b.hash != bakery.order.hash)
            .collect();
        let check = verify_snapshot(&snapshot, &partial);
        assert!(!check.valid);
        assert_eq!(check.missing, vec![bakery.order.hash.clone()]);
    }

    #[test]
    fn test_empty_snapshot_rejected() {
        assert!(matches!(create_snapshot(&[], None, None), Err(MerkleError::EmptySnapshot)));
    }

    #[tokio::test]
    async fn test_snapshot_is_a_forward_reference() {
        let bakery = Bakery::build();
        let snapshot = create_snapshot(&bakery.blocks(), None, None).unwrap();
        let mut blocks = bakery.blocks();
        blocks.push(snapshot.clone());
        let svc = ProvenanceService::new(Arc::new(InMemoryBlockStore::from_blocks(blocks)));

        let result = svc.forward(&bakery.wheat.hash).await.unwrap();
        let snapshot_ref = result
            .referencing
            .iter()
            .find(|r| r.block.hash == snapshot.hash)
            .unwrap();
        assert_eq!(snapshot_ref.role, "blocks");
    }
}
