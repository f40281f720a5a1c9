//! # Block Lifecycle
//!
//! Creation, versioning and erasure of a product across the block factory
//! and the provenance graph:
//!
//! 1. **Genesis**: entity blocks are content-addressed and repeatable
//! 2. **Versioning**: updates and merge-updates extend one chain
//! 3. **Erasure**: a tombstone becomes the head of the chain
//! 4. **Naming**: aliases and `fb:` URIs resolve to hashes

#[cfg(test)]
mod tests {
    use crate::fixtures::{block, init_test_logging, refs, state};
    use fb_02_block_factory::{
        create, merge_update, tombstone, update, validate, AliasRegistry, BlockError, TOMBSTONE_TYPE,
    };
    use fb_05_provenance_graph::{InMemoryBlockStore, ProvenanceApi, ProvenanceService};
    use serde_json::json;
    use shared_types::{from_uri, to_alias_uri, to_uri, FoodBlockUri, RefValue, Refs, Value};
    use std::sync::Arc;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn service(blocks: Vec<shared_types::Block>) -> ProvenanceService<InMemoryBlockStore> {
        init_test_logging();
        ProvenanceService::new(Arc::new(InMemoryBlockStore::from_blocks(blocks)))
    }

    // =============================================================================
    // GENESIS
    // =============================================================================

    #[test]
    fn test_entities_are_content_addressed() {
        let a = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        let b = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        let c = block("actor.producer", json!({"name": "Green Acres Farm "}), json!({}));
        assert_eq!(a.hash, b.hash);
        assert_ne!(a.hash, c.hash);
    }

    #[test]
    fn test_events_never_collide() {
        let farm = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        let first = block("transfer.order", json!({"quantity": 1}), json!({"seller": farm.hash}));
        let second = block("transfer.order", json!({"quantity": 1}), json!({"seller": farm.hash}));
        assert_ne!(first.hash, second.hash);
    }

    #[test]
    fn test_core_schema_validation_through_factory() {
        let seller = "a".repeat(64);
        let product = block(
            "substance.product",
            json!({"$schema": "foodblock:substance.product@1.0", "name": "Sourdough", "price": 4.5}),
            json!({"seller": seller}),
        );
        assert!(validate(&product, None).is_empty());

        let order = block(
            "transfer.order",
            json!({"$schema": "foodblock:transfer.order@1.0", "quantity": 2}),
            json!({"seller": seller}),
        );
        // instance_id is injected, so only the missing buyer is reported.
        assert_eq!(validate(&order, None), vec!["Missing expected ref: refs.buyer"]);
    }

    // =============================================================================
    // VERSIONING
    // =============================================================================

    #[tokio::test]
    async fn test_versions_form_one_chain() {
        let v1 = block("substance.product", json!({"name": "Sourdough", "price": 4.5}), json!({}));
        let v2 = update(
            &v1.hash,
            "substance.product",
            state(json!({"name": "Sourdough", "price": 5.0})),
            refs(json!({})),
        )
        .unwrap();
        let v3 = merge_update(&v2, state(json!({"organic": true})), Refs::new()).unwrap();

        assert_eq!(v3.state.get("price"), Some(&Value::Number(5.0)));
        assert_eq!(v3.state.get("organic"), Some(&Value::Bool(true)));

        let svc = service(vec![v1.clone(), v2.clone(), v3.clone()]);
        let history = svc.chain(&v3.hash).await.unwrap();
        let hashes: Vec<&str> = history.iter().map(|b| b.hash.as_str()).collect();
        assert_eq!(hashes, vec![v3.hash.as_str(), v2.hash.as_str(), v1.hash.as_str()]);

        assert_eq!(svc.head(&v1.hash).await.unwrap(), v3.hash);
        assert_eq!(svc.head(&v3.hash).await.unwrap(), v3.hash);
    }

    #[test]
    fn test_update_requires_previous() {
        let err = update("", "substance.product", state(json!({"name": "x"})), refs(json!({}))).unwrap_err();
        assert!(matches!(err, BlockError::MissingPreviousHash));
    }

    // =============================================================================
    // ERASURE
    // =============================================================================

    #[tokio::test]
    async fn test_tombstone_becomes_head() {
        let owner = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        let review = block("observe.review", json!({"rating": 2, "text": "stale"}), json!({"author": owner.hash}));
        let erased = tombstone(&review.hash, &owner.hash, None).unwrap();

        assert_eq!(erased.block_type, TOMBSTONE_TYPE);
        assert_eq!(erased.single_ref("target"), Some(review.hash.as_str()));

        let svc = service(vec![owner, review.clone(), erased.clone()]);
        assert_eq!(svc.head(&review.hash).await.unwrap(), erased.hash);
        let history = svc.chain(&erased.hash).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].hash, review.hash);
    }

    // =============================================================================
    // NAMING
    // =============================================================================

    #[test]
    fn test_aliases_resolve_into_refs() {
        let mut registry = AliasRegistry::new();
        let farm = registry
            .create("actor.producer", state(json!({"name": "Green Acres Farm"})), &Refs::new(), Some("farm"))
            .unwrap();
        let wheat = registry
            .create(
                "substance.ingredient",
                state(json!({"name": "Wheat"})),
                &Refs::from([("seller".to_string(), RefValue::from("@farm"))]),
                Some("wheat"),
            )
            .unwrap();

        assert_eq!(wheat.single_ref("seller"), Some(farm.hash.as_str()));
        assert_eq!(registry.resolve("@wheat").unwrap(), wheat.hash);

        let direct = create(
            "substance.ingredient",
            state(json!({"name": "Wheat"})),
            refs(json!({"seller": farm.hash})),
        )
        .unwrap();
        assert_eq!(direct.hash, wheat.hash);
    }

    #[test]
    fn test_uris_name_blocks() {
        let farm = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        assert_eq!(from_uri(&to_uri(&farm.hash)).unwrap(), FoodBlockUri::Hash(farm.hash.clone()));
        assert_eq!(
            from_uri(&to_alias_uri("actor.producer", "green-acres")).unwrap(),
            FoodBlockUri::Alias {
                block_type: "actor.producer".into(),
                alias: "green-acres".into(),
            }
        );
    }
}
