//! # Trust
//!
//! Scores a farm from the blocks around it, publishes the scoring rules as
//! a policy block, and nets attestations against disputes for a product.

#[cfg(test)]
mod tests {
    use crate::fixtures::{block, state, Bakery};
    use chrono::{DateTime, TimeZone, Utc};
    use fb_06_trust::{
        attest, compute_trust_at, create_trust_policy, dispute, trace_attestations, trust_score, TrustBlock,
        TrustError, TrustPolicy, TrustWeights, TRUST_POLICY_TYPE,
    };
    use serde_json::json;
    use shared_types::Block;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    struct Neighbourhood {
        farm: Block,
        authority: Block,
        blocks: Vec<TrustBlock>,
    }

    fn neighbourhood() -> Neighbourhood {
        let bakery = Bakery::build();
        let farm = bakery.farm.clone();
        let authority = block("actor.authority", json!({"name": "Soil Association"}), json!({}));
        let reviewer = block("actor.venue", json!({"name": "Corner Cafe"}), json!({}));
        let buyer = bakery.mill.clone();

        let certification = block(
            "observe.certification",
            json!({"name": "Organic", "valid_until": "2027-01-01"}),
            json!({"subject": farm.hash, "authority": authority.hash}),
        );
        let review = block(
            "observe.review",
            json!({"rating": 5}),
            json!({"subject": farm.hash, "author": reviewer.hash}),
        );
        let order = block(
            "transfer.order",
            json!({"quantity": 500, "unit": "kg", "payment_ref": "pi_123"}),
            json!({"seller": farm.hash, "buyer": buyer.hash}),
        );

        let blocks = vec![
            TrustBlock::new(farm.clone()).created_at("2026-02-21T12:00:00Z"),
            TrustBlock::new(authority.clone()),
            TrustBlock::new(reviewer.clone()),
            TrustBlock::from(certification).authored_by(&authority.hash),
            TrustBlock::from(review).authored_by(&reviewer.hash),
            TrustBlock::from(order).authored_by(&buyer.hash),
        ];
        Neighbourhood {
            farm,
            authority,
            blocks,
        }
    }

    // =============================================================================
    // ACTOR TRUST
    // =============================================================================

    #[test]
    fn test_farm_trust_breakdown() {
        let n = neighbourhood();
        let report = compute_trust_at(&n.farm.hash, &n.blocks, None, now()).unwrap();

        assert_eq!(report.inputs.authority_certs, 1);
        assert_eq!(report.inputs.peer_reviews.count, 1);
        assert_eq!(report.inputs.peer_reviews.avg_score, 5.0);
        assert_eq!(report.inputs.peer_reviews.weighted_score, 1.0);
        assert_eq!(report.inputs.chain_depth, 3);
        assert_eq!(report.inputs.verified_orders, 1);
        assert_eq!(report.inputs.account_age, 100.0);
        assert_eq!(report.score, 61.5);
        assert!(report.meets_minimum);
    }

    #[test]
    fn test_published_policy_drives_scoring() {
        let n = neighbourhood();
        let weights = TrustWeights {
            account_age: 0.0,
            ..TrustWeights::default()
        };
        let authorities = vec![n.authority.hash.clone()];
        let policy_block =
            create_trust_policy("No seniority", &weights, Some(&authorities), Some(12.0), None).unwrap();
        assert_eq!(policy_block.block_type, TRUST_POLICY_TYPE);

        let policy = TrustPolicy::from_block(&policy_block);
        assert_eq!(policy.required_authorities, authorities);

        let report = compute_trust_at(&n.farm.hash, &n.blocks, Some(&policy), now()).unwrap();
        assert_eq!(report.score, 11.5);
        assert!(!report.meets_minimum);
    }

    #[test]
    fn test_expired_certification_ignored() {
        let mut n = neighbourhood();
        let lapsed = block(
            "observe.certification",
            json!({"name": "Organic", "valid_until": "2025-12-31"}),
            json!({"subject": n.farm.hash, "authority": n.authority.hash}),
        );
        n.blocks.push(TrustBlock::from(lapsed).authored_by(&n.authority.hash));

        let report = compute_trust_at(&n.farm.hash, &n.blocks, None, now()).unwrap();
        assert_eq!(report.inputs.authority_certs, 1);
    }

    #[test]
    fn test_missing_actor_rejected() {
        let n = neighbourhood();
        assert_eq!(
            compute_trust_at("", &n.blocks, None, now()).unwrap_err(),
            TrustError::MissingActor
        );
    }

    // =============================================================================
    // ATTESTATIONS
    // =============================================================================

    #[test]
    fn test_attestations_net_against_disputes() {
        let bakery = Bakery::build();
        let lab = block("actor.authority", json!({"name": "County Lab"}), json!({}));
        let inspector = block("actor.authority", json!({"name": "Inspector"}), json!({}));

        let verified = attest(&bakery.bread.hash, &lab.hash, Some("verified"), Some("lab_test")).unwrap();
        let witnessed = attest(&bakery.bread.hash, &bakery.mill.hash, Some("witnessed"), None).unwrap();
        let challenge = dispute(
            &bakery.bread.hash,
            &inspector.hash,
            "undeclared sesame",
            state(json!({"severity": "major"})),
        )
        .unwrap();
        let unrelated = attest(&bakery.flour.hash, &lab.hash, None, None).unwrap();

        let corpus = [verified, witnessed, challenge, unrelated];
        let trace = trace_attestations(&bakery.bread.hash, &corpus);
        assert_eq!(trace.attestations.len(), 2);
        assert_eq!(trace.disputes.len(), 1);
        assert_eq!(trace.score, 2);
        assert_eq!(trust_score(&bakery.bread.hash, &corpus), 2);
    }

    #[test]
    fn test_dispute_requires_reason() {
        let err = dispute(&"a".repeat(64), &"b".repeat(64), "", Default::default()).unwrap_err();
        assert_eq!(err, TrustError::MissingArgument { name: "reason" });
    }
}
