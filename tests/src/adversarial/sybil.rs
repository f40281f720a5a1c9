//! # Review Rings
//!
//! A seller props up its score with reviews from accounts it is tightly
//! connected to. Peer reviews are discounted by how much the reviewer's
//! network overlaps the seller's, so the ring counts for less than
//! independent reviewers would.

#[cfg(test)]
mod tests {
    use crate::fixtures::block;
    use chrono::{TimeZone, Utc};
    use fb_06_trust::{compute_trust_at, connection_density, TrustBlock};
    use serde_json::json;
    use shared_types::Block;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Ring {
        seller: Block,
        honest: Block,
        puppets: Vec<Block>,
        blocks: Vec<TrustBlock>,
    }

    fn review(subject: &Block, author: &Block, rating: u8) -> TrustBlock {
        TrustBlock::from(block(
            "observe.review",
            json!({"rating": rating}),
            json!({"subject": subject.hash, "author": author.hash}),
        ))
        .authored_by(&author.hash)
    }

    /// Four puppets rate the seller 5, one honest buyer rates it 1. With
    /// `colluding`, the seller and puppets also appear together in one
    /// group block.
    fn ring(colluding: bool) -> Ring {
        let seller = block("actor.producer", json!({"name": "Too Good Farm"}), json!({}));
        let honest = block("actor.venue", json!({"name": "Village Shop"}), json!({}));
        let puppets: Vec<Block> = (0..4)
            .map(|i| block("actor.venue", json!({"name": format!("Fan {i}")}), json!({})))
            .collect();

        let mut blocks: Vec<TrustBlock> = puppets.iter().map(|p| review(&seller, p, 5)).collect();
        blocks.push(review(&seller, &honest, 1));

        if colluding {
            let mut members: Vec<&str> = puppets.iter().map(|p| p.hash.as_str()).collect();
            members.push(&seller.hash);
            blocks.push(TrustBlock::from(block(
                "observe.event",
                json!({"name": "Members meetup"}),
                json!({"members": members}),
            )));
        }

        Ring {
            seller,
            honest,
            puppets,
            blocks,
        }
    }

    fn weighted_reviews(ring: &Ring) -> f64 {
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        compute_trust_at(&ring.seller.hash, &ring.blocks, None, now)
            .unwrap()
            .inputs
            .peer_reviews
            .weighted_score
    }

    // =============================================================================
    // DENSITY DISCOUNT
    // =============================================================================

    #[test]
    fn test_ring_members_are_densely_connected() {
        let r = ring(true);
        // Puppet sees {seller, 3 puppets}; seller sees {4 puppets, honest}.
        assert_eq!(connection_density(&r.puppets[0].hash, &r.seller.hash, &r.blocks), 0.5);
        assert_eq!(connection_density(&r.honest.hash, &r.seller.hash, &r.blocks), 0.0);
    }

    #[test]
    fn test_independent_reviews_count_in_full() {
        let r = ring(false);
        for puppet in &r.puppets {
            assert_eq!(connection_density(&puppet.hash, &r.seller.hash, &r.blocks), 0.0);
        }
        assert!((weighted_reviews(&r) - 4.2).abs() < 1e-9);
    }

    #[test]
    fn test_collusion_lowers_review_weight() {
        let independent = weighted_reviews(&ring(false));
        let colluding = weighted_reviews(&ring(true));
        // (0.2 * 1 + 4 * 1.0 * 0.5) / (1 + 4 * 0.5) * 5
        assert!((colluding - 11.0 / 3.0).abs() < 1e-9);
        assert!(colluding < independent);
    }

    #[test]
    fn test_average_rating_is_not_discounted() {
        let r = ring(true);
        let now = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let report = compute_trust_at(&r.seller.hash, &r.blocks, None, now).unwrap();
        assert_eq!(report.inputs.peer_reviews.count, 5);
        assert_eq!(report.inputs.peer_reviews.avg_score, 21.0 / 5.0);
    }

    #[test]
    fn test_unknown_actor_has_no_density() {
        let r = ring(true);
        assert_eq!(connection_density("", &r.seller.hash, &r.blocks), 0.0);
        assert_eq!(connection_density(&"9".repeat(64), &r.seller.hash, &r.blocks), 0.0);
    }
}
