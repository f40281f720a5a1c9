//! Shared test corpus.
//!
//! A small bakery supply chain: a farm grows wheat, a mill turns it into
//! flour, a bakery bakes sourdough from the flour and sells it.

use fb_02_block_factory::{create, RawRefs};
use fb_telemetry::{init_logging, TelemetryConfig};
use serde_json::json;
use shared_types::{json_object, Block, State};
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Installs a quiet console subscriber once per test binary.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let config = TelemetryConfig {
            log_level: "warn".to_string(),
            console_output: true,
            json_logs: false,
            ..TelemetryConfig::default()
        };
        // Another harness may already own the global subscriber.
        let _ = init_logging(&config);
    });
}

/// State from a JSON object literal.
pub fn state(json: serde_json::Value) -> State {
    json_object(json)
}

/// Raw refs from a JSON object literal.
pub fn refs(json: serde_json::Value) -> RawRefs {
    json_object(json)
}

/// Creates a block, panicking on invalid input.
pub fn block(block_type: &str, state_json: serde_json::Value, refs_json: serde_json::Value) -> Block {
    create(block_type, state(state_json), refs(refs_json)).expect("fixture block")
}

/// The bakery supply chain.
#[derive(Debug, Clone)]
pub struct Bakery {
    pub farm: Block,
    pub mill: Block,
    pub bakery: Block,
    pub wheat: Block,
    pub flour: Block,
    pub bread: Block,
    pub order: Block,
}

impl Bakery {
    pub fn build() -> Self {
        let farm = block("actor.producer", json!({"name": "Green Acres Farm"}), json!({}));
        let mill = block("actor.producer", json!({"name": "Stone Mill"}), json!({}));
        let bakery = block("actor.venue", json!({"name": "Green Acres Bakery"}), json!({}));
        let wheat = block(
            "substance.ingredient",
            json!({"name": "Wheat"}),
            json!({"seller": farm.hash}),
        );
        let flour = block(
            "substance.ingredient",
            json!({"name": "Flour"}),
            json!({"seller": mill.hash, "source": wheat.hash}),
        );
        let bread = block(
            "substance.product",
            json!({"name": "Sourdough", "price": 4.5}),
            json!({"seller": bakery.hash, "inputs": [flour.hash]}),
        );
        let order = block(
            "transfer.order",
            json!({"quantity": 2}),
            json!({"seller": bakery.hash, "item": bread.hash}),
        );
        Self {
            farm,
            mill,
            bakery,
            wheat,
            flour,
            bread,
            order,
        }
    }

    /// Every block, in insertion order.
    pub fn blocks(&self) -> Vec<Block> {
        vec![
            self.farm.clone(),
            self.mill.clone(),
            self.bakery.clone(),
            self.wheat.clone(),
            self.flour.clone(),
            self.bread.clone(),
            self.order.clone(),
        ]
    }
}
