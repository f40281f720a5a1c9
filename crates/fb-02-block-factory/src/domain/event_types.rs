//! Event-type policy.
//!
//! Events are things that happened (an order, a bake, a review) and need a
//! per-occurrence identifier; two identical orders must not collide on hash.
//! Definitional registry types share the `observe.` prefix but are not events.

/// State field carrying the per-event identifier.
pub const INSTANCE_ID: &str = "instance_id";

/// Type prefixes that mark a block as an event.
pub const EVENT_PREFIXES: [&str; 3] = ["transfer.", "transform.", "observe."];

/// Registry types excluded from event treatment.
pub const DEFINITIONAL_TYPES: [&str; 5] = [
    "observe.vocabulary",
    "observe.template",
    "observe.schema",
    "observe.trust_policy",
    "observe.protocol",
];

/// True if blocks of `block_type` get an `instance_id` injected.
pub fn is_event_type(block_type: &str) -> bool {
    if DEFINITIONAL_TYPES.contains(&block_type) {
        return false;
    }
    EVENT_PREFIXES
        .iter()
        .any(|prefix| block_type.starts_with(prefix))
}
