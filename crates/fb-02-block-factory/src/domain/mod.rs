//! Domain layer for block construction.

pub mod errors;
pub mod event_types;
pub mod factory;
pub mod schema;
pub mod tombstone;
