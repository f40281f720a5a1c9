//! # Shared Types Crate
//!
//! The FoodBlock data model shared across subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Block`, `Value`, `RefValue` and the signed
//!   wrapper are defined once, here.
//! - **JSON-shaped values**: `Value` is a closed recursive enum that maps 1:1
//!   onto JSON, so blocks round-trip through any JSON transport.
//! - **Null means absent**: the block factory strips nulls before hashing, so
//!   `Null` never survives into a constructed block.

pub mod entities;
pub mod errors;
pub mod uri;
pub mod value;

pub use entities::*;
pub use errors::*;
pub use uri::{from_uri, to_alias_uri, to_uri, FoodBlockUri, URI_PREFIX};
pub use value::{json_object, State, Value};
