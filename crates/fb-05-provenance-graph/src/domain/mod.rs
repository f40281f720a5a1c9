//! Domain layer: traversal algorithms and their result types.

pub mod chain;
pub mod entities;
pub mod errors;
pub mod explain;
pub mod forward;
pub mod merge;
pub mod value_objects;
