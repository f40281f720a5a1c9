//! Domain layer for signing and agent identities.

pub mod agent;
pub mod errors;
pub mod signing;
