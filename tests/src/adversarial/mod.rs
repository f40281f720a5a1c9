//! # Adversarial Inputs
//!
//! Graphs and payloads a hostile or buggy peer could hand us. Every
//! traversal must terminate and every forgery must be caught.

pub mod cycles;
pub mod sybil;
