//! Domain layer for canonical encoding.
//!
//! Pure functions only: no I/O, no clocks, no randomness.

pub mod encoder;
pub mod errors;
pub mod number;
