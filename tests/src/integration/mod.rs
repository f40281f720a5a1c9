//! # Integration Scenarios
//!
//! Each module drives several subsystems through one realistic flow.

pub mod disclosure;
pub mod lifecycle;
pub mod supply_chain;
pub mod trust;
