//! # Error Types
//!
//! Errors for the shared data model. Subsystem crates define their own.

use thiserror::Error;

/// Errors parsing `fb:` URIs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UriError {
    /// The string does not start with `fb:`.
    #[error("Invalid URI, must start with \"fb:\": {0}")]
    MissingPrefix(String),
}
