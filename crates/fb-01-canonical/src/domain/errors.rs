//! Error types for canonical encoding.

use thiserror::Error;

/// Reasons a value has no canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CanonicalError {
    /// NaN or an infinity reached the encoder.
    #[error("Infinity and NaN are not allowed")]
    NonFiniteNumber,

    /// Objects or arrays nested beyond the supported depth.
    #[error("Nesting exceeds maximum depth of {max}")]
    NestingTooDeep { max: usize },

    /// String escaping failed.
    #[error("String encoding failed: {0}")]
    Encoding(String),
}
