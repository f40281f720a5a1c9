//! # `fb:` URIs
//!
//! Two forms: `fb:<hash>` for a content address and `fb:<type>/<alias>` for a
//! human-readable name scoped to a block type.

use crate::errors::UriError;

/// Scheme prefix for FoodBlock URIs.
pub const URI_PREFIX: &str = "fb:";

/// A parsed FoodBlock URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodBlockUri {
    /// `fb:<hash>`
    Hash(String),
    /// `fb:<type>/<alias>`
    Alias { block_type: String, alias: String },
}

/// `fb:<hash>`
pub fn to_uri(hash: &str) -> String {
    format!("{URI_PREFIX}{hash}")
}

/// `fb:<type>/<alias>`
pub fn to_alias_uri(block_type: &str, alias: &str) -> String {
    format!("{URI_PREFIX}{block_type}/{alias}")
}

/// Parses a URI.
///
/// The body is an alias form only when it contains a `.` before its first
/// `/` (types are dotted, hashes are not). Everything else is a hash.
pub fn from_uri(uri: &str) -> Result<FoodBlockUri, UriError> {
    let body = uri
        .strip_prefix(URI_PREFIX)
        .ok_or_else(|| UriError::MissingPrefix(uri.to_string()))?;

    if let (Some(slash), Some(dot)) = (body.find('/'), body.find('.')) {
        if dot < slash {
            return Ok(FoodBlockUri::Alias {
                block_type: body[..slash].to_string(),
                alias: body[slash + 1..].to_string(),
            });
        }
    }

    Ok(FoodBlockUri::Hash(body.to_string()))
}
