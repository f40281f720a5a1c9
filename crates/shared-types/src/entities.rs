//! # Core Domain Entities
//!
//! ## Clusters
//!
//! - **Identity**: `BlockHash`
//! - **Links**: `RefValue`, `Refs`
//! - **Records**: `Block`, `SignedBlock`

use crate::value::{State, Value};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Version tag stamped on every signed wrapper.
pub const PROTOCOL_VERSION: &str = "0.4.0";

/// Lowercase 64-character hex SHA-256 digest identifying a block.
pub type BlockHash = String;

// =============================================================================
// LINKS
// =============================================================================

/// The target of a named reference: one hash or a list of hashes.
///
/// List order and duplicates are kept as given. The canonical form sorts
/// lists, so order never influences the block hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RefValue {
    Single(BlockHash),
    Multiple(Vec<BlockHash>),
}

impl RefValue {
    /// Iterates over every hash this reference points at.
    pub fn hashes(&self) -> impl Iterator<Item = &str> {
        let slice: &[BlockHash] = match self {
            RefValue::Single(hash) => std::slice::from_ref(hash),
            RefValue::Multiple(hashes) => hashes,
        };
        slice.iter().map(String::as_str)
    }

    /// True if `hash` appears in this reference.
    pub fn contains(&self, hash: &str) -> bool {
        self.hashes().any(|h| h == hash)
    }

    /// The single hash, or the first element of a list.
    pub fn first(&self) -> Option<&str> {
        self.hashes().next()
    }

    /// The hash when this is a `Single` reference.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            RefValue::Single(hash) => Some(hash),
            RefValue::Multiple(_) => None,
        }
    }
}

impl From<&str> for RefValue {
    fn from(hash: &str) -> Self {
        RefValue::Single(hash.to_string())
    }
}

impl From<String> for RefValue {
    fn from(hash: String) -> Self {
        RefValue::Single(hash)
    }
}

impl From<Vec<String>> for RefValue {
    fn from(hashes: Vec<String>) -> Self {
        RefValue::Multiple(hashes)
    }
}

impl From<RefValue> for Value {
    fn from(value: RefValue) -> Self {
        match value {
            RefValue::Single(hash) => Value::String(hash),
            RefValue::Multiple(hashes) => {
                Value::Array(hashes.into_iter().map(Value::String).collect())
            }
        }
    }
}

/// Named, typed links from a block to other blocks (role to target).
pub type Refs = BTreeMap<String, RefValue>;

// =============================================================================
// RECORDS
// =============================================================================

/// An immutable, content-addressed fact.
///
/// `hash` is the SHA-256 of the canonical form of `(block_type, state, refs)`.
/// Construct blocks through the block factory; a block whose fields were
/// edited after construction no longer matches its hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Content identity.
    pub hash: BlockHash,
    /// Dotted type, e.g. `substance.product` or `transfer.order`.
    #[serde(rename = "type")]
    pub block_type: String,
    /// Domain payload.
    #[serde(default)]
    pub state: State,
    /// Links to other blocks.
    #[serde(default)]
    pub refs: Refs,
}

impl Block {
    /// The hash this block supersedes, if any.
    ///
    /// A list-valued `updates` ref yields its first element.
    pub fn updates(&self) -> Option<&str> {
        self.refs.get("updates").and_then(RefValue::first)
    }

    /// The `Single` target of `role`.
    pub fn single_ref(&self, role: &str) -> Option<&str> {
        self.refs.get(role).and_then(RefValue::as_single)
    }

    /// True if any role of this block points at `hash`.
    pub fn references(&self, hash: &str) -> bool {
        self.refs.values().any(|target| target.contains(hash))
    }

    /// Convenience accessor for a string-valued state field.
    pub fn state_str(&self, field: &str) -> Option<&str> {
        self.state.get(field).and_then(Value::as_str)
    }

    /// True when the type equals `prefix` or starts with `prefix.`.
    pub fn is_type(&self, prefix: &str) -> bool {
        self.block_type == prefix
            || self
                .block_type
                .strip_prefix(prefix)
                .is_some_and(|rest| rest.starts_with('.'))
    }
}

/// A block plus an author's Ed25519 signature over its canonical form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedBlock {
    /// The signed block.
    pub foodblock: Block,
    /// Hash of the actor block that signed.
    pub author_hash: BlockHash,
    /// Hex-encoded 64-byte Ed25519 signature.
    pub signature: String,
    /// Always [`PROTOCOL_VERSION`] when produced by this library.
    pub protocol_version: String,
}
