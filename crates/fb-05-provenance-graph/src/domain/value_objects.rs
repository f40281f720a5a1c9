//! # Value Objects
//!
//! Traversal configuration, filters and merge policy inputs.

use super::errors::GraphError;
use serde::{Deserialize, Serialize};
use shared_types::{Block, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Hop and step bounds for each traversal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalConfig {
    pub chain_max_depth: usize,
    pub tree_max_depth: usize,
    pub recall_max_depth: usize,
    /// Forward steps `head` takes before giving up.
    pub head_max_steps: usize,
    pub explain_max_depth: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            chain_max_depth: 100,
            tree_max_depth: 20,
            recall_max_depth: 50,
            head_max_steps: 1000,
            explain_max_depth: 10,
        }
    }
}

/// Optional restrictions applied by `recall`. Empty lists mean no filter.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RecallFilter {
    /// Type prefixes a block must start with to be reported.
    pub types: Vec<String>,
    /// Roles that count as a link back to the parent.
    pub roles: Vec<String>,
}

impl RecallFilter {
    pub fn types<I, S>(types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            types: types.into_iter().map(Into::into).collect(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles = roles.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn accepts_role(&self, role: &str) -> bool {
        self.roles.is_empty() || self.roles.iter().any(|r| r == role)
    }

    pub(crate) fn accepts_type(&self, block_type: &str) -> bool {
        self.types.is_empty() || self.types.iter().any(|t| block_type.starts_with(t.as_str()))
    }
}

/// How `merge` derives state when none is given.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// Copy the state of the first head.
    AWins,
    /// Copy the state of the second head.
    BWins,
    /// Union of both states, first head winning on shared keys.
    #[default]
    Manual,
}

impl MergeStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MergeStrategy::AWins => "a_wins",
            MergeStrategy::BWins => "b_wins",
            MergeStrategy::Manual => "manual",
        }
    }
}

impl fmt::Display for MergeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeStrategy {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "a_wins" => Ok(MergeStrategy::AWins),
            "b_wins" => Ok(MergeStrategy::BWins),
            "manual" => Ok(MergeStrategy::Manual),
            other => Err(GraphError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Per-field merge policy taken from a vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDefinition {
    #[serde(default)]
    pub required: bool,
}

/// Field definitions that steer `auto_merge`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Vocabulary {
    pub fields: BTreeMap<String, FieldDefinition>,
}

impl Vocabulary {
    /// Reads `state.fields` of an `observe.vocabulary` block.
    ///
    /// Field entries that are not objects are treated as optional.
    pub fn from_block(block: &Block) -> Self {
        let fields = block
            .state
            .get("fields")
            .and_then(Value::as_object)
            .map(|defs| {
                defs.iter()
                    .map(|(name, def)| {
                        let required = def
                            .as_object()
                            .and_then(|d| d.get("required"))
                            .is_some_and(Value::is_truthy);
                        (name.clone(), FieldDefinition { required })
                    })
                    .collect()
            })
            .unwrap_or_default();
        Self { fields }
    }

    pub fn field(mut self, name: &str, required: bool) -> Self {
        self.fields.insert(name.to_string(), FieldDefinition { required });
        self
    }
}
