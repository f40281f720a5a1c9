//! # Alias Registry
//!
//! Maps human-readable names to block hashes so refs can be written as
//! `@farm` instead of a 64-character digest. Raw hashes pass through.

use crate::domain::errors::{BlockError, BlockResult};
use crate::domain::factory::{create_with_refs, update_with_refs};
use shared_types::{Block, BlockHash, RefValue, Refs, State};
use std::collections::HashMap;
use tracing::debug;

const ALIAS_SIGIL: char = '@';

/// In-memory alias table.
#[derive(Debug, Clone, Default)]
pub struct AliasRegistry {
    aliases: HashMap<String, BlockHash>,
}

impl AliasRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) `alias`.
    pub fn set(&mut self, alias: &str, hash: &str) -> &mut Self {
        self.aliases.insert(alias.to_string(), hash.to_string());
        self
    }

    /// `@name` to its hash; anything else is returned unchanged.
    ///
    /// # Errors
    ///
    /// `UnresolvedAlias` when `@name` is not registered.
    pub fn resolve(&self, alias_or_hash: &str) -> BlockResult<String> {
        match alias_or_hash.strip_prefix(ALIAS_SIGIL) {
            Some(name) => self
                .aliases
                .get(name)
                .cloned()
                .ok_or_else(|| BlockError::UnresolvedAlias(name.to_string())),
            None => Ok(alias_or_hash.to_string()),
        }
    }

    /// Resolves every alias in `refs`, including inside lists.
    pub fn resolve_refs(&self, refs: &Refs) -> BlockResult<Refs> {
        refs.iter()
            .map(|(role, target)| {
                let resolved = match target {
                    RefValue::Single(h) => RefValue::Single(self.resolve(h)?),
                    RefValue::Multiple(hs) => RefValue::Multiple(
                        hs.iter()
                            .map(|h| self.resolve(h))
                            .collect::<BlockResult<Vec<_>>>()?,
                    ),
                };
                Ok((role.clone(), resolved))
            })
            .collect()
    }

    /// Creates a block with aliases in `refs` resolved, optionally
    /// registering the new block under `alias`.
    pub fn create(
        &mut self,
        block_type: &str,
        state: State,
        refs: &Refs,
        alias: Option<&str>,
    ) -> BlockResult<Block> {
        let block = create_with_refs(block_type, state, self.resolve_refs(refs)?)?;
        self.register(alias, &block);
        Ok(block)
    }

    /// Like [`AliasRegistry::create`] for an update; `previous` may be an alias.
    pub fn update(
        &mut self,
        previous: &str,
        block_type: &str,
        state: State,
        refs: &Refs,
        alias: Option<&str>,
    ) -> BlockResult<Block> {
        let previous_hash = self.resolve(previous)?;
        let block = update_with_refs(&previous_hash, block_type, state, self.resolve_refs(refs)?)?;
        self.register(alias, &block);
        Ok(block)
    }

    fn register(&mut self, alias: Option<&str>, block: &Block) {
        if let Some(alias) = alias {
            debug!(alias, hash = %block.hash, "alias registered");
            self.aliases.insert(alias.to_string(), block.hash.clone());
        }
    }

    pub fn has(&self, alias: &str) -> bool {
        self.aliases.contains_key(alias)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Snapshot of the table.
    pub fn aliases(&self) -> HashMap<String, BlockHash> {
        self.aliases.clone()
    }
}
