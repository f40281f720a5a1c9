//! # Outbound Ports (Driven Ports)
//!
//! Lookups the traversal algorithms need from whatever holds the blocks.
//!
//! Each call is one suspension point. Traversals issue them strictly one at
//! a time and propagate any `ResolverError` immediately, so a resolver that
//! honours cancellation or deadlines stops the whole walk.

use crate::domain::errors::ResolverError;
use async_trait::async_trait;
use shared_types::Block;
use std::sync::Arc;

/// Point lookup by hash.
#[async_trait]
pub trait BlockResolver: Send + Sync {
    /// The block with `hash`, or `None` if unknown.
    async fn resolve(&self, hash: &str) -> Result<Option<Block>, ResolverError>;
}

/// Reverse lookup: blocks whose refs mention a hash.
#[async_trait]
pub trait ForwardResolver: Send + Sync {
    /// Every block with `hash` in any ref role. Order is resolver-defined
    /// but must be stable for a given store state.
    async fn resolve_forward(&self, hash: &str) -> Result<Vec<Block>, ResolverError>;
}

#[async_trait]
impl<T: BlockResolver + ?Sized> BlockResolver for Arc<T> {
    async fn resolve(&self, hash: &str) -> Result<Option<Block>, ResolverError> {
        (**self).resolve(hash).await
    }
}

#[async_trait]
impl<T: ForwardResolver + ?Sized> ForwardResolver for Arc<T> {
    async fn resolve_forward(&self, hash: &str) -> Result<Vec<Block>, ResolverError> {
        (**self).resolve_forward(hash).await
    }
}
