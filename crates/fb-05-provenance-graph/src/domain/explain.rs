//! # Provenance Narratives
//!
//! Renders a short human-readable story for a block, e.g.
//! `Sourdough ($4.5). By Green Acres Bakery. Made from Flour (Stone Mill).`

use super::errors::GraphResult;
use crate::ports::outbound::BlockResolver;
use fb_01_canonical::format_number;
use shared_types::{Block, RefValue, Value};
use std::collections::HashSet;
use tracing::debug;

/// Roles naming the actors behind a block.
const ACTOR_ROLES: [&str; 5] = ["seller", "buyer", "author", "operator", "producer"];

/// Roles naming what a block was made from.
const INPUT_ROLES: [&str; 4] = ["inputs", "source", "origin", "input"];

fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(*n).unwrap_or_else(|_| n.to_string()),
        other => other.to_json().to_string(),
    }
}

fn name_of(block: &Block) -> Option<&str> {
    block.state_str("name").filter(|n| !n.is_empty())
}

async fn named<R>(hash: &str, resolver: &R) -> GraphResult<Option<String>>
where
    R: BlockResolver + ?Sized,
{
    Ok(resolver
        .resolve(hash)
        .await?
        .as_ref()
        .and_then(name_of)
        .map(str::to_string))
}

/// Narrative for `hash`.
///
/// Always describes the block, its actors, its direct inputs with their
/// sellers or sources, and its certifications. The narrative never reaches
/// past that first hop, so `max_depth` never truncates it. An unknown hash
/// yields `Block not found: <hash>`.
pub async fn explain<R>(hash: &str, resolver: &R, max_depth: usize) -> GraphResult<String>
where
    R: BlockResolver + ?Sized,
{
    let Some(block) = resolver.resolve(hash).await? else {
        return Ok(format!("Block not found: {hash}"));
    };

    debug!(hash, max_depth, "explaining block");
    let mut parts = Vec::new();
    let mut visited = HashSet::from([block.hash.clone()]);

    let title = block
        .state
        .get("name")
        .or_else(|| block.state.get("title"))
        .filter(|v| v.is_truthy())
        .map(display)
        .unwrap_or_else(|| block.block_type.clone());
    let mut description = title;
    if let Some(price) = block.state.get("price") {
        description.push_str(&format!(" (${})", display(price)));
    }
    if let Some(rating) = block.state.get("rating") {
        description.push_str(&format!(" ({}/5)", display(rating)));
    }
    parts.push(format!("{description}."));

    for role in ACTOR_ROLES {
        let Some(actor_hash) = block.single_ref(role) else {
            continue;
        };
        if visited.contains(actor_hash) {
            continue;
        }
        if let Some(name) = named(actor_hash, resolver).await? {
            visited.insert(actor_hash.to_string());
            parts.push(format!("By {name}."));
        }
    }

    for role in INPUT_ROLES {
        let Some(target) = block.refs.get(role) else {
            continue;
        };
        let mut names = Vec::new();
        for input_hash in target.hashes() {
            let Some(input) = resolver.resolve(input_hash).await? else {
                continue;
            };
            let Some(name) = name_of(&input) else {
                continue;
            };
            let mut entry = name.to_string();
            let source = input
                .refs
                .get("seller")
                .or_else(|| input.refs.get("source"))
                .and_then(RefValue::first);
            if let Some(source) = source {
                if let Some(source_name) = named(source, resolver).await? {
                    entry.push_str(&format!(" ({source_name})"));
                }
            }
            names.push(entry);
        }
        if !names.is_empty() {
            parts.push(format!("Made from {}.", names.join(", ")));
        }
    }

    if let Some(certifications) = block.refs.get("certifications") {
        for cert_hash in certifications.hashes() {
            let Some(cert) = resolver.resolve(cert_hash).await? else {
                continue;
            };
            let Some(name) = name_of(&cert) else {
                continue;
            };
            let mut entry = format!("Certified: {name}");
            if let Some(until) = cert.state.get("valid_until").filter(|v| v.is_truthy()) {
                entry.push_str(&format!(" (expires {})", display(until)));
            }
            parts.push(format!("{entry}."));
        }
    }

    if block.state.get("tombstoned").is_some_and(Value::is_truthy) {
        parts.push("This block has been erased.".to_string());
    }

    Ok(parts.join(" "))
}
