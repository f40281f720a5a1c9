//! # Canonical Encoder
//!
//! Writes values into a single output buffer. Objects skip null members,
//! arrays skip null elements, and the refs context is threaded down so that
//! string arrays beneath a `refs` key are emitted in sorted order.

use super::errors::CanonicalError;
use super::number::format_number;
use shared_types::{RefValue, Refs, State, Value};
use std::collections::BTreeMap;
use unicode_normalization::UnicodeNormalization;

/// Maximum nesting of objects and arrays below the top-level block object.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Key that switches its subtree into refs context.
const REFS_KEY: &str = "refs";

/// Canonical text of a block's content triple.
///
/// This is the exact UTF-8 string that is hashed (and signed).
///
/// # Errors
///
/// Fails on NaN/Infinity anywhere in `state` or on nesting deeper than
/// [`MAX_NESTING_DEPTH`].
pub fn canonical(block_type: &str, state: &State, refs: &Refs) -> Result<String, CanonicalError> {
    let mut out = String::with_capacity(128);
    // Keys of the wrapper object in sorted order: refs, state, type.
    out.push_str("{\"refs\":");
    write_refs(refs, &mut out)?;
    out.push_str(",\"state\":");
    write_object(state, false, 1, &mut out)?;
    out.push_str(",\"type\":");
    write_string(block_type, &mut out)?;
    out.push('}');
    Ok(out)
}

/// Canonical text of an arbitrary value. `None` for `Null`, which has no
/// encoding of its own.
pub fn canonical_value(value: &Value, in_refs: bool) -> Result<Option<String>, CanonicalError> {
    let mut out = String::new();
    if write_value(value, in_refs, 0, &mut out)? {
        Ok(Some(out))
    } else {
        Ok(None)
    }
}

fn nfc(text: &str) -> String {
    text.nfc().collect()
}

fn check_depth(depth: usize) -> Result<(), CanonicalError> {
    if depth > MAX_NESTING_DEPTH {
        return Err(CanonicalError::NestingTooDeep {
            max: MAX_NESTING_DEPTH,
        });
    }
    Ok(())
}

/// Returns `false` when nothing was written (the value was null).
fn write_value(
    value: &Value,
    in_refs: bool,
    depth: usize,
    out: &mut String,
) -> Result<bool, CanonicalError> {
    match value {
        Value::Null => return Ok(false),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)?),
        Value::String(s) => write_string(s, out)?,
        Value::Array(items) => write_array(items, in_refs, depth + 1, out)?,
        Value::Object(map) => write_object(map, in_refs, depth + 1, out)?,
    }
    Ok(true)
}

fn write_string(text: &str, out: &mut String) -> Result<(), CanonicalError> {
    write_normalized(&nfc(text), out)
}

fn write_normalized(text: &str, out: &mut String) -> Result<(), CanonicalError> {
    let escaped =
        serde_json::to_string(text).map_err(|e| CanonicalError::Encoding(e.to_string()))?;
    out.push_str(&escaped);
    Ok(())
}

fn write_array(
    items: &[Value],
    in_refs: bool,
    depth: usize,
    out: &mut String,
) -> Result<(), CanonicalError> {
    check_depth(depth)?;

    let all_strings = items.iter().all(|v| matches!(v, Value::String(_)));
    out.push('[');
    if in_refs && all_strings {
        let mut sorted: Vec<String> = items
            .iter()
            .filter_map(Value::as_str)
            .map(nfc)
            .collect();
        sorted.sort();
        for (i, item) in sorted.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_normalized(item, out)?;
        }
    } else {
        let mut first = true;
        for item in items.iter().filter(|v| !v.is_null()) {
            if !first {
                out.push(',');
            }
            first = false;
            write_value(item, in_refs, depth, out)?;
        }
    }
    out.push(']');
    Ok(())
}

fn write_object(
    map: &BTreeMap<String, Value>,
    in_refs: bool,
    depth: usize,
    out: &mut String,
) -> Result<(), CanonicalError> {
    check_depth(depth)?;

    // BTreeMap order is raw-key order; NFC can reorder, so sort again.
    let mut entries: Vec<(String, &Value)> = map
        .iter()
        .filter(|(_, v)| !v.is_null())
        .map(|(k, v)| (nfc(k), v))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    out.push('{');
    for (i, (key, value)) in entries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_normalized(key, out)?;
        out.push(':');
        write_value(value, in_refs || key == REFS_KEY, depth, out)?;
    }
    out.push('}');
    Ok(())
}

fn write_refs(refs: &Refs, out: &mut String) -> Result<(), CanonicalError> {
    let mut entries: Vec<(String, &RefValue)> = refs.iter().map(|(k, v)| (nfc(k), v)).collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    out.push('{');
    for (i, (role, target)) in entries.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        write_normalized(role, out)?;
        out.push(':');
        match target {
            RefValue::Single(hash) => write_string(hash, out)?,
            RefValue::Multiple(hashes) => {
                let mut sorted: Vec<String> = hashes.iter().map(|h| nfc(h)).collect();
                sorted.sort();
                out.push('[');
                for (j, hash) in sorted.iter().enumerate() {
                    if j > 0 {
                        out.push(',');
                    }
                    write_normalized(hash, out)?;
                }
                out.push(']');
            }
        }
    }
    out.push('}');
    Ok(())
}
