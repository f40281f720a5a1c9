//! # Merkle Tree Construction

use super::errors::MerkleError;
use serde::{Deserialize, Serialize};
use shared_crypto::sha256_hex;
use serde_json::ser::Formatter;
use shared_types::{State, Value};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Largest magnitude at which every integer is exactly representable.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// A Merkle tree over the fields of one state map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MerkleTree {
    /// Hex root.
    pub root: String,
    /// Field name to leaf hash.
    pub leaves: BTreeMap<String, String>,
    /// Layers bottom-up: leaves first, root last.
    pub tree: Vec<Vec<String>>,
}

/// `sha256(left || right)` over the hex strings. Not commutative.
pub fn hash_pair(left: &str, right: &str) -> String {
    let mut combined = String::with_capacity(left.len() + right.len());
    combined.push_str(left);
    combined.push_str(right);
    sha256_hex(combined.as_bytes())
}

fn leaf_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => {
            serde_json::Value::from(*n as i64)
        }
        Value::Array(items) => serde_json::Value::Array(items.iter().map(leaf_json).collect()),
        Value::Object(map) => serde_json::Value::Object(
            map.iter().map(|(k, v)| (k.clone(), leaf_json(v))).collect(),
        ),
        other => other.to_json(),
    }
}

/// Compact JSON writer for leaf bytes.
///
/// Output is byte-identical to Python's `json.dumps(..., separators=(',', ':'))`
/// with the default `ensure_ascii`: anything outside printable ASCII is
/// written as `\uXXXX` (surrogate pairs above U+FFFF) and floats use
/// Python's `repr`.
struct LeafFormatter;

impl Formatter for LeafFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        let mut start = 0;
        for (index, ch) in fragment.char_indices() {
            if (' '..='~').contains(&ch) {
                continue;
            }
            writer.write_all(fragment[start..index].as_bytes())?;
            let mut units = [0u16; 2];
            for unit in ch.encode_utf16(&mut units) {
                write!(writer, "\\u{:04x}", unit)?;
            }
            start = index + ch.len_utf8();
        }
        writer.write_all(fragment[start..].as_bytes())
    }

    fn write_f64<W>(&mut self, writer: &mut W, value: f64) -> io::Result<()>
    where
        W: ?Sized + Write,
    {
        writer.write_all(python_float_repr(value).as_bytes())
    }
}

/// Python's `repr(float)` for a finite value.
///
/// Shortest round-trip digits; exponent form when the decimal point falls
/// before the fourth leading zero or past sixteen digits.
fn python_float_repr(value: f64) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value == 0.0 {
        return format!("{sign}0.0");
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let decimal_point = exponent + 1;

    if decimal_point <= -4 || decimal_point > 16 {
        let (head, tail) = digits.split_at(1);
        let fraction = if tail.is_empty() { String::new() } else { format!(".{tail}") };
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        return format!("{sign}{head}{fraction}e{exp_sign}{:02}", exponent.unsigned_abs());
    }

    let ndigits = digits.len() as i32;
    if decimal_point <= 0 {
        format!("{sign}0.{}{digits}", "0".repeat(decimal_point.unsigned_abs() as usize))
    } else if decimal_point >= ndigits {
        format!("{sign}{digits}{}.0", "0".repeat((decimal_point - ndigits) as usize))
    } else {
        let (int_part, frac_part) = digits.split_at(decimal_point as usize);
        format!("{sign}{int_part}.{frac_part}")
    }
}

/// Hash of the compact JSON encoding of `{field: value}`.
///
/// Integral numbers below 2^53 encode as integers, other numbers as Python
/// float reprs. Non-ASCII text is `\u`-escaped and object keys are sorted.
pub fn leaf_hash(field: &str, value: &Value) -> Result<String, MerkleError> {
    if !value.is_finite_deep() {
        return Err(MerkleError::NonFiniteNumber {
            field: field.to_string(),
        });
    }
    let mut single = serde_json::Map::new();
    single.insert(field.to_string(), leaf_json(value));

    let mut encoded = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut encoded, LeafFormatter);
    serde_json::Value::Object(single)
        .serialize(&mut serializer)
        .map_err(|e| MerkleError::LeafEncoding {
            field: field.to_string(),
            reason: e.to_string(),
        })?;
    Ok(sha256_hex(&encoded))
}

/// Builds the next layer up. An odd trailing node pairs with itself.
pub(crate) fn parent_layer(layer: &[String]) -> Vec<String> {
    layer
        .chunks(2)
        .map(|pair| {
            let left = &pair[0];
            let right = pair.get(1).unwrap_or(left);
            hash_pair(left, right)
        })
        .collect()
}

/// Builds the tree over `state`.
///
/// An empty state has the degenerate root `sha256("")` and no leaves.
///
/// # Errors
///
/// `NonFiniteNumber` when a field holds NaN or an infinity.
pub fn merkleize(state: &State) -> Result<MerkleTree, MerkleError> {
    if state.is_empty() {
        let empty = sha256_hex(b"");
        return Ok(MerkleTree {
            root: empty.clone(),
            leaves: BTreeMap::new(),
            tree: vec![vec![empty]],
        });
    }

    // BTreeMap iteration is already sorted by field name.
    let mut leaves = BTreeMap::new();
    let mut layer = Vec::with_capacity(state.len());
    for (field, value) in state {
        let hash = leaf_hash(field, value)?;
        leaves.insert(field.clone(), hash.clone());
        layer.push(hash);
    }

    let mut tree = vec![layer];
    while let Some(current) = tree.last().filter(|l| l.len() > 1) {
        let next = parent_layer(current);
        tree.push(next);
    }

    let root = tree
        .last()
        .and_then(|l| l.first())
        .cloned()
        .unwrap_or_else(|| sha256_hex(b""));

    Ok(MerkleTree { root, leaves, tree })
}
