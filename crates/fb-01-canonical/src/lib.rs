//! # Canonical Codec Subsystem
//!
//! Deterministic encoding of `(type, state, refs)` into the byte string
//! that is hashed and signed. Two semantically equal blocks always encode
//! to the same bytes, regardless of key insertion order or Unicode
//! composition form.
//!
//! ## Encoding Rules
//!
//! | Rule | Behaviour |
//! |------|-----------|
//! | Keys | NFC-normalized, sorted by code point at every level |
//! | Whitespace | none |
//! | Numbers | ECMAScript `Number.prototype.toString`; `-0` is `0`; NaN/Infinity rejected |
//! | Strings | NFC-normalized, escaped as `JSON.stringify` does |
//! | Nulls | omitted from objects and arrays |
//! | Arrays under `refs` | sorted when every element is a string |
//! | Arrays elsewhere | declared order |
//!
//! The "under `refs`" context is entered by the top-level refs map and by any
//! object key literally named `refs` at any depth, including inside state.
//! Every SDK shares this behaviour, so it is part of the hash contract.
//!
//! ## Usage
//!
//! ```
//! use fb_01_canonical::canonical;
//! use shared_types::{json_object, Refs};
//!
//! let state = json_object(serde_json::json!({"price": 4.5, "name": "Sourdough"}));
//! let text = canonical("substance.product", &state, &Refs::new()).unwrap();
//! assert_eq!(
//!     text,
//!     r#"{"refs":{},"state":{"name":"Sourdough","price":4.5},"type":"substance.product"}"#
//! );
//! ```

pub mod domain;

pub use domain::encoder::{canonical, canonical_value, MAX_NESTING_DEPTH};
pub use domain::errors::CanonicalError;
pub use domain::number::format_number;
