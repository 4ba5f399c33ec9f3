//! Canonical JSON Serialization
//!
//! Deterministic JSON serialization so content-addressed identifiers hash
//! identically everywhere they are computed, including off-process by
//! clients predicting a proposal id before submitting it.
//!
//! # Canonical Format
//!
//! 1. **Key Ordering**: Object keys sorted lexicographically (UTF-8 byte order)
//! 2. **No Whitespace**: Compact representation, no spaces or newlines
//! 3. **No Null Values**: Fields with null values are omitted

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CanonicalJsonError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CanonicalJsonError>;

/// Serialize value to canonical JSON string
///
/// Keys are sorted lexicographically, no whitespace, null fields omitted
pub fn to_canonical_json<T: Serialize>(value: &T) -> Result<String> {
    let json_value = serde_json::to_value(value)?;
    let canonical = canonicalize_value(json_value);
    Ok(serde_json::to_string(&canonical)?)
}

/// Compute deterministic hash of canonical JSON representation
///
/// Uses Blake3 for fast, cryptographically secure hashing
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<[u8; 32]> {
    let canonical_json = to_canonical_json(value)?;
    let hash = blake3::hash(canonical_json.as_bytes());
    Ok(*hash.as_bytes())
}

fn canonicalize_value(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut sorted: BTreeMap<String, Value> = BTreeMap::new();
            for (k, v) in map {
                // Null values are not part of the canonical form
                if !v.is_null() {
                    sorted.insert(k, canonicalize_value(v));
                }
            }

            let mut canonical_map = Map::new();
            for (k, v) in sorted {
                canonical_map.insert(k, v);
            }

            Value::Object(canonical_map)
        }
        Value::Array(arr) => Value::Array(arr.into_iter().map(canonicalize_value).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Sample {
        zebra: u64,
        alpha: String,
        empty: Option<u32>,
    }

    #[test]
    fn test_keys_sorted_nulls_omitted() {
        let sample = Sample {
            zebra: 7,
            alpha: "a".to_string(),
            empty: None,
        };
        let json = to_canonical_json(&sample).unwrap();
        assert_eq!(json, r#"{"alpha":"a","zebra":7}"#);
    }

    #[test]
    fn test_hash_is_deterministic() {
        let a = Sample {
            zebra: 1,
            alpha: "x".to_string(),
            empty: None,
        };
        let b = Sample {
            zebra: 1,
            alpha: "x".to_string(),
            empty: None,
        };
        assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }

    #[test]
    fn test_hash_changes_with_content() {
        let a = Sample {
            zebra: 1,
            alpha: "x".to_string(),
            empty: None,
        };
        let b = Sample {
            zebra: 2,
            alpha: "x".to_string(),
            empty: None,
        };
        assert_ne!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
    }
}
