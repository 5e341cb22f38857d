//! Canonical serialization and content hashing.
//!
//! Content hashes are computed as:
//!
//! ```text
//! content_hash = hex(BLAKE3(JCS(value)))
//! ```
//!
//! where JCS is the JSON Canonicalization Scheme (RFC 8785): object keys are
//! sorted, no whitespace is emitted, and integers are printed without
//! exponent or trailing zeros. The result does not depend on map insertion
//! order, process, host or wall-clock time.

use serde::Serialize;

use crate::error::SpecError;

/// Computes the canonical BLAKE3 hash of any serializable value.
///
/// # Example
/// ```
/// use rackgen_spec::hash::canonical_hash;
///
/// let a = serde_json::json!({"b": 1, "a": [true, null]});
/// let b = serde_json::json!({"a": [true, null], "b": 1});
/// assert_eq!(canonical_hash(&a).unwrap(), canonical_hash(&b).unwrap());
/// assert_eq!(canonical_hash(&a).unwrap().len(), 64);
/// ```
pub fn canonical_hash<T: Serialize>(value: &T) -> Result<String, SpecError> {
    let value = serde_json::to_value(value)?;
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &serde_json::Value) -> Result<String, SpecError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3_hash(canonical.as_bytes()))
}

/// Canonicalizes a JSON value into its RFC 8785 string form.
pub fn canonicalize_json(value: &serde_json::Value) -> Result<String, SpecError> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &serde_json::Value, out: &mut String) -> Result<(), SpecError> {
    match value {
        serde_json::Value::Null => out.push_str("null"),
        serde_json::Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        serde_json::Value::Number(n) => out.push_str(&format_jcs_number(n)?),
        serde_json::Value::String(s) => write_jcs_string(s, out),
        serde_json::Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        serde_json::Value::Object(obj) => {
            let mut entries: Vec<(&String, &serde_json::Value)> = obj.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in entries.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

/// Formats a number according to JCS rules.
///
/// Every hashed input in this crate is integral; non-finite floats cannot be
/// represented and are rejected.
fn format_jcs_number(n: &serde_json::Number) -> Result<String, SpecError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => {
            if f == 0.0 {
                return Ok("0".to_string());
            }
            if f.fract() == 0.0 && f.abs() < 1e15 {
                return Ok(format!("{}", f as i64));
            }
            let s = format!("{}", f);
            if s.contains('.') && !s.contains('e') && !s.contains('E') {
                return Ok(s.trim_end_matches('0').trim_end_matches('.').to_string());
            }
            Ok(s)
        }
        _ => Err(SpecError::Canonicalization(format!(
            "number {} has no canonical form",
            n
        ))),
    }
}

/// Writes a string with JCS minimal escaping.
fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Computes a BLAKE3 hash of arbitrary data as 64 lowercase hex characters.
pub fn blake3_hash(data: &[u8]) -> String {
    blake3::hash(data).to_hex().to_string()
}
