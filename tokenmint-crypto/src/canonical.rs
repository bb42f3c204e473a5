//! Canonical JSON.
//!
//! Object keys are emitted in lexicographic byte order at every depth with
//! no insignificant whitespace, so two payloads that differ only in key
//! insertion order serialize identically whatever map backs `serde_json`.

use serde_json::Value;

use tokenmint_core::constants::TIMESTAMP_CLAIMS;
use tokenmint_core::types::Claims;

/// Serializes `value` into its canonical textual form.
pub fn canonical_json(value: &Value) -> String {
    let mut out = String::new();
    write_canonical(value, &mut out);
    out
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();

            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_string(key, out);
                out.push(':');
                write_canonical(&map[key.as_str()], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        // Scalars: serde_json's Display is compact and escapes strings
        scalar => out.push_str(&scalar.to_string()),
    }
}

fn write_string(s: &str, out: &mut String) {
    out.push_str(&Value::from(s).to_string());
}

/// Returns a copy of `payload` without the timestamp claims (`iat`, `exp`).
pub fn strip_timestamps(payload: &Claims) -> Claims {
    payload
        .iter()
        .filter(|(name, _)| !TIMESTAMP_CLAIMS.contains(&name.as_str()))
        .map(|(name, value)| (name.clone(), value.clone()))
        .collect()
}
