//! Lenient accessors over raw JSON state maps.
//!
//! The client side treats server state as an untyped map: keys may be
//! missing, and a live game mod may send booleans where the mock server
//! sends 0/1 integers. Missing or non-numeric keys read as zero.

use serde_json::Value;

/// Numeric view of a state key. Booleans map to {0, 1}.
pub fn num(state: &Value, key: &str) -> f64 {
    match state.get(key) {
        Some(Value::Bool(b)) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => 0.0,
    }
}

/// Truthiness of an event flag. Accepts booleans and nonzero numbers.
pub fn flag(events: &Value, key: &str) -> bool {
    match events.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
        _ => false,
    }
}

/// Whether an event set carries any entries at all.
pub fn has_events(events: &Value) -> bool {
    events.as_object().is_some_and(|map| !map.is_empty())
}
