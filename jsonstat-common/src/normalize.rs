//! Conversion of resolved JSON values into a single numeric observation.

use serde_json::Value;

/// Normalize a resolved value into an `f64`.
///
/// - booleans become `0.0` / `1.0`
/// - numbers pass through
/// - an array of numbers becomes its arithmetic mean (empty arrays and
///   arrays holding anything other than numbers yield `None`)
/// - strings, objects, `null` and unresolved paths yield `None`
pub fn normalize(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::Array(items) => mean(items),
        Value::String(_) | Value::Object(_) | Value::Null => None,
    }
}

fn mean(items: &[Value]) -> Option<f64> {
    if items.is_empty() {
        return None;
    }

    let mut sum = 0.0;
    for item in items {
        sum += item.as_f64()?;
    }

    Some(sum / items.len() as f64)
}
