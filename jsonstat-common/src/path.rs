//! Dotted field-path resolution over nested JSON.
//!
//! Paths look like `storageTotals.ram.total`. Every segment is used as a key
//! into a JSON object; arrays and scalars cannot be descended into. A path
//! that does not resolve is not an error: many declared paths are simply
//! absent from some payloads, so resolution returns `None` and the caller
//! moves on.

use serde_json::Value;

/// Separator between path segments.
pub const SEGMENT_SEPARATOR: char = '.';

/// Resolve `path` against `value`.
///
/// Returns `None` when any segment is missing, when an intermediate value is
/// not an object, or when the path (or one of its segments) is empty.
pub fn resolve<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }

    path.split(SEGMENT_SEPARATOR).try_fold(value, |current, segment| {
        if segment.is_empty() {
            return None;
        }
        current.as_object()?.get(segment)
    })
}

/// Check whether `path` is well formed (non-empty segments only).
pub fn is_valid_path(path: &str) -> bool {
    !path.is_empty() && path.split(SEGMENT_SEPARATOR).all(|s| !s.is_empty())
}
