//! Structural equality and key-sorted ordering (spec §4.7).
//!
//! Spec §9's Open Questions flag that the source uses two different number
//! equalities (an epsilon-based comparator for general structural equality,
//! and an additional integer-projection check in the patch engine's `test`
//! operator) and calls for reconciling them. This crate reconciles them by
//! using exactly one definition everywhere: epsilon-based float comparison
//! *and* equal integer projections, both required. See `DESIGN.md`.

use crate::value::{Object, Value};

/// Structural equality, used by [`crate::apply_patch`]'s `test` operation and
/// available standalone.
///
/// - Scalars of the same kind compare by value; numbers additionally require
///   equal saturated `i64` projections (reconciling spec §9's open question,
///   see the module docs).
/// - Arrays require equal length and pairwise-equal elements in order.
/// - Objects compare members in their stored order (same key at the same
///   position); see [`equal_unordered`] for the sorted-then-merge comparison
///   spec §4.5 uses during diff generation.
#[must_use]
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => {
            let eps = f64::EPSILON * x.value().abs().max(y.value().abs()).max(1.0);
            (x.value() - y.value()).abs() <= eps && x.int_projection() == y.int_projection()
        }
        (Value::String(x), Value::Raw(y)) | (Value::Raw(x), Value::String(y)) => x == y,
        (Value::String(x), Value::String(y)) | (Value::Raw(x), Value::Raw(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| equal(p, q))
        }
        (Value::Object(x), Value::Object(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|((ka, va), (kb, vb))| ka == kb && equal(va, vb))
        }
        _ => false,
    }
}

/// Object equality that ignores member order, used by the diff generator
/// (spec §4.5: "Objects: sort both sides by key, then merge-walk").
#[must_use]
pub fn equal_unordered(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Object(x), Value::Object(y)) => {
            if x.len() != y.len() {
                return false;
            }
            sorted_keys(x).zip(sorted_keys(y)).all(|(ka, kb)| {
                ka == kb && equal_unordered(x.get(ka).unwrap(), y.get(kb).unwrap())
            })
        }
        (Value::Array(x), Value::Array(y)) => {
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(p, q)| equal_unordered(p, q))
        }
        _ => equal(a, b),
    }
}

fn sorted_keys(obj: &Object) -> impl Iterator<Item = &str> {
    let mut keys: Vec<&str> = obj.keys().map(String::as_str).collect();
    keys.sort_unstable();
    keys.into_iter()
}

/// Returns `obj`'s keys sorted ASCII-case-sensitively (used by the diff
/// generator's merge-walk).
pub(crate) fn sorted_entries(obj: &Object) -> Vec<(&str, &Value)> {
    let mut entries: Vec<(&str, &Value)> = obj.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    entries
}

/// A stable, ASCII-case-insensitive-or-sensitive sort over an array of JSON
/// strings (spec §4.7: "The sorter is a stable top-down merge sort over the
/// doubly linked child list"). `Vec::sort_by` is already a stable merge
/// sort, so this wraps it with the requested comparator rather than
/// hand-rolling list splicing.
///
/// Non-string elements sort before all strings and among themselves retain
/// their relative order (stability), since they have no key to compare by.
///
/// # Panics
///
/// Panics if `value` is not `Value::Array`.
pub fn sort_array_of_strings(value: &mut Value, case_insensitive: bool) {
    let Value::Array(arr) = value else {
        panic!("sort_array_of_strings called on a non-array value");
    };
    arr.sort_by(|a, b| match (a.as_str(), b.as_str()) {
        (Some(x), Some(y)) if case_insensitive => x.to_ascii_lowercase().cmp(&y.to_ascii_lowercase()),
        (Some(x), Some(y)) => x.cmp(y),
        (None, Some(_)) => std::cmp::Ordering::Less,
        (Some(_), None) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}

/// Sorts an object value's members by key (spec §2's "Comparator / sorter"
/// canonicalization use case: "no canonicalization beyond optional key
/// sorting").
///
/// # Panics
///
/// Panics if `value` is not `Value::Object`.
pub fn sort_object_keys(value: &mut Value, case_insensitive: bool) {
    let Value::Object(obj) = value else {
        panic!("sort_object_keys called on a non-object value");
    };
    let mut entries: Vec<(String, Value)> = std::mem::take(obj).into_iter().collect();
    if case_insensitive {
        entries.sort_by(|(a, _), (b, _)| a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()));
    } else {
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
    }
    *obj = entries.into_iter().collect();
}

#[cfg(test)]
#[path = "tests/compare.rs"]
mod tests;
