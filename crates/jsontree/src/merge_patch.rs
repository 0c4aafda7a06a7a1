//! RFC 7386 JSON Merge Patch: application and diff generation (spec §4.6).

use crate::compare::{equal_unordered, sorted_entries};
use crate::options::DuplicateOptions;
use crate::value::{Object, Value};

/// Applies `patch` to `target` in place, per RFC 7386's recursive merge
/// semantics.
///
/// If `patch` is not an object, it replaces `target` wholesale. Otherwise
/// `target` is coerced to an object (discarding any prior non-object
/// content), and for each key in `patch`: a `null` value deletes that key
/// from `target`; any other value recursively merges into the matching key,
/// creating it if absent. Keys are applied in the patch's stored order.
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch_obj) = patch else {
        *target = patch.clone();
        return;
    };
    if !target.is_object() {
        *target = Value::Object(Object::new());
    }
    let target_obj = target.as_object_mut().expect("just coerced to an object");
    for (key, patch_value) in patch_obj {
        if patch_value.is_null() {
            target_obj.shift_remove(key);
            continue;
        }
        match target_obj.get_mut(key) {
            Some(existing) => apply_merge_patch(existing, patch_value),
            None => {
                let mut fresh = Value::Null;
                apply_merge_patch(&mut fresh, patch_value);
                target_obj.insert(key.clone(), fresh);
            }
        }
    }
}

/// Computes a merge patch that, applied to `from`, yields `to`.
///
/// Returns `None` when the only faithful patch would be `{}` (i.e. `from`
/// and `to` are already equal as objects), matching spec §4.6's "An empty
/// resulting patch is dropped (returns not-found) to avoid emitting `{}` for
/// equal documents."
#[must_use]
pub fn diff_merge_patch(from: &Value, to: &Value) -> Option<Value> {
    match (from, to) {
        (Value::Object(from_obj), Value::Object(to_obj)) => {
            let patch = merge_walk(from_obj, to_obj);
            if patch.is_empty() { None } else { Some(Value::Object(patch)) }
        }
        _ if equal_unordered(from, to) => None,
        (_, _) => Some(
            to.duplicate(DuplicateOptions::default())
                .expect("diff_merge_patch source tree respects the duplication depth limit"),
        ),
    }
}

fn merge_walk(from_obj: &Object, to_obj: &Object) -> Object {
    let sorted_from = sorted_entries(from_obj);
    let sorted_to = sorted_entries(to_obj);
    let mut patch = Object::new();
    let mut i = 0;
    let mut j = 0;
    while i < sorted_from.len() || j < sorted_to.len() {
        match (sorted_from.get(i), sorted_to.get(j)) {
            (Some((kf, vf)), Some((kt, vt))) if kf == kt => {
                // `diff_merge_patch` only returns `None` for equal inputs,
                // which `equal_unordered` already ruled out here.
                if let Some(sub) = diff_merge_patch(vf, vt) {
                    patch.insert((*kf).to_string(), sub);
                }
                i += 1;
                j += 1;
            }
            (Some((kf, _)), Some((kt, _))) if kf < kt => {
                patch.insert((*kf).to_string(), Value::Null);
                i += 1;
            }
            (Some(_), Some((kt, vt))) => {
                patch.insert(
                    (*kt).to_string(),
                    vt.duplicate(DuplicateOptions::default())
                        .expect("diff_merge_patch source tree respects the duplication depth limit"),
                );
                j += 1;
            }
            (Some((kf, _)), None) => {
                patch.insert((*kf).to_string(), Value::Null);
                i += 1;
            }
            (None, Some((kt, vt))) => {
                patch.insert(
                    (*kt).to_string(),
                    vt.duplicate(DuplicateOptions::default())
                        .expect("diff_merge_patch source tree respects the duplication depth limit"),
                );
                j += 1;
            }
            (None, None) => unreachable!(),
        }
    }
    patch
}

#[cfg(test)]
#[path = "tests/merge_patch.rs"]
mod tests;
