//! RFC 6902 JSON Patch: application and diff generation (spec §4.5).

use crate::compare::{equal, equal_unordered, sorted_entries};
use crate::error::PatchError;
use crate::options::DuplicateOptions;
use crate::pointer::{Pointer, Token};
use crate::value::{Object, Value};

/// Applies a patch document (a JSON array of operations) to `target` in
/// place.
///
/// A batch stops at the first failing operation, matching spec §4.5's "A
/// batch stops at the first failing operation and returns a numeric failure
/// code"; `target` may be partially mutated by the operations that already
/// succeeded when this returns an error, mirroring the source's "caller must
/// free partial results" propagation policy (spec §7) translated to "caller
/// must discard the partially-applied document."
///
/// # Errors
///
/// Returns [`PatchError`] describing the first operation that could not be
/// applied.
pub fn apply_patch(target: &mut Value, patch: &Value) -> Result<(), PatchError> {
    let ops = patch.as_array().ok_or(PatchError::NotAnArray)?;
    for (index, op) in ops.iter().enumerate() {
        apply_one(target, index, op)?;
    }
    Ok(())
}

fn apply_one(target: &mut Value, index: usize, op: &Value) -> Result<(), PatchError> {
    let op_name = op
        .get("op")
        .and_then(Value::as_str)
        .ok_or(PatchError::MissingOperand(index, "op"))?;
    let path_str = op
        .get("path")
        .and_then(Value::as_str)
        .ok_or(PatchError::MissingOperand(index, "path"))?;
    let path = Pointer::parse(path_str).map_err(|_| PatchError::InvalidPointer(index, path_str.to_string()))?;

    match op_name {
        "add" => {
            let value = op.get("value").ok_or(PatchError::MissingOperand(index, "value"))?;
            add_at(target, index, &path, value.clone())
        }
        "remove" => remove_at(target, index, &path),
        "replace" => {
            let value = op.get("value").ok_or(PatchError::MissingOperand(index, "value"))?;
            remove_at(target, index, &path)?;
            add_at(target, index, &path, value.clone())
        }
        "move" => {
            let from_str = op.get("from").and_then(Value::as_str).ok_or(PatchError::MissingOperand(index, "from"))?;
            let from = Pointer::parse(from_str).map_err(|_| PatchError::InvalidPointer(index, from_str.to_string()))?;
            let value = remove_at_returning(target, index, &from)?;
            add_at(target, index, &path, value)
        }
        "copy" => {
            let from_str = op.get("from").and_then(Value::as_str).ok_or(PatchError::MissingOperand(index, "from"))?;
            let from = Pointer::parse(from_str).map_err(|_| PatchError::InvalidPointer(index, from_str.to_string()))?;
            let source = from.resolve(target).ok_or_else(|| PatchError::MissingPath(index, from_str.to_string()))?;
            let duplicated = source
                .duplicate(DuplicateOptions::default())
                .map_err(|_| PatchError::MissingPath(index, from_str.to_string()))?;
            add_at(target, index, &path, duplicated)
        }
        "test" => {
            let value = op.get("value").ok_or(PatchError::MissingOperand(index, "value"))?;
            let actual = path.resolve(target).ok_or_else(|| PatchError::MissingPath(index, path_str.to_string()))?;
            if equal(actual, value) {
                Ok(())
            } else {
                Err(PatchError::TestFailed(index))
            }
        }
        other => Err(PatchError::InvalidOp(index, other.to_string())),
    }
}

/// Adds `value` at `path`, per spec §4.5's `add` semantics: root replacement,
/// array insert-or-append, or object add-or-overwrite.
fn add_at(target: &mut Value, index: usize, path: &Pointer, value: Value) -> Result<(), PatchError> {
    if path.is_root() {
        *target = value;
        return Ok(());
    }
    let (parent_tokens, last) = split_last(path);
    let parent = Pointer::from_tokens(parent_tokens)
        .resolve_mut(target)
        .ok_or_else(|| PatchError::MissingPath(index, path.to_raw_string()))?;
    match (parent, last) {
        (Value::Array(_), Token::Dash) => {
            parent.push(value);
            Ok(())
        }
        (Value::Array(arr), Token::Index(i)) if i <= arr.len() => {
            parent.insert_at(i, value);
            Ok(())
        }
        (Value::Object(_), Token::Key(k)) => {
            parent.set(k, value);
            Ok(())
        }
        // "-" is only the array append marker against an array; against an
        // object it's the literal member name "-" (see `pointer.rs::step`).
        (Value::Object(_), Token::Dash) => {
            parent.set("-", value);
            Ok(())
        }
        _ => Err(PatchError::MissingPath(index, path.to_raw_string())),
    }
}

/// Detaches and discards the value at `path`.
fn remove_at(target: &mut Value, index: usize, path: &Pointer) -> Result<(), PatchError> {
    remove_at_returning(target, index, path).map(|_| ())
}

fn remove_at_returning(target: &mut Value, index: usize, path: &Pointer) -> Result<Value, PatchError> {
    if path.is_root() {
        return Ok(std::mem::replace(target, Value::Null));
    }
    let (parent_tokens, last) = split_last(path);
    let parent = Pointer::from_tokens(parent_tokens)
        .resolve_mut(target)
        .ok_or_else(|| PatchError::MissingPath(index, path.to_raw_string()))?;
    match (parent, last) {
        (Value::Array(_), Token::Index(i)) => parent
            .detach_index(i)
            .ok_or_else(|| PatchError::MissingPath(index, path.to_raw_string())),
        (Value::Object(_), Token::Key(k)) => parent
            .detach_key(&k)
            .ok_or_else(|| PatchError::MissingPath(index, path.to_raw_string())),
        (Value::Object(_), Token::Dash) => parent
            .detach_key("-")
            .ok_or_else(|| PatchError::MissingPath(index, path.to_raw_string())),
        _ => Err(PatchError::MissingPath(index, path.to_raw_string())),
    }
}

fn split_last(path: &Pointer) -> (Vec<Token>, Token) {
    let mut tokens = path.tokens().to_vec();
    let last = tokens.pop().expect("split_last called on the root pointer");
    (tokens, last)
}

/// Computes a patch that transforms `a` into `b`, per spec §4.5's diff
/// algorithm: differing scalar kinds/values become a single `replace`;
/// arrays are walked pairwise with tail removes/appends; objects are
/// sorted-merge-walked.
#[must_use]
pub fn diff(a: &Value, b: &Value) -> Value {
    let mut ops = Vec::new();
    diff_at(&Pointer::root(), a, b, &mut ops);
    Value::Array(ops)
}

fn diff_at(path: &Pointer, a: &Value, b: &Value, ops: &mut Vec<Value>) {
    match (a, b) {
        (Value::Array(xs), Value::Array(ys)) => diff_arrays(path, xs, ys, ops),
        (Value::Object(xs), Value::Object(ys)) => diff_objects(path, xs, ys, ops),
        _ if equal_unordered(a, b) => {}
        _ => ops.push(replace_op(path, b)),
    }
}

fn diff_arrays(path: &Pointer, xs: &[Value], ys: &[Value], ops: &mut Vec<Value>) {
    let shared = xs.len().min(ys.len());
    for i in 0..shared {
        diff_at(&path.joined_index(i), &xs[i], &ys[i], ops);
    }
    for i in (shared..xs.len()).rev() {
        ops.push(remove_op(&path.joined_index(i)));
    }
    for item in &ys[shared..] {
        ops.push(add_op(&path.joined_dash(), item.clone()));
    }
}

fn diff_objects(path: &Pointer, xs: &Object, ys: &Object, ops: &mut Vec<Value>) {
    let sorted_xs = sorted_entries(xs);
    let sorted_ys = sorted_entries(ys);
    let mut i = 0;
    let mut j = 0;
    while i < sorted_xs.len() || j < sorted_ys.len() {
        match (sorted_xs.get(i), sorted_ys.get(j)) {
            (Some((kx, vx)), Some((ky, vy))) if kx == ky => {
                diff_at(&path.joined_key(*kx), vx, vy, ops);
                i += 1;
                j += 1;
            }
            (Some((kx, _)), Some((ky, _))) if kx < ky => {
                ops.push(remove_op(&path.joined_key(*kx)));
                i += 1;
            }
            (Some(_), Some((ky, vy))) => {
                ops.push(add_op(&path.joined_key(*ky), vy.clone()));
                j += 1;
            }
            (Some((kx, _)), None) => {
                ops.push(remove_op(&path.joined_key(*kx)));
                i += 1;
            }
            (None, Some((ky, vy))) => {
                ops.push(add_op(&path.joined_key(*ky), vy.clone()));
                j += 1;
            }
            (None, None) => unreachable!(),
        }
    }
}

fn op_object(op: &str, path: &Pointer) -> Object {
    let mut obj = Object::new();
    obj.insert("op".to_string(), Value::from(op));
    obj.insert("path".to_string(), Value::from(path.to_raw_string()));
    obj
}

fn add_op(path: &Pointer, value: Value) -> Value {
    let mut obj = op_object("add", path);
    obj.insert("value".to_string(), value);
    Value::Object(obj)
}

fn remove_op(path: &Pointer) -> Value {
    Value::Object(op_object("remove", path))
}

fn replace_op(path: &Pointer, value: &Value) -> Value {
    let mut obj = op_object("replace", path);
    obj.insert("value".to_string(), value.clone());
    Value::Object(obj)
}

#[cfg(test)]
#[path = "tests/patch.rs"]
mod tests;
