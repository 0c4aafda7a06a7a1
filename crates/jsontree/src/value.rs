//! The in-memory JSON tree and its editing primitives.
//!
//! Spec §3 describes a tagged node with doubly linked, possibly-borrowed
//! children and two ownership flag bits. Per the Design Notes in spec §9,
//! this rewrite drops the intrusive linked list and the reference/
//! constant-key flags entirely in favor of a plain, always-owned tree
//! (`Vec` for arrays, an insertion-ordered map for objects) — the same
//! generalization the Design Notes recommend ("prefer a growable
//! array-of-children per parent").

use indexmap::IndexMap;

use crate::error::DuplicationLimitExceeded;
use crate::number::Number;
use crate::options::DuplicateOptions;

/// An ordered array of JSON values.
pub type Array = Vec<Value>;

/// An insertion-ordered map of JSON object keys to values (spec §3:
/// "Insertion order is preserved and observable through iteration and
/// serialization").
pub type Object = IndexMap<String, Value>;

/// A JSON value, as defined by [RFC 8259], plus the `Raw` extension kind
/// from spec §3.
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
// `cfg_attr`-gated so the core crate stays free of a serde dependency unless
// a downstream crate opts in with the `serde` feature (also enabled under
// `test` so the dev-dependency tests in this workspace can exercise it).
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool(bool),
    /// A JSON number.
    Number(Number),
    /// A JSON string.
    String(String),
    /// An ordered sequence of values.
    Array(Array),
    /// An ordered sequence of key/value pairs.
    Object(Object),
    /// A literal UTF-8 fragment emitted verbatim by the serializer without
    /// escaping (spec §3: "an extension used to splice precomputed JSON
    /// fragments"). Not produced by the parser.
    Raw(String),
}

/// The discriminator of a [`Value`], used by the comparator and patch-diff
/// logic to detect a change of kind without matching on the full value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `null`.
    Null,
    /// `true` / `false`.
    Bool,
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// An array.
    Array,
    /// An object.
    Object,
    /// A verbatim-emitted literal fragment.
    Raw,
}

impl Default for Value {
    fn default() -> Self {
        Self::Null
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(Number::from_f64(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Number(Number::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<Array> for Value {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Self::Object(v)
    }
}

impl Value {
    /// Constructs a `Value::Raw` carrying `text` verbatim.
    ///
    /// The serializer will emit `text` byte-for-byte without validating or
    /// escaping it; callers are responsible for ensuring `text` is valid
    /// JSON if the result must itself be parseable.
    #[must_use]
    pub fn raw(text: impl Into<String>) -> Self {
        Self::Raw(text.into())
    }

    /// This value's discriminator.
    #[must_use]
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Array(_) => ValueKind::Array,
            Self::Object(_) => ValueKind::Object,
            Self::Raw(_) => ValueKind::Raw,
        }
    }

    /// Whether this value is `Value::Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Whether this value is `Value::Bool`.
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Whether this value is `Value::Number`.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    /// Whether this value is `Value::String`.
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Whether this value is `Value::Array`.
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether this value is `Value::Object`.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(_))
    }

    /// Returns the underlying `bool`, or `None` if this isn't `Value::Bool`.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(b) = self { Some(*b) } else { None }
    }

    /// Returns the underlying double, or `None` if this isn't `Value::Number`.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        if let Self::Number(n) = self {
            Some(n.value())
        } else {
            None
        }
    }

    /// Returns the underlying text, or `None` if this is neither
    /// `Value::String` nor `Value::Raw`.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) | Self::Raw(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the underlying array, or `None` if this isn't `Value::Array`.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(a) = self { Some(a) } else { None }
    }

    /// Mutable counterpart of [`Value::as_array`].
    #[must_use]
    pub fn as_array_mut(&mut self) -> Option<&mut Array> {
        if let Self::Array(a) = self { Some(a) } else { None }
    }

    /// Returns the underlying object, or `None` if this isn't `Value::Object`.
    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        if let Self::Object(o) = self { Some(o) } else { None }
    }

    /// Mutable counterpart of [`Value::as_object`].
    #[must_use]
    pub fn as_object_mut(&mut self) -> Option<&mut Object> {
        if let Self::Object(o) = self { Some(o) } else { None }
    }

    /// Looks up a key on an object value, case-sensitively.
    ///
    /// Returns `None` for non-object values or missing keys.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|o| o.get(key))
    }

    /// Looks up a key on an object value using ASCII case folding (spec
    /// §4.3: "the latter uses ASCII `tolower`, not a Unicode-aware fold").
    #[must_use]
    pub fn get_case_insensitive(&self, key: &str) -> Option<&Value> {
        self.as_object()
            .and_then(|o| o.iter().find(|(k, _)| ascii_ieq(k, key)))
            .map(|(_, v)| v)
    }

    /// Appends `value` to an array in O(1), per spec §4.3's "Append"
    /// operation.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `Value::Array`.
    pub fn push(&mut self, value: Value) {
        match self {
            Self::Array(arr) => arr.push(value),
            _ => panic!("Value::push called on a non-array value"),
        }
    }

    /// Inserts `value` at `index` in an array, shifting later elements
    /// right. Falls back to appending if `index >= len`, per spec §4.3's
    /// "Insert-at-index" operation.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not `Value::Array`.
    pub fn insert_at(&mut self, index: usize, value: Value) {
        match self {
            Self::Array(arr) => {
                if index >= arr.len() {
                    arr.push(value);
                } else {
                    arr.insert(index, value);
                }
            }
            _ => panic!("Value::insert_at called on a non-array value"),
        }
    }

    /// Removes and returns the array element at `index`, or the object
    /// member for `key`, preserving the relative order of the remaining
    /// elements (spec §4.3's "Detach-by-pointer").
    #[must_use]
    pub fn detach_index(&mut self, index: usize) -> Option<Value> {
        match self {
            Self::Array(arr) if index < arr.len() => Some(arr.remove(index)),
            _ => None,
        }
    }

    /// Removes and returns the object member for `key`, preserving the
    /// order of the remaining members.
    pub fn detach_key(&mut self, key: &str) -> Option<Value> {
        self.as_object_mut().and_then(|o| o.shift_remove(key))
    }

    /// Replaces the array element at `index` (spec §4.3's
    /// "Replace-by-pointer"), returning the previous value.
    pub fn replace_index(&mut self, index: usize, value: Value) -> Option<Value> {
        match self {
            Self::Array(arr) if index < arr.len() => {
                Some(std::mem::replace(&mut arr[index], value))
            }
            _ => None,
        }
    }

    /// Inserts or replaces an object member, preserving its original
    /// position if it already existed (otherwise appending), mirroring
    /// `IndexMap::insert`'s semantics, which already match spec §4.5's "add"
    /// behavior ("delete any prior binding with that key and insert the new
    /// value").
    pub fn set(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.as_object_mut().and_then(|o| o.insert(key.into(), value))
    }

    /// Deep-duplicates this value, defending against pathologically deep
    /// trees with the same circular-reference-style recursion limit spec §3
    /// describes for deep duplication.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicationLimitExceeded`] if duplication would recurse
    /// past `options.max_depth`.
    pub fn duplicate(&self, options: DuplicateOptions) -> Result<Value, DuplicationLimitExceeded> {
        duplicate_inner(self, options.max_depth, 0)
    }
}

fn duplicate_inner(
    value: &Value,
    max_depth: usize,
    depth: usize,
) -> Result<Value, DuplicationLimitExceeded> {
    if depth > max_depth {
        return Err(DuplicationLimitExceeded(max_depth));
    }
    Ok(match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) | Value::Raw(_) => {
            value.clone()
        }
        Value::Array(arr) => {
            let mut out = Vec::with_capacity(arr.len());
            for item in arr {
                out.push(duplicate_inner(item, max_depth, depth + 1)?);
            }
            Value::Array(out)
        }
        Value::Object(obj) => {
            let mut out = Object::with_capacity(obj.len());
            for (k, v) in obj {
                out.insert(k.clone(), duplicate_inner(v, max_depth, depth + 1)?);
            }
            Value::Object(out)
        }
    })
}

/// ASCII case-insensitive string equality (spec §4.3: "uses ASCII `tolower`,
/// not a Unicode-aware fold").
pub(crate) fn ascii_ieq(a: &str, b: &str) -> bool {
    a.len() == b.len() && a.bytes().zip(b.bytes()).all(|(x, y)| x.to_ascii_lowercase() == y.to_ascii_lowercase())
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&crate::serializer::serialize(self, crate::options::SerializeOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_is_order_preserving() {
        let mut v = Value::Array(vec![Value::from(1i64)]);
        v.push(Value::from(2i64));
        v.push(Value::from(3i64));
        assert_eq!(v.as_array().unwrap().len(), 3);
    }

    #[test]
    fn insert_past_end_appends() {
        let mut v = Value::Array(vec![Value::from(1i64)]);
        v.insert_at(50, Value::from(2i64));
        assert_eq!(v.as_array().unwrap(), &vec![Value::from(1i64), Value::from(2i64)]);
    }

    #[test]
    fn object_preserves_insertion_order() {
        let mut obj = Object::new();
        obj.insert("b".to_string(), Value::from(1i64));
        obj.insert("a".to_string(), Value::from(2i64));
        let v = Value::Object(obj);
        let keys: Vec<_> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn case_insensitive_lookup_uses_ascii_fold() {
        let mut obj = Object::new();
        obj.insert("Content-Type".to_string(), Value::from("json"));
        let v = Value::Object(obj);
        assert!(v.get("content-type").is_none());
        assert_eq!(
            v.get_case_insensitive("content-type").unwrap().as_str(),
            Some("json")
        );
    }

    #[test]
    fn duplicate_respects_depth_limit() {
        let mut deep = Value::Null;
        for _ in 0..20 {
            deep = Value::Array(vec![deep]);
        }
        assert!(deep.duplicate(DuplicateOptions { max_depth: 5 }).is_err());
        assert!(deep.duplicate(DuplicateOptions { max_depth: 100 }).is_ok());
    }

    #[test]
    fn detach_key_preserves_remaining_order() {
        let mut obj = Object::new();
        obj.insert("a".to_string(), Value::from(1i64));
        obj.insert("b".to_string(), Value::from(2i64));
        obj.insert("c".to_string(), Value::from(3i64));
        let mut v = Value::Object(obj);
        v.detach_key("b");
        let keys: Vec<_> = v.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
    }
}
