use crate::error::PatchError;
use crate::parser::parse;
use crate::patch::{apply_patch, diff};
use crate::serializer::serialize;

fn apply_str(base: &str, patch: &str) -> Result<String, PatchError> {
    let mut target = parse(base.as_bytes()).unwrap();
    let patch = parse(patch.as_bytes()).unwrap();
    apply_patch(&mut target, &patch)?;
    Ok(serialize(&target, Default::default()))
}

#[test]
fn applies_the_spec_batch_scenario() {
    // spec §8 concrete scenario 4.
    let result = apply_str(
        r#"{"a":[1,2,3],"b":{"x":1}}"#,
        r#"[{"op":"remove","path":"/a/1"},{"op":"add","path":"/b/y","value":2},{"op":"replace","path":"/a/0","value":9}]"#,
    )
    .unwrap();
    assert_eq!(result, r#"{"a":[9,3],"b":{"x":1,"y":2}}"#);
}

#[test]
fn add_appends_with_dash_token() {
    let result = apply_str(r#"{"a":[1,2]}"#, r#"[{"op":"add","path":"/a/-","value":3}]"#).unwrap();
    assert_eq!(result, r#"{"a":[1,2,3]}"#);
}

#[test]
fn add_inserts_before_index_shifting_right() {
    let result = apply_str(r#"{"a":[1,2]}"#, r#"[{"op":"add","path":"/a/0","value":9}]"#).unwrap();
    assert_eq!(result, r#"{"a":[9,1,2]}"#);
}

#[test]
fn remove_missing_path_fails() {
    let err = apply_str(r#"{"a":1}"#, r#"[{"op":"remove","path":"/b"}]"#).unwrap_err();
    assert!(matches!(err, PatchError::MissingPath(0, _)));
}

#[test]
fn move_relocates_value() {
    let result = apply_str(r#"{"a":1,"b":2}"#, r#"[{"op":"move","from":"/a","path":"/c"}]"#).unwrap();
    assert_eq!(result, r#"{"b":2,"c":1}"#);
}

#[test]
fn copy_duplicates_rather_than_aliases() {
    let mut target = parse(br#"{"a":{"x":1}}"#).unwrap();
    let patch = parse(br#"[{"op":"copy","from":"/a","path":"/b"}]"#).unwrap();
    apply_patch(&mut target, &patch).unwrap();
    apply_patch(
        &mut target,
        &parse(br#"[{"op":"replace","path":"/b/x","value":99}]"#).unwrap(),
    )
    .unwrap();
    assert_eq!(target.get("a").unwrap().get("x").unwrap().as_f64(), Some(1.0));
    assert_eq!(target.get("b").unwrap().get("x").unwrap().as_f64(), Some(99.0));
}

#[test]
fn test_op_fails_batch_on_mismatch() {
    let err = apply_str(
        r#"{"a":1}"#,
        r#"[{"op":"test","path":"/a","value":2},{"op":"replace","path":"/a","value":5}]"#,
    )
    .unwrap_err();
    assert!(matches!(err, PatchError::TestFailed(0)));
}

#[test]
fn empty_patch_is_a_no_op() {
    let result = apply_str(r#"{"a":1}"#, "[]").unwrap();
    assert_eq!(result, r#"{"a":1}"#);
}

#[test]
fn root_replace_overwrites_whole_document() {
    let result = apply_str(r#"{"a":1}"#, r#"[{"op":"replace","path":"","value":42}]"#).unwrap();
    assert_eq!(result, "42");
}

#[test]
fn diff_matches_spec_array_append_scenario() {
    // spec §8 concrete scenario 6.
    let a = parse(br#"{"x":[1,2,3]}"#).unwrap();
    let b = parse(br#"{"x":[1,2,3,4]}"#).unwrap();
    let patch = diff(&a, &b);
    assert_eq!(
        serialize(&patch, Default::default()),
        r#"[{"op":"add","path":"/x/-","value":4}]"#
    );
    let mut applied = a.clone();
    apply_patch(&mut applied, &patch).unwrap();
    assert!(crate::compare::equal(&applied, &b));
}

#[test]
fn diff_of_equal_documents_is_empty() {
    let a = parse(br#"{"a":1,"b":[1,2]}"#).unwrap();
    let patch = diff(&a, &a);
    assert_eq!(patch.as_array().unwrap().len(), 0);
}

#[test]
fn diff_removes_trailing_array_elements() {
    let a = parse(b"[1,2,3,4]").unwrap();
    let b = parse(b"[1,2]").unwrap();
    let patch = diff(&a, &b);
    let mut applied = a.clone();
    apply_patch(&mut applied, &patch).unwrap();
    assert!(crate::compare::equal(&applied, &b));
}

#[test]
fn diff_handles_object_key_additions_and_removals() {
    let a = parse(br#"{"a":1,"b":2}"#).unwrap();
    let b = parse(br#"{"b":2,"c":3}"#).unwrap();
    let patch = diff(&a, &b);
    let mut applied = a.clone();
    apply_patch(&mut applied, &patch).unwrap();
    assert!(crate::compare::equal_unordered(&applied, &b));
}
