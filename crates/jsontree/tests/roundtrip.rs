#![allow(missing_docs)]

//! Property tests for the round-trip and idempotence laws spec §8 calls out:
//! `parse . serialize == id`, `minify . minify == minify`, and
//! `apply(diff(a, b), a) == b` (plus the merge-patch analogue).

use jsontree::{
    MinifyOptions, Value, apply_merge_patch, apply_patch, diff, diff_merge_patch, equal, minify,
    parse, serialize,
};
use quickcheck::{Arbitrary, Gen, TestResult};
use quickcheck_macros::quickcheck;

/// A `quickcheck`-generated document containing only kinds the round-trip
/// laws apply to: no `Raw` (an extension the parser never produces) and no
/// non-finite numbers (which serialize to `"null"` and so never round-trip
/// back to themselves as numbers).
#[derive(Debug, Clone)]
struct ArbValue(Value);

impl Arbitrary for ArbValue {
    fn arbitrary(g: &mut Gen) -> Self {
        ArbValue(gen_value(g, 3))
    }
}

fn gen_value(g: &mut Gen, depth: usize) -> Value {
    let choices: &[usize] = if depth == 0 { &[0, 1, 2, 3] } else { &[0, 1, 2, 3, 4, 5] };
    let pick = *g.choose(choices).expect("choices is non-empty");
    match pick {
        0 => Value::Null,
        1 => Value::Bool(bool::arbitrary(g)),
        2 => Value::from(finite_f64(g)),
        3 => Value::from(arbitrary_string(g)),
        4 => {
            let len = usize::arbitrary(g) % 4;
            Value::Array((0..len).map(|_| gen_value(g, depth - 1)).collect())
        }
        _ => {
            let len = usize::arbitrary(g) % 4;
            let mut obj = jsontree::Object::new();
            for _ in 0..len {
                obj.insert(arbitrary_string(g), gen_value(g, depth - 1));
            }
            Value::Object(obj)
        }
    }
}

fn finite_f64(g: &mut Gen) -> f64 {
    loop {
        let v = f64::arbitrary(g);
        if v.is_finite() {
            return v;
        }
    }
}

/// Restricted to printable ASCII so the generated string never contains a
/// lone UTF-16 surrogate or a byte the parser's escape decoder would reject.
fn arbitrary_string(g: &mut Gen) -> String {
    let len = usize::arbitrary(g) % 8;
    (0..len)
        .map(|_| {
            let table: Vec<char> = ('a'..='z').chain('0'..='9').chain([' ', '_', '-']).collect();
            *g.choose(&table).expect("table is non-empty")
        })
        .collect()
}

#[quickcheck]
fn parse_of_serialize_is_identity(v: ArbValue) -> bool {
    let text = serialize(&v.0, Default::default());
    let reparsed = parse(text.as_bytes()).expect("serializer output is always valid JSON");
    equal(&reparsed, &v.0)
}

#[quickcheck]
fn minify_is_idempotent(v: ArbValue) -> bool {
    let text = serialize(&v.0, Default::default());
    let once = minify(&text, MinifyOptions::default());
    let twice = minify(&once, MinifyOptions::default());
    once == twice
}

#[quickcheck]
fn second_round_trip_is_stable(v: ArbValue) -> bool {
    let first = serialize(&v.0, Default::default());
    let reparsed = parse(first.as_bytes()).unwrap();
    let second = serialize(&reparsed, Default::default());
    minify(&first, MinifyOptions::default()) == minify(&second, MinifyOptions::default())
}

#[quickcheck]
fn diff_then_apply_reconstructs_target(a: ArbValue, b: ArbValue) -> TestResult {
    // `diff` only handles object/array structural edits meaningfully when
    // both roots are the same container kind; scalar-root diffs degenerate
    // to a single whole-document replace, which this property also covers.
    let patch = diff(&a.0, &b.0);
    let mut applied = a.0.clone();
    match apply_patch(&mut applied, &patch) {
        Ok(()) => TestResult::from_bool(equal(&applied, &b.0)),
        Err(_) => TestResult::failed(),
    }
}

#[quickcheck]
fn merge_apply_of_merge_diff_reconstructs_target(a: ArbValue, b: ArbValue) -> bool {
    match diff_merge_patch(&a.0, &b.0) {
        None => equal(&a.0, &b.0),
        Some(patch) => {
            let mut applied = a.0.clone();
            apply_merge_patch(&mut applied, &patch);
            equal(&applied, &b.0)
        }
    }
}

#[quickcheck]
fn empty_patch_batch_is_identity(v: ArbValue) -> bool {
    let mut applied = v.0.clone();
    apply_patch(&mut applied, &Value::Array(Vec::new())).unwrap();
    equal(&applied, &v.0)
}

#[quickcheck]
fn empty_object_merge_patch_is_identity(v: ArbValue) -> bool {
    let mut applied = v.0.clone();
    apply_merge_patch(&mut applied, &Value::Object(jsontree::Object::new()));
    if v.0.is_object() {
        equal(&applied, &v.0)
    } else {
        // RFC 7386 §2's wholesale-replace rule only leaves a non-object
        // target untouched because the merge step explicitly skips deleting
        // keys that were never there; applying an empty object patch to a
        // non-object value instead *becomes* an (empty) object, per
        // `apply_merge_patch`'s coercion rule (spec §4.6: "the target is
        // coerced to an object").
        applied.is_object() && applied.as_object().unwrap().is_empty()
    }
}

#[test]
fn surrogate_pair_round_trips_through_parse_and_serialize() {
    let doc = parse("\"\\uD834\\uDD1E\"".as_bytes()).unwrap();
    assert_eq!(doc.as_str(), Some("\u{1D11E}"));
    assert_eq!(serialize(&doc, Default::default()), "\"\u{1D11E}\"");
}

#[test]
fn lone_high_surrogate_fails_to_parse() {
    assert!(parse(br#""\uD800""#).is_err());
}

#[test]
fn nesting_at_exactly_the_limit_succeeds_and_one_past_fails() {
    let opts = jsontree::ParserOptions { max_depth: 3, ..Default::default() };
    let at_limit = "[[[1]]]";
    let one_past = "[[[[1]]]]";
    assert!(jsontree::parse_with_options(at_limit.as_bytes(), &opts).is_ok());
    assert!(jsontree::parse_with_options(one_past.as_bytes(), &opts).is_err());
}
