use crate::compare::{equal, equal_unordered, sort_array_of_strings, sort_object_keys};
use crate::parser::parse;
use crate::value::Value;

#[test]
fn scalars_compare_by_kind_and_value() {
    assert!(equal(&Value::Null, &Value::Null));
    assert!(!equal(&Value::Null, &Value::Bool(false)));
    assert!(equal(&Value::from(1i64), &Value::from(1.0f64)));
}

#[test]
fn numbers_use_epsilon_and_int_projection() {
    let a = Value::from(0.1 + 0.2);
    let b = Value::from(0.3f64);
    // Close but not bitwise equal; still within epsilon and same int
    // projection (both truncate to 0).
    assert!(equal(&a, &b));
}

#[test]
fn arrays_require_same_order() {
    let a = parse(b"[1,2,3]").unwrap();
    let b = parse(b"[1,3,2]").unwrap();
    assert!(!equal(&a, &b));
}

#[test]
fn objects_require_identical_stored_order_for_equal() {
    let a = parse(br#"{"a":1,"b":2}"#).unwrap();
    let b = parse(br#"{"b":2,"a":1}"#).unwrap();
    assert!(!equal(&a, &b));
    assert!(equal_unordered(&a, &b));
}

#[test]
fn sort_object_keys_orders_by_key() {
    let mut v = parse(br#"{"b":1,"a":2,"c":3}"#).unwrap();
    sort_object_keys(&mut v, false);
    let keys: Vec<_> = v.as_object().unwrap().keys().collect();
    assert_eq!(keys, vec!["a", "b", "c"]);
}

#[test]
fn sort_array_of_strings_is_case_insensitive_when_requested() {
    let mut v = Value::Array(vec![Value::from("banana"), Value::from("Apple"), Value::from("cherry")]);
    sort_array_of_strings(&mut v, true);
    let arr = v.as_array().unwrap();
    let rendered: Vec<_> = arr.iter().map(|x| x.as_str().unwrap()).collect();
    assert_eq!(rendered, vec!["Apple", "banana", "cherry"]);
}
