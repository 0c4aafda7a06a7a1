#![allow(missing_docs)]

use jsontree::{Pointer, parse, pointer_to};

#[test]
fn empty_pointer_is_the_document_root() {
    let doc = parse(br#"{"a":1}"#).unwrap();
    assert_eq!(Pointer::parse("").unwrap().resolve(&doc), Some(&doc));
}

#[test]
fn resolves_through_nested_arrays_and_objects() {
    let doc = parse(br#"{"users":[{"name":"ada"},{"name":"grace"}]}"#).unwrap();
    let p = Pointer::parse("/users/1/name").unwrap();
    assert_eq!(p.resolve(&doc).unwrap().as_str(), Some("grace"));
}

#[test]
fn case_insensitive_resolution_folds_ascii_only() {
    let doc = parse(br#"{"Name":"ada"}"#).unwrap();
    let p = Pointer::parse("/name").unwrap();
    assert!(p.resolve(&doc).is_none());
    assert_eq!(p.resolve_case_insensitive(&doc).unwrap().as_str(), Some("ada"));
}

#[test]
fn reverse_lookup_round_trips_through_resolve() {
    let doc = parse(br#"{"a":{"b":[1,2,3]}}"#).unwrap();
    let target = Pointer::parse("/a/b/2").unwrap().resolve(&doc).unwrap();
    let found = pointer_to(&doc, target).unwrap();
    assert_eq!(found.resolve(&doc), Some(target));
}

#[test]
fn invalid_syntax_without_leading_slash_is_rejected() {
    assert!(Pointer::parse("a/b").is_err());
}

#[test]
fn dash_token_resolves_a_literal_object_key_named_dash() {
    // RFC 6901's "-" only means "one past the last array element" against an
    // array; against an object it's just the ordinary member name "-".
    let doc = parse(br#"{"-":"dash"}"#).unwrap();
    let p = Pointer::parse("/-").unwrap();
    assert_eq!(p.resolve(&doc).unwrap().as_str(), Some("dash"));
}

#[test]
fn dash_token_against_an_array_does_not_resolve() {
    let doc = parse(br#"[1,2,3]"#).unwrap();
    let p = Pointer::parse("/-").unwrap();
    assert!(p.resolve(&doc).is_none());
}
