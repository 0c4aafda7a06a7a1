use crate::options::{Format, SerializeOptions};
use crate::parser::parse;
use crate::serializer::serialize;
use crate::value::Value;

fn compact(v: &Value) -> String {
    serialize(v, SerializeOptions { format: Format::Compact })
}

#[test]
fn serializes_scalar_array_compactly() {
    // spec §8 concrete scenario 1.
    let v = parse(br#"[1, 2.5, true, null, "x"]"#).unwrap();
    assert_eq!(compact(&v), r#"[1,2.5,true,null,"x"]"#);
}

#[test]
fn serializes_empty_containers() {
    assert_eq!(compact(&Value::Array(vec![])), "[]");
    assert_eq!(compact(&Value::Object(Default::default())), "{}");
}

#[test]
fn raw_value_is_emitted_verbatim() {
    let v = Value::raw("1,2,3");
    assert_eq!(compact(&v), "1,2,3");
}

#[test]
fn indented_output_uses_tabs() {
    let v = parse(br#"{"a":[1,2]}"#).unwrap();
    let out = serialize(&v, SerializeOptions { format: Format::Indented });
    assert_eq!(out, "{\n\t\"a\":\t[\n\t\t1, \n\t\t2\n\t]\n}");
}

#[test]
fn escapes_special_string_bytes_on_output() {
    let v = Value::from("a\"b\\c\nd");
    assert_eq!(compact(&v), r#""a\"b\\c\nd""#);
}

#[test]
fn round_trips_through_parse_and_serialize() {
    let text = r#"{"a":1,"b":[true,false,null],"c":{"d":"e"}}"#;
    let v = parse(text.as_bytes()).unwrap();
    assert_eq!(compact(&v), text);
}
