//! Converts a [`Value`] tree back to JSON text (spec §4.2).
//!
//! The teacher's growable buffer doubles an explicitly managed capacity and
//! checks it before every write. Rust's `String` already doubles its backing
//! allocation on growth, so that bookkeeping is unnecessary here — the
//! "growable output buffer" requirement from spec §4.2 is satisfied by
//! `String` itself, leaving this module to focus on the actual formatting
//! rules (number/string escaping, indentation) spec §4.2 specifies.

use crate::escape::write_escaped_string;
use crate::number::format_number;
use crate::options::{Format, SerializeOptions};
use crate::value::Value;

/// Serializes `value` to a freshly allocated `String`.
#[must_use]
pub fn serialize(value: &Value, options: SerializeOptions) -> String {
    let mut out = String::new();
    match options.format {
        Format::Compact => write_compact(value, &mut out),
        Format::Indented => write_indented(value, &mut out, 0),
    }
    out
}

/// Serializes `value` into `buf`, failing if the result would exceed
/// `capacity` bytes, matching spec §4.2's "variant writes into a
/// caller-supplied fixed buffer" contract. `buf` is left containing however
/// much was written before the overflow was detected (spec §7: "the buffer
/// in an indeterminate state up to the failure point").
///
/// # Errors
///
/// Returns `Err(())` if the serialized form would exceed `capacity` bytes.
pub fn serialize_into(value: &Value, options: SerializeOptions, buf: &mut String, capacity: usize) -> Result<(), ()> {
    let rendered = serialize(value, options);
    if rendered.len() > capacity {
        buf.push_str(&rendered[..capacity.min(rendered.len())]);
        return Err(());
    }
    buf.push_str(&rendered);
    Ok(())
}

fn write_compact(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::String(s) => write_quoted(s, out),
        Value::Raw(s) => out.push_str(s),
        Value::Array(arr) => {
            out.push('[');
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_compact(item, out);
            }
            out.push(']');
        }
        Value::Object(obj) => {
            out.push('{');
            for (i, (k, v)) in obj.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_quoted(k, out);
                out.push(':');
                write_compact(v, out);
            }
            out.push('}');
        }
    }
}

fn write_indented(value: &Value, out: &mut String, depth: usize) {
    match value {
        Value::Array(arr) if !arr.is_empty() => {
            out.push('[');
            out.push('\n');
            for (i, item) in arr.iter().enumerate() {
                push_indent(out, depth + 1);
                write_indented(item, out, depth + 1);
                if i + 1 < arr.len() {
                    out.push_str(", ");
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push(']');
        }
        Value::Object(obj) if !obj.is_empty() => {
            out.push('{');
            out.push('\n');
            for (i, (k, v)) in obj.iter().enumerate() {
                push_indent(out, depth + 1);
                write_quoted(k, out);
                out.push(':');
                out.push('\t');
                write_indented(v, out, depth + 1);
                if i + 1 < obj.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            push_indent(out, depth);
            out.push('}');
        }
        _ => write_compact(value, out),
    }
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push('\t');
    }
}

fn write_quoted(s: &str, out: &mut String) {
    out.push('"');
    write_escaped_string(s, out);
    out.push('"');
}

#[cfg(test)]
#[path = "tests/serializer.rs"]
mod tests;
