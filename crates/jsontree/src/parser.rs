//! Recursive-descent RFC 8259 parser.
//!
//! Consumes a byte buffer and produces an owned [`Value`] tree under a
//! configurable depth bound (spec §4.1). Structural tokens in JSON are all
//! single-byte ASCII (`{ } [ ] , : "`), so this parser scans the input as raw
//! bytes throughout — `Scanner` never validates the buffer as UTF-8 up front.
//! Spec §4.1: "Non-escape bytes are copied verbatim; the decoder does not
//! re-validate UTF-8 on copy" — a malformed byte anywhere in the document
//! (including inside a string literal) is not itself a parse failure; UTF-8
//! is only consulted when a verbatim run of string content is copied into
//! the output `String` (see `Scanner::push_verbatim_run`), and even then a
//! malformed run is decoded lossily rather than rejected.

use crate::error::{ParseError, ParseErrorKind, clear_last_error, record_last_error};
use crate::escape::{UnicodeEscapeBuffer, combine_surrogates, is_high_surrogate, is_low_surrogate};
use crate::number::{Number, scan_number};
use crate::options::ParserOptions;
use crate::value::{Object, Value};

const BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Parses `bytes` as a single JSON document using [`ParserOptions::default`].
///
/// # Errors
///
/// Returns [`ParseError`] if `bytes` does not match the JSON grammar or
/// exceeds the default nesting limit. `bytes` need not be valid UTF-8 outside
/// of string literal content (spec §4.1: "the decoder does not re-validate
/// UTF-8 on copy").
pub fn parse(bytes: &[u8]) -> Result<Value, ParseError> {
    parse_with_options(bytes, &ParserOptions::default())
}

/// Parses `bytes` as a single JSON document, honoring `options`.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_with_options(bytes: &[u8], options: &ParserOptions) -> Result<Value, ParseError> {
    clear_last_error();
    match parse_document(bytes, options) {
        Ok(value) => Ok(value),
        Err(err) => {
            #[cfg(any(test, feature = "fuzzing"))]
            assert!(!options.panic_on_error, "{err}");
            record_last_error(&err);
            Err(err)
        }
    }
}

/// Parses a single JSON document from the start of `bytes` without requiring
/// the rest of the buffer to be consumed, returning the value and the
/// number of bytes consumed (including any leading BOM/whitespace).
///
/// This is the "optional out-pointer receiving the first unconsumed byte"
/// contract from spec §4.1, expressed as a return value instead of an
/// out-parameter.
///
/// # Errors
///
/// See [`parse`].
pub fn parse_prefix(bytes: &[u8], options: &ParserOptions) -> Result<(Value, usize), ParseError> {
    clear_last_error();
    match parse_one(bytes, options) {
        Ok(ok) => Ok(ok),
        Err(err) => {
            record_last_error(&err);
            Err(err)
        }
    }
}

fn parse_document(bytes: &[u8], options: &ParserOptions) -> Result<Value, ParseError> {
    let (value, consumed) = parse_one(bytes, options)?;
    if options.require_full_consumption {
        let rest = &bytes[consumed..];
        let trailing_ws = rest.iter().take_while(|&&b| b <= 0x20).count();
        if trailing_ws < rest.len() {
            let offset = consumed + trailing_ws;
            return Err(make_error(bytes, offset, ParseErrorKind::TrailingData));
        }
    }
    Ok(value)
}

fn parse_one(bytes: &[u8], options: &ParserOptions) -> Result<(Value, usize), ParseError> {
    let bom_len = if bytes.starts_with(BOM) { BOM.len() } else { 0 };
    let body = &bytes[bom_len..];

    if body.iter().all(|&b| b <= 0x20) {
        return Err(make_error(bytes, bytes.len(), ParseErrorKind::EmptyInput));
    }

    let mut scanner = Scanner { input: body, pos: 0 };
    scanner.skip_ws();
    let value = scanner
        .parse_value(0, options)
        .map_err(|kind| make_error(bytes, bom_len + scanner.pos, kind))?;
    Ok((value, bom_len + scanner.pos))
}

fn make_error(original: &[u8], offset: usize, kind: ParseErrorKind) -> ParseError {
    let offset = offset.min(original.len());
    let (line, column) = line_col(original, offset);
    ParseError { kind, offset, line, column }
}

fn line_col(bytes: &[u8], offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for &b in &bytes[..offset.min(bytes.len())] {
        if b == b'\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}

struct Scanner<'a> {
    input: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn bytes(&self) -> &'a [u8] {
        self.input
    }

    fn peek_byte(&self) -> Option<u8> {
        self.bytes().get(self.pos).copied()
    }

    fn bump_byte(&mut self) -> Option<u8> {
        let b = self.peek_byte()?;
        self.pos += 1;
        Some(b)
    }

    fn skip_ws(&mut self) {
        while let Some(b) = self.peek_byte() {
            if b <= 0x20 {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn parse_value(&mut self, depth: usize, options: &ParserOptions) -> Result<Value, ParseErrorKind> {
        self.skip_ws();
        match self.peek_byte() {
            None => Err(ParseErrorKind::UnexpectedEof),
            Some(b'"') => Ok(Value::String(self.parse_string()?)),
            Some(b'{') => self.parse_object(depth, options),
            Some(b'[') => self.parse_array(depth, options),
            Some(b't') => {
                self.expect_literal("true")?;
                Ok(Value::Bool(true))
            }
            Some(b'f') => {
                self.expect_literal("false")?;
                Ok(Value::Bool(false))
            }
            Some(b'n') => {
                self.expect_literal("null")?;
                Ok(Value::Null)
            }
            Some(b'-') | Some(b'0'..=b'9') => self.parse_number(options),
            Some(b'+') if options.allow_leading_plus => self.parse_number(options),
            Some(b) => Err(ParseErrorKind::UnexpectedCharacter(b as char)),
        }
    }

    fn expect_literal(&mut self, literal: &'static str) -> Result<(), ParseErrorKind> {
        let end = self.pos + literal.len();
        if self.bytes().get(self.pos..end) == Some(literal.as_bytes()) {
            self.pos = end;
            Ok(())
        } else {
            Err(ParseErrorKind::InvalidLiteral(literal))
        }
    }

    fn parse_number(&mut self, options: &ParserOptions) -> Result<Value, ParseErrorKind> {
        let (value, consumed) = scan_number(&self.bytes()[self.pos..], options.allow_leading_plus)?;
        self.pos += consumed;
        Ok(Value::Number(Number::from_f64(value)))
    }

    fn parse_array(&mut self, depth: usize, options: &ParserOptions) -> Result<Value, ParseErrorKind> {
        self.bump_byte(); // '['
        let depth = depth + 1;
        if depth > options.max_depth {
            return Err(ParseErrorKind::NestingLimitExceeded(options.max_depth));
        }

        let mut arr = Vec::new();
        self.skip_ws();
        if self.peek_byte() == Some(b']') {
            self.bump_byte();
            return Ok(Value::Array(arr));
        }

        loop {
            let value = self.parse_value(depth, options)?;
            arr.push(value);
            self.skip_ws();
            match self.bump_byte() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek_byte() == Some(b']') {
                        return Err(ParseErrorKind::TrailingComma);
                    }
                }
                Some(b']') => return Ok(Value::Array(arr)),
                Some(b) => return Err(ParseErrorKind::UnexpectedCharacter(b as char)),
                None => return Err(ParseErrorKind::UnexpectedEof),
            }
        }
    }

    fn parse_object(&mut self, depth: usize, options: &ParserOptions) -> Result<Value, ParseErrorKind> {
        self.bump_byte(); // '{'
        let depth = depth + 1;
        if depth > options.max_depth {
            return Err(ParseErrorKind::NestingLimitExceeded(options.max_depth));
        }

        let mut obj = Object::new();
        self.skip_ws();
        if self.peek_byte() == Some(b'}') {
            self.bump_byte();
            return Ok(Value::Object(obj));
        }

        loop {
            self.skip_ws();
            if self.peek_byte() != Some(b'"') {
                return match self.peek_byte() {
                    Some(b) => Err(ParseErrorKind::UnexpectedCharacter(b as char)),
                    None => Err(ParseErrorKind::UnexpectedEof),
                };
            }
            let key = self.parse_string()?;
            self.skip_ws();
            if self.bump_byte() != Some(b':') {
                return Err(ParseErrorKind::UnexpectedCharacter(':'));
            }
            let value = self.parse_value(depth, options)?;
            obj.insert(key, value);
            self.skip_ws();
            match self.bump_byte() {
                Some(b',') => {
                    self.skip_ws();
                    if self.peek_byte() == Some(b'}') {
                        return Err(ParseErrorKind::TrailingComma);
                    }
                }
                Some(b'}') => return Ok(Value::Object(obj)),
                Some(b) => return Err(ParseErrorKind::UnexpectedCharacter(b as char)),
                None => return Err(ParseErrorKind::UnexpectedEof),
            }
        }
    }

    fn parse_string(&mut self) -> Result<String, ParseErrorKind> {
        self.bump_byte(); // opening '"'
        let mut out = String::new();
        let mut run_start = self.pos;

        loop {
            match self.peek_byte() {
                None => return Err(ParseErrorKind::UnexpectedEof),
                Some(b'"') => {
                    self.push_verbatim_run(&mut out, run_start);
                    self.bump_byte();
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.push_verbatim_run(&mut out, run_start);
                    self.bump_byte();
                    self.parse_escape(&mut out)?;
                    run_start = self.pos;
                }
                Some(b) if b < 0x20 => return Err(ParseErrorKind::UnexpectedCharacter(b as char)),
                Some(_) => {
                    self.bump_byte();
                }
            }
        }
    }

    /// Appends `self.input[run_start..self.pos]` to `out`.
    ///
    /// Spec §4.1: "Non-escape bytes are copied verbatim; the decoder does not
    /// re-validate UTF-8 on copy." This crate stores string content in
    /// Rust's `String`, which must be valid UTF-8, so a byte-identical copy
    /// of a malformed run isn't representable; the closest safe equivalent is
    /// a lossy decode (invalid sequences become U+FFFD) rather than failing
    /// the whole document the way an upfront whole-buffer UTF-8 gate would.
    fn push_verbatim_run(&self, out: &mut String, run_start: usize) {
        let run = &self.input[run_start..self.pos];
        match std::str::from_utf8(run) {
            Ok(s) => out.push_str(s),
            Err(_) => out.push_str(&String::from_utf8_lossy(run)),
        }
    }

    fn parse_escape(&mut self, out: &mut String) -> Result<(), ParseErrorKind> {
        match self.bump_byte() {
            Some(b'"') => out.push('"'),
            Some(b'\\') => out.push('\\'),
            Some(b'/') => out.push('/'),
            Some(b'b') => out.push('\u{8}'),
            Some(b'f') => out.push('\u{c}'),
            Some(b'n') => out.push('\n'),
            Some(b'r') => out.push('\r'),
            Some(b't') => out.push('\t'),
            Some(b'u') => {
                let unit = self.parse_hex4()?;
                if is_high_surrogate(unit) {
                    if self.bump_byte() != Some(b'\\') || self.bump_byte() != Some(b'u') {
                        return Err(ParseErrorKind::LoneSurrogate(u32::from(unit)));
                    }
                    let low = self.parse_hex4()?;
                    if !is_low_surrogate(low) {
                        return Err(ParseErrorKind::LoneSurrogate(u32::from(unit)));
                    }
                    out.push(combine_surrogates(unit, low));
                } else if is_low_surrogate(unit) {
                    return Err(ParseErrorKind::LoneSurrogate(u32::from(unit)));
                } else if unit == 0 {
                    // The reference implementation stores strings
                    // NUL-terminated and cannot represent an embedded NUL;
                    // spec §4.1 calls out `\u0000` as a parse failure for
                    // this reason, so this crate replicates the restriction
                    // rather than silently accepting a byte its origin
                    // couldn't round-trip.
                    return Err(ParseErrorKind::InvalidUnicodeEscape(0));
                } else {
                    let c = char::from_u32(u32::from(unit))
                        .ok_or(ParseErrorKind::InvalidUnicodeEscape(u32::from(unit)))?;
                    out.push(c);
                }
            }
            Some(_) => return Err(ParseErrorKind::InvalidEscape),
            None => return Err(ParseErrorKind::UnexpectedEof),
        }
        Ok(())
    }

    fn parse_hex4(&mut self) -> Result<u16, ParseErrorKind> {
        let mut buf = UnicodeEscapeBuffer::new();
        for _ in 0..4 {
            let b = self.bump_byte().ok_or(ParseErrorKind::UnexpectedEof)?;
            if let Some(unit) = buf.feed(b)? {
                return Ok(unit);
            }
        }
        unreachable!("UnicodeEscapeBuffer always yields a value after four digits")
    }
}

#[cfg(test)]
#[path = "tests/parser.rs"]
mod tests;
