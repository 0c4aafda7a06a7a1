//! Error types shared by the parser, serializer, and document-mutation
//! layers.

use std::cell::Cell;

use thiserror::Error;

/// Why a parse failed.
///
/// [`ParseError`] always carries the byte offset at which the parser could
/// not proceed, clamped to the last valid byte if parsing ran past the end of
/// the buffer, matching spec §4.1's error-reporting contract.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{kind} at byte {offset} ({line}:{column})")]
pub struct ParseError {
    pub(crate) kind: ParseErrorKind,
    /// Byte offset into the original buffer where parsing stopped.
    pub offset: usize,
    /// 1-based line number of `offset`.
    pub line: usize,
    /// 1-based column number of `offset`.
    pub column: usize,
}

impl ParseError {
    /// The specific grammar violation or limit that was hit.
    #[must_use]
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The specific reason a parse failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The buffer ended in the middle of a value.
    #[error("unexpected end of input")]
    UnexpectedEof,
    /// A byte did not begin any valid token where a value was expected.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// `true`, `false`, or `null` did not match exactly.
    #[error("invalid literal, expected {0:?}")]
    InvalidLiteral(&'static str),
    /// The number grammar (sign, digits, fraction, exponent) was violated.
    #[error("invalid number")]
    InvalidNumber,
    /// A `\` was followed by a byte that is not a valid escape character.
    #[error("invalid escape sequence")]
    InvalidEscape,
    /// A `\uXXXX` escape decoded to a value that cannot stand alone (a lone
    /// surrogate, handled separately, or the reserved `\u0000` value).
    #[error("invalid unicode escape \\u{0:04X}")]
    InvalidUnicodeEscape(u32),
    /// A high surrogate was not followed by a matching low surrogate, or a
    /// low surrogate appeared without a preceding high surrogate.
    #[error("lone UTF-16 surrogate \\u{0:04X}")]
    LoneSurrogate(u32),
    /// An array or object had a comma immediately before its closing bracket.
    #[error("trailing comma")]
    TrailingComma,
    /// Entering an array or object would exceed [`crate::ParserOptions::max_depth`].
    #[error("nesting limit of {0} exceeded")]
    NestingLimitExceeded(usize),
    /// Non-whitespace bytes followed a complete value and full consumption
    /// was required.
    #[error("trailing data after value")]
    TrailingData,
    /// The input contained no value at all (only whitespace, or nothing).
    #[error("empty input")]
    EmptyInput,
}

thread_local! {
    // Per-thread error cursor, mirroring spec §6's "single query returns a
    // pointer into the last-parsed buffer" external interface. This is a
    // compatibility shim only: every parse entry point also returns its
    // error directly via `Result`, which is the interface callers should
    // actually use. Kept for parity with the C-style contract described in
    // spec §9 ("the thread-local fallback remains acceptable for a C-style
    // compatibility layer").
    static LAST_PARSE_ERROR: Cell<Option<ParseError>> = const { Cell::new(None) };
}

pub(crate) fn record_last_error(err: &ParseError) {
    LAST_PARSE_ERROR.with(|cell| cell.set(Some(err.clone())));
}

pub(crate) fn clear_last_error() {
    LAST_PARSE_ERROR.with(|cell| cell.set(None));
}

/// Returns the error recorded by the most recent failed parse on the calling
/// thread, or `None` if the last parse on this thread succeeded (or no parse
/// has run yet).
///
/// Prefer matching on the `Result` returned by [`crate::parse`] directly;
/// this exists only for callers porting code written against a global
/// error-cursor API.
#[must_use]
pub fn last_parse_error() -> Option<ParseError> {
    LAST_PARSE_ERROR.with(|cell| {
        let v = cell.take();
        cell.set(v.clone());
        v
    })
}

/// Failure modes for applying an RFC 6902 JSON Patch, matching the numeric
/// status discriminants described in spec §4.5 / §7.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The patch document's top level was not a JSON array.
    #[error("patch document must be an array of operations")]
    NotAnArray,
    /// The operation at the given index is missing a field its `op` requires
    /// (`value`, `path`, or `from`).
    #[error("operation {0} is missing required field {1:?}")]
    MissingOperand(usize, &'static str),
    /// The operation at the given index named an `op` other than `add`,
    /// `remove`, `replace`, `move`, `copy`, or `test`.
    #[error("operation {0} has unknown \"op\" value {1:?}")]
    InvalidOp(usize, String),
    /// The operation at the given index referenced a `path` or `from`
    /// pointer that does not resolve against the document.
    #[error("operation {0} path {1:?} does not resolve")]
    MissingPath(usize, String),
    /// The `test` operation at the given index found its target not
    /// structurally equal to the expected value.
    #[error("operation {0} \"test\" failed: values are not equal")]
    TestFailed(usize),
    /// The operation at the given index named a `path` or `from` string that
    /// is not syntactically a valid JSON Pointer.
    #[error("operation {0} path {1:?} is not a valid pointer")]
    InvalidPointer(usize, String),
}

/// Errors raised while parsing an RFC 6901 JSON Pointer's raw text.
///
/// Resolving a parsed [`crate::Pointer`] against a [`crate::Value`] (stepping
/// through array indices and object keys) is a separate, fallible-by-absence
/// operation: a token that names no member, steps past the end of an array,
/// or descends into a scalar simply means the pointer doesn't resolve, so
/// those call sites return `Option`, not this type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PointerError {
    /// The raw pointer text was non-empty and did not start with `/`.
    #[error("pointer must be empty or start with '/'")]
    InvalidSyntax,
}

/// Raised when a deep duplication (patch `copy`, or explicit
/// [`crate::Value::duplicate`]) exceeds the configured recursion limit,
/// matching spec §3's "circular-reference limit" defence.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("duplication depth limit of {0} exceeded")]
pub struct DuplicationLimitExceeded(
    /// The configured [`crate::DuplicateOptions::max_depth`] that was exceeded.
    pub usize,
);
