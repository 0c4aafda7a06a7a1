//! RFC 6901 JSON Pointer resolution.

use crate::error::PointerError;
use crate::value::Value;

/// A single decoded pointer token: either an object key or an array index
/// request (which may be the literal `"-"`, the "one past the end" marker
/// used by `add`/`append`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// An object member name, after `~1`/`~0` decoding.
    Key(String),
    /// A decimal array index without leading zeros (`"0"` is the only
    /// allowed single-zero form).
    Index(usize),
    /// The literal `"-"` token, meaning "one past the last array element."
    Dash,
}

/// A parsed RFC 6901 JSON Pointer: a sequence of `/`-separated, individually
/// decoded tokens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Pointer {
    tokens: Vec<Token>,
}

impl Pointer {
    /// The root pointer (`""`), which resolves to the document itself.
    #[must_use]
    pub fn root() -> Self {
        Self { tokens: Vec::new() }
    }

    /// Parses a raw pointer string such as `"/a~1b/~0"`.
    ///
    /// # Errors
    ///
    /// Returns [`PointerError::InvalidSyntax`] if `raw` is non-empty and does
    /// not start with `/`.
    pub fn parse(raw: &str) -> Result<Self, PointerError> {
        if raw.is_empty() {
            return Ok(Self::root());
        }
        if !raw.starts_with('/') {
            return Err(PointerError::InvalidSyntax);
        }
        let tokens = raw[1..]
            .split('/')
            .map(|segment| {
                let decoded = decode_token(segment);
                classify_token(&decoded)
            })
            .collect();
        Ok(Self { tokens })
    }

    /// Builds a pointer directly from a token sequence (used by the patch
    /// engine when splitting off a parent path).
    pub(crate) fn from_tokens(tokens: Vec<Token>) -> Self {
        Self { tokens }
    }

    /// This pointer's decoded tokens, in path order.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Whether this pointer is the empty path (`""`), which resolves to the
    /// document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.tokens.is_empty()
    }

    pub(crate) fn push_key(&mut self, key: impl Into<String>) {
        self.tokens.push(Token::Key(key.into()));
    }

    pub(crate) fn push_index(&mut self, index: usize) {
        self.tokens.push(Token::Index(index));
    }

    /// Returns a new pointer equal to `self` with `key` appended.
    #[must_use]
    pub(crate) fn joined_key(&self, key: impl Into<String>) -> Self {
        let mut p = self.clone();
        p.push_key(key);
        p
    }

    /// Returns a new pointer equal to `self` with `index` appended.
    #[must_use]
    pub(crate) fn joined_index(&self, index: usize) -> Self {
        let mut p = self.clone();
        p.push_index(index);
        p
    }

    /// Returns a new pointer equal to `self` with a trailing `-` (array
    /// append marker) appended.
    #[must_use]
    pub(crate) fn joined_dash(&self) -> Self {
        let mut p = self.clone();
        p.tokens.push(Token::Dash);
        p
    }

    /// Renders this pointer back to its RFC 6901 string form.
    #[must_use]
    pub fn to_raw_string(&self) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            out.push('/');
            match token {
                Token::Key(k) => out.push_str(&encode_token(k)),
                Token::Index(i) => out.push_str(&i.to_string()),
                Token::Dash => out.push('-'),
            }
        }
        out
    }

    /// Resolves this pointer against `root`, returning the target value or
    /// `None` if it cannot be resolved (spec §4.4: "A path that cannot be
    /// resolved returns not-found").
    #[must_use]
    pub fn resolve<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for token in &self.tokens {
            current = step(current, token)?;
        }
        Some(current)
    }

    /// Mutable counterpart of [`Pointer::resolve`].
    #[must_use]
    pub fn resolve_mut<'v>(&self, root: &'v mut Value) -> Option<&'v mut Value> {
        let mut current = root;
        for token in &self.tokens {
            current = step_mut(current, token)?;
        }
        Some(current)
    }

    /// Case-insensitive variant of [`Pointer::resolve`], which folds object
    /// key lookups with ASCII `tolower` (spec §4.3/§4.4).
    #[must_use]
    pub fn resolve_case_insensitive<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        let mut current = root;
        for token in &self.tokens {
            current = step_ci(current, token)?;
        }
        Some(current)
    }
}

fn classify_token(decoded: &str) -> Token {
    if decoded == "-" {
        Token::Dash
    } else if is_valid_array_index_literal(decoded) {
        Token::Index(decoded.parse().expect("validated decimal digits"))
    } else {
        Token::Key(decoded.to_string())
    }
}

fn is_valid_array_index_literal(s: &str) -> bool {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    s == "0" || !s.starts_with('0')
}

fn step<'v>(value: &'v Value, token: &Token) -> Option<&'v Value> {
    match (value, token) {
        (Value::Object(obj), Token::Key(k)) => obj.get(k),
        // "-" has no special meaning against an object: RFC 6901 only
        // assigns it the "nonexistent past-the-end element" meaning for
        // arrays, so here it's just the literal member name "-".
        (Value::Object(obj), Token::Dash) => obj.get("-"),
        (Value::Array(arr), Token::Index(i)) => arr.get(*i),
        (Value::Array(_), Token::Dash) => None,
        _ => None,
    }
}

fn step_mut<'v>(value: &'v mut Value, token: &Token) -> Option<&'v mut Value> {
    match (value, token) {
        (Value::Object(obj), Token::Key(k)) => obj.get_mut(k),
        (Value::Object(obj), Token::Dash) => obj.get_mut("-"),
        (Value::Array(arr), Token::Index(i)) => arr.get_mut(*i),
        _ => None,
    }
}

fn step_ci<'v>(value: &'v Value, token: &Token) -> Option<&'v Value> {
    match (value, token) {
        (Value::Object(_), Token::Key(k)) => value.get_case_insensitive(k),
        (Value::Object(_), Token::Dash) => value.get_case_insensitive("-"),
        (Value::Array(arr), Token::Index(i)) => arr.get(*i),
        _ => None,
    }
}

/// Decodes a single pointer segment: `~1` → `/`, `~0` → `~`, with `~0`
/// applied first so `"~01"` decodes to the literal key `~1` (spec §8
/// boundary behavior), not `/`.
fn decode_token(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '~' {
            match chars.peek() {
                Some('0') => {
                    out.push('~');
                    chars.next();
                }
                Some('1') => {
                    out.push('/');
                    chars.next();
                }
                _ => out.push('~'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Encodes a literal key for inclusion in a pointer string: `~` → `~0`,
/// `/` → `~1`.
fn encode_token(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '~' => out.push_str("~0"),
            '/' => out.push_str("~1"),
            _ => out.push(c),
        }
    }
    out
}

/// Finds a pointer from `root` to `target` by recursive descent, encoding
/// object keys along the way (spec §4.4's "reverse operation").
///
/// Identity is determined by address (`target` must be a sub-value reachable
/// from `root`, e.g. obtained via [`Pointer::resolve`]); structurally equal
/// but distinct values are not matched.
#[must_use]
pub fn pointer_to(root: &Value, target: &Value) -> Option<Pointer> {
    if std::ptr::eq(root, target) {
        return Some(Pointer::root());
    }
    match root {
        Value::Array(arr) => {
            for (i, child) in arr.iter().enumerate() {
                if let Some(mut p) = pointer_to(child, target) {
                    p.tokens.insert(0, Token::Index(i));
                    return Some(p);
                }
            }
            None
        }
        Value::Object(obj) => {
            for (k, child) in obj {
                if let Some(mut p) = pointer_to(child, target) {
                    p.tokens.insert(0, Token::Key(k.clone()));
                    return Some(p);
                }
            }
            None
        }
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/pointer.rs"]
mod tests;
