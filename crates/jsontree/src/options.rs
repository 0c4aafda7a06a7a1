//! Configuration knobs for parsing, serializing, minifying, and duplicating
//! documents.
//!
//! These mirror the "Configuration knobs" of spec §6: two depth limits
//! (nesting, duplication) plus the small set of permissive-parsing and
//! formatting toggles called out across §4 and §9.

/// Options controlling [`crate::parse`] and [`crate::parse_with_options`].
///
/// # Default
///
/// All permissive toggles default to `false`; `max_depth` defaults to the
/// spec's default nesting limit of 1000.
///
/// # Examples
///
/// ```rust
/// use jsontree::ParserOptions;
///
/// let opts = ParserOptions {
///     allow_leading_plus: true,
///     ..Default::default()
/// };
/// assert!(jsontree::parse_with_options(b"+1", &opts).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserOptions {
    /// Maximum nesting depth of arrays/objects the parser will accept before
    /// failing with [`crate::ParseErrorKind::NestingLimitExceeded`].
    ///
    /// # Default
    ///
    /// `1000`
    pub max_depth: usize,

    /// Whether a leading `+` is accepted on numbers (`+1`, `+1.5e3`).
    ///
    /// RFC 8259 forbids this; spec §9 leaves it as an open question whether
    /// to keep the source implementation's permissiveness. This crate
    /// defaults to strict RFC 8259 behavior and exposes the permissive mode
    /// as an opt-in.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_leading_plus: bool,

    /// Whether the entire input must be consumed (after trailing whitespace)
    /// for the parse to succeed.
    ///
    /// When `true`, any non-whitespace bytes following the first complete
    /// value cause [`crate::ParseErrorKind::TrailingData`]. When `false`,
    /// [`crate::parse_with_options`] stops after the first value and the
    /// caller can inspect how many bytes were consumed via
    /// [`crate::parse_prefix`].
    ///
    /// # Default
    ///
    /// `true`
    pub require_full_consumption: bool,

    #[cfg(any(test, feature = "fuzzing"))]
    /// Panic on syntax errors instead of returning them.
    ///
    /// Enabled only in test and fuzzing builds so a fuzz target crashes with
    /// a backtrace at the failing input rather than swallowing it as `Ok`.
    pub panic_on_error: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            allow_leading_plus: false,
            require_full_consumption: true,
            #[cfg(any(test, feature = "fuzzing"))]
            panic_on_error: false,
        }
    }
}

/// Output layout for [`crate::serialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// No extraneous whitespace; array items separated by `,`.
    #[default]
    Compact,
    /// Each nesting level indented by its depth in horizontal tabs; a single
    /// tab follows `:`; array items separated by `, `.
    Indented,
}

/// Options controlling [`crate::serialize`] and [`crate::serialize_into`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SerializeOptions {
    /// Compact or indented output.
    pub format: Format,
}

/// Options controlling [`crate::minify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinifyOptions {
    /// Whether to additionally strip `//line` and `/* block */` comments.
    ///
    /// This is a documented extension: RFC 8259 has no comment grammar.
    /// Spec §4.8 / §9 calls this out explicitly as a convenience for
    /// JSON-with-comments inputs, not part of the standard.
    ///
    /// # Default
    ///
    /// `false`
    pub strip_comments: bool,
}

impl Default for MinifyOptions {
    fn default() -> Self {
        Self {
            strip_comments: false,
        }
    }
}

/// Options controlling [`crate::Value::duplicate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DuplicateOptions {
    /// Maximum recursion depth before duplication fails with
    /// [`crate::DuplicationLimitExceeded`]. Defends against hand-built,
    /// pathologically deep trees the same way spec §3's "circular-reference
    /// limit" defends against hand-built cyclic graphs.
    ///
    /// # Default
    ///
    /// `10_000`
    pub max_depth: usize,
}

impl Default for DuplicateOptions {
    fn default() -> Self {
        Self { max_depth: 10_000 }
    }
}
