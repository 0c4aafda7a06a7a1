//! Number parsing and formatting.
//!
//! Parsing implements spec §4.1's grammar ("longest prefix of
//! `[-+0-9.eE]`") validated against RFC 8259's stricter production (no
//! leading zeros, a digit required after `.` and after `e`/`E`). Formatting
//! implements spec §4.2's two-stage `%1.15g` / `%1.17g` round-trip strategy
//! verbatim, rather than leaning on `f64`'s `Display` shortest-round-trip
//! formatting, so that the crate's number text matches what spec §8's
//! testable properties describe byte-for-byte in spirit (shortest precision
//! that round-trips, falling back to 17 digits).

use crate::error::ParseErrorKind;

/// A parsed JSON number: the `f64` the grammar denotes, plus an `i64`
/// projection saturated to its range (spec §3: "a 64-bit IEEE-754 double plus
/// a clamped integer projection").
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number {
    value: f64,
    int_projection: i64,
}

impl Number {
    /// Construct a `Number` from an `f64`, computing its saturated `i64`
    /// projection.
    #[must_use]
    pub fn from_f64(value: f64) -> Self {
        #[allow(clippy::cast_possible_truncation)]
        let int_projection = if value.is_nan() {
            0
        } else if value >= i64::MAX as f64 {
            i64::MAX
        } else if value <= i64::MIN as f64 {
            i64::MIN
        } else {
            value as i64
        };
        Self {
            value,
            int_projection,
        }
    }

    /// The underlying double.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// The saturated `i64` projection of the double.
    #[must_use]
    pub fn int_projection(&self) -> i64 {
        self.int_projection
    }
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl From<i64> for Number {
    fn from(value: i64) -> Self {
        #[allow(clippy::cast_precision_loss)]
        Self {
            value: value as f64,
            int_projection: value,
        }
    }
}

/// Scans the longest valid RFC 8259 number at the start of `bytes`, returning
/// the decoded double and the number of bytes consumed.
///
/// `allow_leading_plus` relaxes the grammar to also accept a leading `+`
/// (spec §9's open question; off by default, see
/// [`crate::ParserOptions::allow_leading_plus`]).
pub(crate) fn scan_number(
    bytes: &[u8],
    allow_leading_plus: bool,
) -> Result<(f64, usize), ParseErrorKind> {
    let mut i = 0usize;
    let len = bytes.len();

    if i < len && (bytes[i] == b'-' || (allow_leading_plus && bytes[i] == b'+')) {
        i += 1;
    }

    let int_start = i;
    if i < len && bytes[i] == b'0' {
        i += 1;
    } else if i < len && bytes[i].is_ascii_digit() {
        while i < len && bytes[i].is_ascii_digit() {
            i += 1;
        }
    } else {
        return Err(ParseErrorKind::InvalidNumber);
    }
    if i == int_start {
        return Err(ParseErrorKind::InvalidNumber);
    }

    if i < len && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == frac_start {
            return Err(ParseErrorKind::InvalidNumber);
        }
        i = j;
    }

    if i < len && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < len && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < len && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j == exp_digits_start {
            return Err(ParseErrorKind::InvalidNumber);
        }
        i = j;
    }

    // Locale-independent parse: the scanned lexeme only ever contains ASCII
    // digits, '-', '+', '.', 'e'/'E', so Rust's `str::parse::<f64>` (which
    // itself never consults platform locale) is exactly the "locally-written
    // decimal parser ... using a locale-independent '.' decimal separator"
    // spec §4.1 calls for.
    let lexeme = std::str::from_utf8(&bytes[..i]).map_err(|_| ParseErrorKind::InvalidNumber)?;
    let value = lexeme.parse::<f64>().map_err(|_| ParseErrorKind::InvalidNumber)?;
    Ok((value, i))
}

/// Formats a double as compact JSON number text, following spec §4.2.
///
/// - Non-finite values (`NaN`, `±∞`) format as `"null"`.
/// - A value exactly equal to its `i64` projection formats as that integer.
/// - Otherwise, try 15 significant digits (`%1.15g`); if reparsing that text
///   does not reproduce the original bits, fall back to 17 significant
///   digits (`%1.17g`), which always round-trips an IEEE-754 binary64.
#[must_use]
pub fn format_number(n: Number) -> String {
    if !n.value.is_finite() {
        return "null".to_string();
    }

    #[allow(clippy::cast_precision_loss)]
    if n.value == n.int_projection as f64 && n.value.abs() < 1e18 {
        return n.int_projection.to_string();
    }

    let short = format_g(n.value, 15);
    if short.parse::<f64>() == Ok(n.value) {
        return short;
    }
    format_g(n.value, 17)
}

/// Formats `value` with at most `sig_digits` significant digits, switching
/// between fixed and scientific notation the way C's `%g` does, and
/// stripping insignificant trailing zeros. The decimal separator is always
/// `.`, matching spec §4.2's "decimal separator is forced to `.` regardless
/// of the host formatting locale."
fn format_g(value: f64, sig_digits: usize) -> String {
    if value == 0.0 {
        return if value.is_sign_negative() {
            "-0".to_string()
        } else {
            "0".to_string()
        };
    }

    let negative = value.is_sign_negative();
    let magnitude = value.abs();

    // Scientific form with `sig_digits - 1` fractional digits gives us the
    // mantissa and decimal exponent in one shot.
    let sci = format!("{:.*e}", sig_digits - 1, magnitude);
    let (mantissa_str, exp_str) = sci.split_once('e').expect("`{:e}` always contains 'e'");
    let exponent: i32 = exp_str.parse().expect("exponent is always a valid integer");

    let mantissa_digits: String = mantissa_str.chars().filter(|c| *c != '.').collect();

    let body = if exponent < -4 || exponent >= i32::try_from(sig_digits).unwrap_or(i32::MAX) {
        format_scientific(&mantissa_digits, exponent)
    } else {
        format_fixed(&mantissa_digits, exponent)
    };

    if negative {
        format!("-{body}")
    } else {
        body
    }
}

fn trim_trailing_zeros(digits: &str) -> &str {
    digits.trim_end_matches('0')
}

fn format_scientific(digits: &str, exponent: i32) -> String {
    let first = &digits[..1];
    let rest = trim_trailing_zeros(&digits[1..]);
    let mantissa = if rest.is_empty() {
        first.to_string()
    } else {
        format!("{first}.{rest}")
    };
    if exponent < 0 {
        format!("{mantissa}e-{:02}", -exponent)
    } else {
        format!("{mantissa}e+{exponent:02}")
    }
}

fn format_fixed(digits: &str, exponent: i32) -> String {
    // `digits` holds the significant digits with an implicit decimal point
    // just after the first digit, scaled by `10^exponent`.
    if exponent >= 0 {
        #[allow(clippy::cast_sign_loss)]
        let exponent = exponent as usize;
        if exponent + 1 >= digits.len() {
            let mut int_part = digits.to_string();
            int_part.push_str(&"0".repeat(exponent + 1 - digits.len()));
            int_part
        } else {
            let (int_part, frac_part) = digits.split_at(exponent + 1);
            let frac_part = trim_trailing_zeros(frac_part);
            if frac_part.is_empty() {
                int_part.to_string()
            } else {
                format!("{int_part}.{frac_part}")
            }
        }
    } else {
        #[allow(clippy::cast_sign_loss)]
        let zeros = (-exponent - 1) as usize;
        let frac = format!("{}{}", "0".repeat(zeros), digits);
        let frac = trim_trailing_zeros(&frac);
        if frac.is_empty() {
            "0".to_string()
        } else {
            format!("0.{frac}")
        }
    }
}
