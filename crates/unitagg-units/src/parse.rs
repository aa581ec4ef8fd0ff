//! Text -> canonical quantity.
//!
//! Grammars (case-insensitive, surrounding whitespace allowed):
//! - byte size:     `<digits>[.<digits>] <B|KB|MB|GB|TB|PB>`
//! - time duration: `<digits>[.<digits>] <n|μ|u|ms|s|m|h|d>`
//!
//! Magnitudes are scaled in `f64` and then narrowed to `i64`.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ParseError, QuantityKind};
use crate::unit::{ByteUnit, TimeUnit};

static BYTE_SIZE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*([KMGTP]?B)\s*$")
        .expect("byte size grammar is a valid regex")
});

// `ms` is listed first so it wins over a bare `m`/`s`.
static TIME_DURATION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*([0-9]+(?:\.[0-9]+)?)\s*(ms|n|μ|µ|u|s|m|h|d)\s*$")
        .expect("time duration grammar is a valid regex")
});

/// 2^63: the first magnitude that no longer fits a non-negative `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// A quantity split into its parts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Scanned<U> {
    pub numeric_value: f64,
    pub unit: U,
    pub canonical: i64,
}

/// Parse a byte size ("1.5MB", "1 kb") into bytes.
///
/// Fractional bytes are truncated toward zero, so `"0.5B"` is accepted and
/// yields 0.
///
/// # Overflow
///
/// A scaled magnitude of 2^63 bytes or more is rejected. This is the range in
/// which a 64-bit conversion turns negative; nothing tighter is enforced.
pub fn parse_byte_size(text: &str) -> Result<i64, ParseError> {
    scan_byte_size(text).map(|s| s.canonical)
}

/// Parse a time duration ("250ms", "1.5h") into milliseconds.
///
/// Conversion rounds half away from zero: `"1500μ"` is 2ms, `"400u"` is 0ms.
/// Overflow follows the same 2^63 bound as [`parse_byte_size`].
pub fn parse_time_duration(text: &str) -> Result<i64, ParseError> {
    scan_time_duration(text).map(|s| s.canonical)
}

pub(crate) fn scan_byte_size(text: &str) -> Result<Scanned<ByteUnit>, ParseError> {
    let kind = QuantityKind::ByteSize;
    let (numeric_value, unit) = split(&BYTE_SIZE_PATTERN, text, kind)?;
    let unit = ByteUnit::parse(unit).ok_or_else(|| ParseError::UnknownUnit {
        kind,
        unit: unit.to_string(),
    })?;

    let scaled = (numeric_value * unit.factor() as f64).trunc();
    let canonical = narrow(scaled, text, kind)?;

    Ok(Scanned {
        numeric_value,
        unit,
        canonical,
    })
}

pub(crate) fn scan_time_duration(text: &str) -> Result<Scanned<TimeUnit>, ParseError> {
    let kind = QuantityKind::TimeDuration;
    let (numeric_value, unit) = split(&TIME_DURATION_PATTERN, text, kind)?;
    let unit = TimeUnit::parse(unit).ok_or_else(|| ParseError::UnknownUnit {
        kind,
        unit: unit.to_string(),
    })?;

    // f64::round is half away from zero.
    let scaled = unit.to_millis(numeric_value).round();
    let canonical = narrow(scaled, text, kind)?;

    Ok(Scanned {
        numeric_value,
        unit,
        canonical,
    })
}

/// Match the grammar and return `(number, unit text)`. Rejects non-positive numbers.
fn split<'t>(
    pattern: &Regex,
    text: &'t str,
    kind: QuantityKind,
) -> Result<(f64, &'t str), ParseError> {
    if text.trim().is_empty() {
        return Err(ParseError::Empty { kind });
    }

    let format_err = || ParseError::Format {
        kind,
        input: text.to_string(),
    };

    let caps = pattern.captures(text).ok_or_else(format_err)?;
    let (Some(number), Some(unit)) = (caps.get(1), caps.get(2)) else {
        return Err(format_err());
    };
    let number: f64 = number.as_str().parse().map_err(|_| format_err())?;

    if number <= 0.0 {
        return Err(ParseError::NotPositive {
            kind,
            input: text.to_string(),
        });
    }

    Ok((number, unit.as_str()))
}

fn narrow(scaled: f64, text: &str, kind: QuantityKind) -> Result<i64, ParseError> {
    // Also catches +inf from absurdly long digit strings.
    if !(scaled < I64_LIMIT) {
        return Err(ParseError::Overflow {
            kind,
            input: text.to_string(),
        });
    }
    Ok(scaled as i64)
}
