//! Canonical quantity -> display text.
//!
//! Output is lossy (one or two decimals) and is not meant to parse back to the
//! same canonical value.

use crate::error::{ArgumentError, QuantityKind};
use crate::unit::{ByteUnit, TimeUnit};

const SECOND: i64 = 1_000;
const MINUTE: i64 = 60 * SECOND;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Human-readable byte size with an automatically chosen unit.
///
/// `1023 -> "1023B"`, `1024 -> "1.0KB"`, `1536 * 1024 -> "1.5MB"`. Units stop at
/// `PB`; larger values are expressed as a multiple of petabytes.
pub fn format_byte_size(bytes: i64) -> Result<String, ArgumentError> {
    check_non_negative(bytes, QuantityKind::ByteSize)?;

    if bytes < ByteUnit::KB.factor() {
        return Ok(format!("{bytes}B"));
    }

    let unit = ByteUnit::ALL
        .into_iter()
        .rev()
        .find(|u| u.factor() <= bytes)
        .unwrap_or(ByteUnit::B);

    Ok(fixed(unit.from_bytes(bytes), 1, unit.symbol()))
}

/// Human-readable duration with an automatically chosen unit.
///
/// Zero renders as `"1ms"` since sub-millisecond values are not representable.
pub fn format_time_duration(millis: i64) -> Result<String, ArgumentError> {
    check_non_negative(millis, QuantityKind::TimeDuration)?;

    let text = match millis {
        0 => "1ms".to_string(),
        m if m < SECOND => format!("{m}ms"),
        m if m < MINUTE => fixed(TimeUnit::Seconds.from_millis(m), 1, "s"),
        m if m < HOUR => fixed(TimeUnit::Minutes.from_millis(m), 1, "m"),
        m if m < DAY => fixed(TimeUnit::Hours.from_millis(m), 1, "h"),
        m => fixed(TimeUnit::Days.from_millis(m), 1, "d"),
    };
    Ok(text)
}

/// Bytes expressed in a fixed unit with two decimals, e.g. `"1.99MB"`.
pub fn format_byte_size_in(bytes: i64, unit: ByteUnit) -> Result<String, ArgumentError> {
    check_non_negative(bytes, QuantityKind::ByteSize)?;
    Ok(fixed(unit.from_bytes(bytes), 2, unit.symbol()))
}

/// Milliseconds expressed in a fixed unit with two decimals, e.g. `"4.00s"`.
pub fn format_time_duration_in(millis: i64, unit: TimeUnit) -> Result<String, ArgumentError> {
    check_non_negative(millis, QuantityKind::TimeDuration)?;
    Ok(fixed(unit.from_millis(millis), 2, unit.symbol()))
}

fn check_non_negative(value: i64, kind: QuantityKind) -> Result<(), ArgumentError> {
    if value < 0 {
        return Err(ArgumentError::Negative { kind, value });
    }
    Ok(())
}

/// Fixed-point rendering that rounds half-up on the shortest decimal form of
/// `value`, so `1.005` gives `"1.01"` even though the nearest double is just
/// below the tie. `value` must be finite and non-negative.
fn fixed(value: f64, decimals: usize, suffix: &str) -> String {
    let shortest = value.to_string();
    let (whole, frac) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = whole
        .bytes()
        .chain(frac.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();
    if matches!(frac.as_bytes().get(decimals), Some(d) if *d >= b'5') {
        increment(&mut digits);
    }

    let (int_digits, frac_digits) = digits.split_at(digits.len() - decimals);
    let mut out: String = int_digits.iter().map(|&d| d as char).collect();
    if decimals > 0 {
        out.push('.');
        out.extend(frac_digits.iter().map(|&d| d as char));
    }
    out.push_str(suffix);
    out
}

/// Add one to an ASCII decimal digit string, growing it on carry-out.
fn increment(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, b'1');
}
