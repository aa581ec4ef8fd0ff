//! Validated, immutable quantity values that remember how they were written.
//!
//! Prefer `parse::parse_*` in per-row code; these types keep the literal and
//! unit around, which is only useful to grammar-level consumers.

use std::fmt;
use std::str::FromStr;

use serde_json::json;
use unitagg_core::token::{Token, TokenType};

use crate::error::{ArgumentError, ParseError};
use crate::parse::{scan_byte_size, scan_time_duration};
use crate::unit::{ByteUnit, TimeUnit};

/// A byte size such as `"1.5MB"`, canonicalized to bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct ByteSize {
    original: String,
    numeric_value: f64,
    unit: ByteUnit,
    bytes: i64,
}

impl ByteSize {
    pub fn new(text: &str) -> Result<Self, ParseError> {
        let scanned = scan_byte_size(text)?;
        Ok(Self {
            original: text.to_string(),
            numeric_value: scanned.numeric_value,
            unit: scanned.unit,
            bytes: scanned.canonical,
        })
    }

    pub fn bytes(&self) -> i64 {
        self.bytes
    }

    pub fn unit(&self) -> ByteUnit {
        self.unit
    }

    /// The number as written, before unit scaling.
    pub fn numeric_value(&self) -> f64 {
        self.numeric_value
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Approximate value in `target` (e.g. `"KB"`). Does not re-check magnitude.
    pub fn convert_to(&self, target: &str) -> Result<f64, ArgumentError> {
        let unit: ByteUnit = target.parse()?;
        Ok(unit.from_bytes(self.bytes))
    }
}

impl FromStr for ByteSize {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ByteSize::new(s)
    }
}

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Token for ByteSize {
    fn token_type(&self) -> TokenType {
        TokenType::ByteSize
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "type": TokenType::ByteSize.as_str(),
            "value": self.original,
            "bytes": self.bytes,
            "unit": self.unit.symbol(),
            "numericValue": self.numeric_value,
        })
    }
}

/// A time duration such as `"250ms"`, canonicalized to milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeDuration {
    original: String,
    numeric_value: f64,
    unit: TimeUnit,
    millis: i64,
}

impl TimeDuration {
    pub fn new(text: &str) -> Result<Self, ParseError> {
        let scanned = scan_time_duration(text)?;
        Ok(Self {
            original: text.to_string(),
            numeric_value: scanned.numeric_value,
            unit: scanned.unit,
            millis: scanned.canonical,
        })
    }

    pub fn millis(&self) -> i64 {
        self.millis
    }

    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    pub fn numeric_value(&self) -> f64 {
        self.numeric_value
    }

    pub fn as_str(&self) -> &str {
        &self.original
    }

    /// Approximate value in `target` (e.g. `"s"`). Does not re-check magnitude.
    pub fn convert_to(&self, target: &str) -> Result<f64, ArgumentError> {
        let unit: TimeUnit = target.parse()?;
        Ok(unit.from_millis(self.millis))
    }
}

impl FromStr for TimeDuration {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeDuration::new(s)
    }
}

impl fmt::Display for TimeDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl Token for TimeDuration {
    fn token_type(&self) -> TokenType {
        TokenType::TimeDuration
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "type": TokenType::TimeDuration.as_str(),
            "value": self.original,
            "milliseconds": self.millis,
            "unit": self.unit.symbol(),
            "numericValue": self.numeric_value,
        })
    }
}
