//! Supported units and their relation to the canonical unit.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ArgumentError, QuantityKind};

/// Binary byte units. Canonical unit is `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ByteUnit {
    B,
    KB,
    MB,
    GB,
    TB,
    PB,
}

impl ByteUnit {
    pub const ALL: [ByteUnit; 6] = [
        ByteUnit::B,
        ByteUnit::KB,
        ByteUnit::MB,
        ByteUnit::GB,
        ByteUnit::TB,
        ByteUnit::PB,
    ];

    /// `k` in `1024^k`.
    pub fn exponent(self) -> u32 {
        match self {
            ByteUnit::B => 0,
            ByteUnit::KB => 1,
            ByteUnit::MB => 2,
            ByteUnit::GB => 3,
            ByteUnit::TB => 4,
            ByteUnit::PB => 5,
        }
    }

    /// Bytes per unit. `PB` is 2^50, well inside `i64`.
    pub fn factor(self) -> i64 {
        1i64 << (10 * self.exponent())
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ByteUnit::B => "B",
            ByteUnit::KB => "KB",
            ByteUnit::MB => "MB",
            ByteUnit::GB => "GB",
            ByteUnit::TB => "TB",
            ByteUnit::PB => "PB",
        }
    }

    /// Case-insensitive lookup.
    pub fn parse(s: &str) -> Option<Self> {
        ByteUnit::ALL
            .into_iter()
            .find(|u| u.symbol().eq_ignore_ascii_case(s))
    }

    /// Express canonical bytes in this unit.
    pub fn from_bytes(self, bytes: i64) -> f64 {
        bytes as f64 / self.factor() as f64
    }
}

impl FromStr for ByteUnit {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ByteUnit::parse(s.trim()).ok_or_else(|| ArgumentError::UnknownUnit {
            kind: QuantityKind::ByteSize,
            unit: s.to_string(),
        })
    }
}

impl fmt::Display for ByteUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Time units. Canonical unit is milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TimeUnit {
    Nanos,
    Micros,
    Millis,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Nanos,
        TimeUnit::Micros,
        TimeUnit::Millis,
        TimeUnit::Seconds,
        TimeUnit::Minutes,
        TimeUnit::Hours,
        TimeUnit::Days,
    ];

    /// Display symbol. Micros renders as `μ`; `u` is accepted on input.
    pub fn symbol(self) -> &'static str {
        match self {
            TimeUnit::Nanos => "n",
            TimeUnit::Micros => "μ",
            TimeUnit::Millis => "ms",
            TimeUnit::Seconds => "s",
            TimeUnit::Minutes => "m",
            TimeUnit::Hours => "h",
            TimeUnit::Days => "d",
        }
    }

    /// Case-insensitive lookup. Accepts `u` and the micro sign `µ` for micros.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "n" => Some(TimeUnit::Nanos),
            "μ" | "µ" | "u" => Some(TimeUnit::Micros),
            "ms" => Some(TimeUnit::Millis),
            "s" => Some(TimeUnit::Seconds),
            "m" => Some(TimeUnit::Minutes),
            "h" => Some(TimeUnit::Hours),
            "d" => Some(TimeUnit::Days),
            _ => None,
        }
    }

    /// Convert an amount in this unit to (fractional) milliseconds.
    pub fn to_millis(self, amount: f64) -> f64 {
        match self {
            TimeUnit::Nanos => amount / 1_000_000.0,
            TimeUnit::Micros => amount / 1_000.0,
            TimeUnit::Millis => amount,
            TimeUnit::Seconds => amount * 1_000.0,
            TimeUnit::Minutes => amount * 60_000.0,
            TimeUnit::Hours => amount * 3_600_000.0,
            TimeUnit::Days => amount * 86_400_000.0,
        }
    }

    /// Express canonical milliseconds in this unit.
    pub fn from_millis(self, millis: i64) -> f64 {
        let millis = millis as f64;
        match self {
            TimeUnit::Nanos => millis * 1_000_000.0,
            TimeUnit::Micros => millis * 1_000.0,
            TimeUnit::Millis => millis,
            TimeUnit::Seconds => millis / 1_000.0,
            TimeUnit::Minutes => millis / 60_000.0,
            TimeUnit::Hours => millis / 3_600_000.0,
            TimeUnit::Days => millis / 86_400_000.0,
        }
    }
}

impl FromStr for TimeUnit {
    type Err = ArgumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::parse(s.trim()).ok_or_else(|| ArgumentError::UnknownUnit {
            kind: QuantityKind::TimeDuration,
            unit: s.to_string(),
        })
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}
