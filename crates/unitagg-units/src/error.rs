use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which family of quantity an error is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityKind {
    ByteSize,
    TimeDuration,
}

impl fmt::Display for QuantityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantityKind::ByteSize => f.write_str("byte size"),
            QuantityKind::TimeDuration => f.write_str("time duration"),
        }
    }
}

/// Text could not be turned into a canonical quantity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("{kind} value cannot be empty")]
    Empty { kind: QuantityKind },

    #[error("invalid {kind} format: '{input}'")]
    Format { kind: QuantityKind, input: String },

    #[error("unsupported {kind} unit: '{unit}'")]
    UnknownUnit { kind: QuantityKind, unit: String },

    #[error("{kind} must be positive: '{input}'")]
    NotPositive { kind: QuantityKind, input: String },

    #[error("{kind} value too large: '{input}'")]
    Overflow { kind: QuantityKind, input: String },
}

impl ParseError {
    pub fn kind(&self) -> QuantityKind {
        match self {
            ParseError::Empty { kind }
            | ParseError::Format { kind, .. }
            | ParseError::UnknownUnit { kind, .. }
            | ParseError::NotPositive { kind, .. }
            | ParseError::Overflow { kind, .. } => *kind,
        }
    }
}

/// Caller passed a value the API cannot accept (negative quantity, unknown unit).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArgumentError {
    #[error("{kind} cannot be negative: {value}")]
    Negative { kind: QuantityKind, value: i64 },

    #[error("unknown {kind} unit: '{unit}'")]
    UnknownUnit { kind: QuantityKind, unit: String },
}
