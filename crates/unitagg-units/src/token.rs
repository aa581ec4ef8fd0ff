//! Canonical-only tokens: a bare count of bytes or milliseconds.

use serde::Serialize;
use unitagg_core::token::{Token, TokenType};

use crate::error::{ArgumentError, QuantityKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ByteSizeToken(i64);

impl ByteSizeToken {
    pub fn new(bytes: i64) -> Result<Self, ArgumentError> {
        if bytes < 0 {
            return Err(ArgumentError::Negative {
                kind: QuantityKind::ByteSize,
                value: bytes,
            });
        }
        Ok(Self(bytes))
    }

    pub fn bytes(&self) -> i64 {
        self.0
    }
}

impl Token for ByteSizeToken {
    fn token_type(&self) -> TokenType {
        TokenType::ByteSize
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TimeDurationToken(i64);

impl TimeDurationToken {
    pub fn new(millis: i64) -> Result<Self, ArgumentError> {
        if millis < 0 {
            return Err(ArgumentError::Negative {
                kind: QuantityKind::TimeDuration,
                value: millis,
            });
        }
        Ok(Self(millis))
    }

    pub fn millis(&self) -> i64 {
        self.0
    }
}

impl Token for TimeDurationToken {
    fn token_type(&self) -> TokenType {
        TokenType::TimeDuration
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::Value::from(self.0)
    }
}
