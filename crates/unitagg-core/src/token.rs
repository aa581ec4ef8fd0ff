//! Token model shared by directive usage definitions and quantity values.
//!
//! A token is a typed argument as the directive grammar sees it. The grammar
//! itself lives outside this workspace; only the shapes are defined here.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TokenType {
    ColumnName,
    Text,
    ByteSize,
    TimeDuration,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::ColumnName => "COLUMN_NAME",
            TokenType::Text => "TEXT",
            TokenType::ByteSize => "BYTE_SIZE",
            TokenType::TimeDuration => "TIME_DURATION",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed, typed argument value.
pub trait Token {
    fn token_type(&self) -> TokenType;

    /// JSON form used when directives are described to the host.
    fn to_json(&self) -> serde_json::Value;
}
