//! Argument shapes (`UsageDefinition`) and bound argument values (`Arguments`).
//!
//! Raw arguments arrive as a JSON object, e.g.
//! `{"byteSizeColumn": "size", "sizeOutputUnit": "GB"}`. Binding checks them
//! against the directive's definition before `initialize` sees them.

use serde::Serialize;
use serde_json::{Map, Value};
use unitagg_core::token::TokenType;

use crate::traits::DirectiveError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenDefinition {
    pub name: String,
    pub token_type: TokenType,
    pub optional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageDefinition {
    directive: String,
    tokens: Vec<TokenDefinition>,
}

impl UsageDefinition {
    pub fn builder(directive: &str) -> UsageBuilder {
        UsageBuilder {
            directive: directive.to_string(),
            tokens: vec![],
        }
    }

    pub fn directive_name(&self) -> &str {
        &self.directive
    }

    /// Tokens in declaration order.
    pub fn tokens(&self) -> &[TokenDefinition] {
        &self.tokens
    }

    /// Check `raw` against this definition and produce bound arguments.
    ///
    /// `raw` must be a JSON object (or `null` when nothing is required). Every
    /// required token must be present, every value must be a string, and
    /// undeclared names are rejected.
    pub fn bind(&self, raw: &Value) -> Result<Arguments, DirectiveError> {
        let empty = Map::new();
        let object = match raw {
            Value::Object(map) => map,
            Value::Null => &empty,
            other => {
                return Err(DirectiveError::Configuration(format!(
                    "{}: arguments must be an object, got {}",
                    self.directive, other
                )))
            }
        };

        for name in object.keys() {
            if !self.tokens.iter().any(|t| &t.name == name) {
                return Err(DirectiveError::Configuration(format!(
                    "{}: unknown argument '{}'",
                    self.directive, name
                )));
            }
        }

        let mut values = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            match object.get(&token.name) {
                None | Some(Value::Null) if token.optional => {}
                None | Some(Value::Null) => {
                    return Err(DirectiveError::Configuration(format!(
                        "{}: missing required argument '{}' ({})",
                        self.directive, token.name, token.token_type
                    )))
                }
                Some(Value::String(s)) => values.push((token.name.clone(), s.clone())),
                Some(other) => {
                    return Err(DirectiveError::Configuration(format!(
                        "{}: argument '{}' must be a string, got {}",
                        self.directive, token.name, other
                    )))
                }
            }
        }

        Ok(Arguments { values })
    }
}

pub struct UsageBuilder {
    directive: String,
    tokens: Vec<TokenDefinition>,
}

impl UsageBuilder {
    pub fn define(self, name: &str, token_type: TokenType) -> Self {
        self.push(name, token_type, false)
    }

    pub fn define_optional(self, name: &str, token_type: TokenType) -> Self {
        self.push(name, token_type, true)
    }

    fn push(mut self, name: &str, token_type: TokenType, optional: bool) -> Self {
        self.tokens.push(TokenDefinition {
            name: name.to_string(),
            token_type,
            optional,
        });
        self
    }

    pub fn build(self) -> UsageDefinition {
        UsageDefinition {
            directive: self.directive,
            tokens: self.tokens,
        }
    }
}

/// Bound argument values, in definition order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<(String, String)>,
}

impl Arguments {
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// A required argument; absent is a configuration error.
    pub fn required(&self, name: &str) -> Result<&str, DirectiveError> {
        self.get(name).ok_or_else(|| {
            DirectiveError::Configuration(format!("missing required argument '{name}'"))
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
