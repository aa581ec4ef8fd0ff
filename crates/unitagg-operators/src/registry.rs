//! Name -> directive factory.
//!
//! `create` returns a bound, initialized instance so the host never sees a
//! half-configured directive.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::aggregate_stats::{self, AggregateStats};
use crate::rename::{self, Rename};
use crate::traits::{Directive, DirectiveError};

type Factory = fn() -> Box<dyn Directive>;

pub struct Registry {
    factories: BTreeMap<&'static str, Factory>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Registry with the built-in directives.
    pub fn new() -> Self {
        let mut reg = Self {
            factories: BTreeMap::new(),
        };
        reg.register(aggregate_stats::NAME, || -> Box<dyn Directive> {
            Box::new(AggregateStats::default())
        });
        reg.register(rename::NAME, || -> Box<dyn Directive> {
            Box::new(Rename::default())
        });
        reg
    }

    /// Add or replace a factory.
    pub fn register(&mut self, name: &'static str, factory: Factory) {
        self.factories.insert(name, factory);
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.factories.keys().copied()
    }

    pub fn create(&self, name: &str, args: &Value) -> Result<Box<dyn Directive>, DirectiveError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| DirectiveError::Configuration(format!("unknown directive '{name}'")))?;

        let mut directive = factory();
        let bound = directive.define().bind(args)?;
        directive.initialize(&bound)?;
        Ok(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_are_registered() {
        let reg = Registry::new();
        assert_eq!(reg.names().collect::<Vec<_>>(), vec!["aggregate-stats", "rename"]);
    }

    #[test]
    fn create_binds_and_initializes() {
        let reg = Registry::new();
        let d = reg
            .create("rename", &json!({ "old": "a", "new": "b" }))
            .unwrap();
        assert_eq!(d.name(), "rename");
        assert_eq!(d.lineage().relations.len(), 1);
    }

    #[test]
    fn unknown_directive_and_bad_args_fail() {
        let reg = Registry::new();
        assert!(matches!(
            reg.create("explode", &json!({})),
            Err(DirectiveError::Configuration(_))
        ));
        assert!(matches!(
            reg.create("aggregate-stats", &json!({ "byteSizeColumn": "size" })),
            Err(DirectiveError::Configuration(_))
        ));
    }
}
