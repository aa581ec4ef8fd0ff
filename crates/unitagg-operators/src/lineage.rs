//! Column-level lineage descriptors.

use serde::{Deserialize, Serialize};

/// Columns in `sources` feed columns in `targets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub sources: Vec<String>,
    pub targets: Vec<String>,
}

/// What a configured directive does to columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mutation {
    pub readable: String,
    pub relations: Vec<Relation>,
}

impl Mutation {
    pub fn new(readable: impl Into<String>) -> Self {
        Self {
            readable: readable.into(),
            relations: vec![],
        }
    }

    pub fn relation<S, T>(mut self, sources: S, targets: T) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        self.relations.push(Relation {
            sources: sources.into_iter().map(Into::into).collect(),
            targets: targets.into_iter().map(Into::into).collect(),
        });
        self
    }
}
