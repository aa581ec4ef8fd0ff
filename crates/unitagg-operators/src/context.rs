//! Per-invocation run context: phase, run-scoped store, metrics sink.
//!
//! # Host contract
//!
//! A `TransientStore` belongs to exactly one pipeline run. The host creates it
//! when the run starts, lends it to one invocation at a time, and drops it when
//! the run ends. Within a process the `&mut` borrow enforces the single
//! mutator; hosts that share a store across processes must serialize access
//! themselves. Nothing here locks, persists, or rolls back.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::MetricsSink;

/// Whether this invocation must produce the run's output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// More batches follow; aggregating directives emit nothing.
    Intermediate,
    /// Last invocation of the run.
    Terminal,
}

impl Phase {
    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Terminal)
    }
}

/// Run-scoped key/value counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransientStore {
    vars: BTreeMap<String, i64>,
}

impl TransientStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<i64> {
        self.vars.get(key).copied()
    }

    pub fn set(&mut self, key: impl Into<String>, value: i64) {
        self.vars.insert(key.into(), value);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

pub struct ExecutorContext<'a> {
    phase: Phase,
    store: &'a mut TransientStore,
    metrics: &'a dyn MetricsSink,
}

impl<'a> ExecutorContext<'a> {
    pub fn new(phase: Phase, store: &'a mut TransientStore, metrics: &'a dyn MetricsSink) -> Self {
        Self {
            phase,
            store,
            metrics,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn store(&self) -> &TransientStore {
        &*self.store
    }

    pub fn store_mut(&mut self) -> &mut TransientStore {
        &mut *self.store
    }

    /// Bump a counter by one. Sink failures are logged and ignored.
    pub fn count(&self, metric: &str) {
        if let Err(e) = self.metrics.count(metric, 1) {
            tracing::warn!(metric, error = %e, "metrics sink rejected count");
        }
    }
}
