//! Fire-and-forget counters.
//!
//! Directives must never fail because a sink did; see
//! `ExecutorContext::count`, which logs and drops sink errors.

use std::collections::BTreeMap;
use std::sync::Mutex;

use thiserror::Error;

pub const PROCESSED_ROWS: &str = "processed.rows";
pub const ERROR_ROWS: &str = "error.rows";

#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metrics sink unavailable: {0}")]
    Unavailable(String),
}

pub trait MetricsSink: Send + Sync {
    fn count(&self, metric: &str, delta: u64) -> Result<(), MetricsError>;
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn count(&self, _metric: &str, _delta: u64) -> Result<(), MetricsError> {
        Ok(())
    }
}

/// Keeps counters in memory; used by the run driver and tests.
#[derive(Debug, Default)]
pub struct InMemoryMetrics {
    counters: Mutex<BTreeMap<String, u64>>,
}

impl InMemoryMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `metric`; zero if never counted.
    pub fn get(&self, metric: &str) -> u64 {
        self.counters
            .lock()
            .map(|c| c.get(metric).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    pub fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }
}

impl MetricsSink for InMemoryMetrics {
    fn count(&self, metric: &str, delta: u64) -> Result<(), MetricsError> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|e| MetricsError::Unavailable(e.to_string()))?;
        let slot = counters.entry(metric.to_string()).or_insert(0);
        *slot = slot.saturating_add(delta);
        Ok(())
    }
}
