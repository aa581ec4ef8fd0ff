//! Runtime: drive one directive over a run's batches and report the result.
//!
//! Behavior:
//! - A fresh `TransientStore` and `InMemoryMetrics` per run; both are dropped
//!   when the run returns, successful or not.
//! - Batches are invoked in order; every batch but the last is
//!   `Phase::Intermediate`, the last is `Phase::Terminal`.
//! - A run with no rows still gets one empty terminal invocation.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info_span};
use uuid::Uuid;

use unitagg_core::config::RunConfig;
use unitagg_core::types::{Batch, Row};
use unitagg_operators::{
    Directive, DirectiveError, ExecutorContext, InMemoryMetrics, Phase, Registry, TransientStore,
};

use crate::metrics::{emit, emit_counters};

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("directive '{directive}' failed: {source}")]
    Directive {
        directive: &'static str,
        #[source]
        source: DirectiveError,
    },
    #[error("invalid run: {0}")]
    Invalid(String),
}

impl ExecError {
    /// The directive error behind this failure, if any.
    pub fn directive_error(&self) -> Option<&DirectiveError> {
        match self {
            ExecError::Directive { source, .. } => Some(source),
            ExecError::Invalid(_) => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub id: Uuid,
    pub directive: String,
    pub engine_version: String,
    pub batches: usize,
    pub rows_in: usize,
    /// Rows emitted by the directive, concatenated across invocations.
    pub output: Vec<Row>,
    /// Counters recorded by the directive during the run.
    pub metrics: BTreeMap<String, u64>,
    /// Milliseconds since Unix epoch (UTC).
    pub started_ms: u64,
    pub finished_ms: u64,
}

/// Engine owns the run configuration and the directive registry.
pub struct Engine {
    cfg: RunConfig,
    registry: Registry,
}

impl Engine {
    pub fn new(cfg: RunConfig) -> Result<Self, ExecError> {
        cfg.validate()
            .map_err(|e| ExecError::Invalid(e.to_string()))?;
        Ok(Self {
            cfg,
            registry: Registry::new(),
        })
    }

    pub fn config(&self) -> &RunConfig {
        &self.cfg
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Build `name` from the registry and run it over `rows`.
    pub fn run_named(
        &self,
        name: &str,
        args: &serde_json::Value,
        rows: Vec<Row>,
    ) -> Result<RunReport, ExecError> {
        let mut directive = self
            .registry
            .create(name, args)
            .map_err(|source| ExecError::Directive {
                directive: "registry",
                source,
            })?;
        self.run(directive.as_mut(), rows)
    }

    /// Run over `rows`, split into batches of `batch_size`.
    pub fn run(
        &self,
        directive: &mut dyn Directive,
        rows: Vec<Row>,
    ) -> Result<RunReport, ExecError> {
        let batches = into_batches(rows, self.cfg.batch_size);
        self.run_batches(directive, batches)
    }

    /// Run with caller-chosen batch boundaries.
    pub fn run_batches(
        &self,
        directive: &mut dyn Directive,
        mut batches: Vec<Batch>,
    ) -> Result<RunReport, ExecError> {
        let started_ms = now_ms();
        let id = Uuid::new_v4();
        let name = directive.name();
        let span = info_span!("run", %id, directive = name);
        let _guard = span.enter();

        if batches.is_empty() {
            batches.push(Vec::new());
        }
        let count = batches.len();
        let last = count - 1;

        let mut store = TransientStore::new();
        let metrics = InMemoryMetrics::new();
        let mut output = Vec::new();
        let mut rows_in = 0usize;

        for (idx, batch) in batches.into_iter().enumerate() {
            let phase = if idx == last {
                Phase::Terminal
            } else {
                Phase::Intermediate
            };
            rows_in += batch.len();

            let mut ctx = ExecutorContext::new(phase, &mut store, &metrics);
            let emitted = directive
                .execute(batch, &mut ctx)
                .map_err(|source| ExecError::Directive {
                    directive: name,
                    source,
                })?;
            debug!(batch = idx, ?phase, emitted = emitted.len(), "invocation done");
            output.extend(emitted);
        }

        let counters = metrics.snapshot();
        emit_counters("run.counters", &counters);
        emit(
            "run.finished",
            &[
                ("batches", count.to_string()),
                ("rows_in", rows_in.to_string()),
                ("rows_out", output.len().to_string()),
            ],
        );

        Ok(RunReport {
            id,
            directive: name.to_string(),
            engine_version: unitagg_core::VERSION.to_string(),
            batches: count,
            rows_in,
            output,
            metrics: counters,
            started_ms,
            finished_ms: now_ms(),
        })
    }
}

fn into_batches(rows: Vec<Row>, batch_size: usize) -> Vec<Batch> {
    let mut batches = Vec::new();
    let mut iter = rows.into_iter().peekable();
    while iter.peek().is_some() {
        batches.push(iter.by_ref().take(batch_size).collect());
    }
    batches
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
