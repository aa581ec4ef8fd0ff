#![forbid(unsafe_code)]
//! unitagg-operators: directives and the context they run in.
//!
//! Design intent:
//! - Synchronous and single-threaded per directive instance; the host hands
//!   batches in order and supplies an `ExecutorContext` on every call.
//! - Run-scoped state lives in the context's `TransientStore`, never in
//!   process globals.
//! - Every directive describes its arguments (`UsageDefinition`) and its
//!   column-level lineage (`Mutation`).

pub mod aggregate_stats;
pub mod context;
pub mod lineage;
pub mod metrics;
pub mod registry;
pub mod rename;
pub mod traits;
pub mod usage;

pub use aggregate_stats::{Accumulator, AggregateStats, AggregateStatsConfig};
pub use context::{ExecutorContext, Phase, TransientStore};
pub use lineage::{Mutation, Relation};
pub use metrics::{InMemoryMetrics, MetricsError, MetricsSink, NoopMetrics};
pub use registry::Registry;
pub use rename::Rename;
pub use traits::{Directive, DirectiveError};
pub use usage::{Arguments, TokenDefinition, UsageDefinition};
