//! Directive trait + error taxonomy.
//!
//! The host calls `define()` to learn the argument shape, `initialize()` once
//! with bound arguments, then `execute()` once per batch in arrival order.

use thiserror::Error;
use unitagg_core::types::Batch;
use unitagg_units::ArgumentError;

use crate::context::ExecutorContext;
use crate::lineage::Mutation;
use crate::usage::{Arguments, UsageDefinition};

#[derive(Debug, Error)]
pub enum DirectiveError {
    /// Bad or missing arguments. Raised before any row is processed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A single row could not be interpreted. Directives that can skip rows
    /// handle this locally; it only escapes from directives that cannot.
    #[error("row error: {0}")]
    RowParse(String),

    /// The run ended without producing anything usable.
    #[error("No valid rows were processed. Total rows: {total_rows}, Error rows: {error_rows}")]
    Termination { total_rows: i64, error_rows: i64 },

    /// A programming error at a quantity API boundary.
    #[error("invalid argument: {0}")]
    Argument(#[from] ArgumentError),
}

/// Trait that all directives implement.
///
/// Invariants:
/// - `initialize` is called exactly once, before the first `execute`.
/// - `execute` sees batches of one run in order and never concurrently.
pub trait Directive: Send + 'static {
    /// Directive name as written in scripts (stable).
    fn name(&self) -> &'static str;

    /// Argument shape, used to bind raw arguments before `initialize`.
    fn define(&self) -> UsageDefinition;

    fn initialize(&mut self, args: &Arguments) -> Result<(), DirectiveError>;

    /// Process one batch. Returned rows replace the batch downstream.
    fn execute(
        &mut self,
        rows: Batch,
        ctx: &mut ExecutorContext<'_>,
    ) -> Result<Batch, DirectiveError>;

    /// Column-level lineage for the configured instance.
    fn lineage(&self) -> Mutation;
}
