//! `aggregate-stats`: sum a byte-size column and a time-duration column across
//! a whole run and emit one summary row at the terminal phase.
//!
//! Usage:
//! `aggregate-stats <byteSizeColumn> <timeDurationColumn> <totalSizeColumnName>
//!  <totalTimeColumnName> [sizeOutputUnit=MB] [timeOutputUnit=s]`
//!
//! Totals live in the run's `TransientStore`, not in the batch, so results are
//! the same however the host splits rows into batches.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use unitagg_core::token::TokenType;
use unitagg_core::types::{Batch, Row};
use unitagg_units::{
    format_byte_size_in, format_time_duration_in, parse_byte_size, parse_time_duration, ByteUnit,
    TimeUnit,
};

use crate::context::{ExecutorContext, TransientStore};
use crate::lineage::Mutation;
use crate::metrics::{ERROR_ROWS, PROCESSED_ROWS};
use crate::traits::{Directive, DirectiveError};
use crate::usage::{Arguments, UsageDefinition};

pub const NAME: &str = "aggregate-stats";

pub const TOTAL_BYTES_KEY: &str = "aggregate-stats:total-bytes";
pub const TOTAL_MILLIS_KEY: &str = "aggregate-stats:total-millis";
pub const ROW_COUNT_KEY: &str = "aggregate-stats:row-count";

const ARG_BYTE_SIZE_COLUMN: &str = "byteSizeColumn";
const ARG_TIME_DURATION_COLUMN: &str = "timeDurationColumn";
const ARG_TOTAL_SIZE_COLUMN: &str = "totalSizeColumnName";
const ARG_TOTAL_TIME_COLUMN: &str = "totalTimeColumnName";
const ARG_SIZE_UNIT: &str = "sizeOutputUnit";
const ARG_TIME_UNIT: &str = "timeOutputUnit";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateStatsConfig {
    pub byte_size_column: String,
    pub time_duration_column: String,
    pub total_size_column: String,
    pub total_time_column: String,
    pub size_unit: ByteUnit,
    pub time_unit: TimeUnit,
}

impl AggregateStatsConfig {
    /// Config with the default output units (MB, seconds).
    pub fn new(
        byte_size_column: impl Into<String>,
        time_duration_column: impl Into<String>,
        total_size_column: impl Into<String>,
        total_time_column: impl Into<String>,
    ) -> Self {
        Self {
            byte_size_column: byte_size_column.into(),
            time_duration_column: time_duration_column.into(),
            total_size_column: total_size_column.into(),
            total_time_column: total_time_column.into(),
            size_unit: ByteUnit::MB,
            time_unit: TimeUnit::Seconds,
        }
    }

    pub fn from_arguments(args: &Arguments) -> Result<Self, DirectiveError> {
        let mut cfg = Self::new(
            args.required(ARG_BYTE_SIZE_COLUMN)?,
            args.required(ARG_TIME_DURATION_COLUMN)?,
            args.required(ARG_TOTAL_SIZE_COLUMN)?,
            args.required(ARG_TOTAL_TIME_COLUMN)?,
        );

        if let Some(unit) = args.get(ARG_SIZE_UNIT) {
            cfg.size_unit = ByteUnit::parse(unit.trim()).ok_or_else(|| {
                DirectiveError::Configuration(format!(
                    "Invalid byte size output unit: {}. Must be one of: B, KB, MB, GB, TB, PB",
                    unit.to_uppercase()
                ))
            })?;
        }

        if let Some(unit) = args.get(ARG_TIME_UNIT) {
            cfg.time_unit = TimeUnit::parse(unit.trim()).ok_or_else(|| {
                DirectiveError::Configuration(format!(
                    "Invalid time duration output unit: {}. Must be one of: n, μ/u, ms, s, m, h, d",
                    unit.to_lowercase()
                ))
            })?;
        }

        Ok(cfg)
    }

    /// Parse both quantities of `row`, or explain why the row is unusable.
    fn measure(&self, row: &Row) -> Result<(i64, i64), DirectiveError> {
        let size = self.cell(row, &self.byte_size_column)?;
        let duration = self.cell(row, &self.time_duration_column)?;

        // Both parses happen before anything is added.
        let bytes =
            parse_byte_size(&size).map_err(|e| DirectiveError::RowParse(e.to_string()))?;
        let millis =
            parse_time_duration(&duration).map_err(|e| DirectiveError::RowParse(e.to_string()))?;
        Ok((bytes, millis))
    }

    fn cell<'r>(&self, row: &'r Row, column: &str) -> Result<Cow<'r, str>, DirectiveError> {
        let value = row
            .get(column)
            .ok_or_else(|| DirectiveError::RowParse(format!("column '{column}' not found")))?;
        value
            .as_text()
            .ok_or_else(|| DirectiveError::RowParse(format!("column '{column}' is null")))
    }
}

/// Running totals for one pipeline run, stored under three fixed keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accumulator {
    pub total_bytes: i64,
    pub total_millis: i64,
    pub row_count: i64,
}

impl Accumulator {
    /// True once any invocation of the current run has saved totals.
    pub fn is_present(store: &TransientStore) -> bool {
        store.contains(TOTAL_BYTES_KEY)
            || store.contains(TOTAL_MILLIS_KEY)
            || store.contains(ROW_COUNT_KEY)
    }

    /// Read totals; absent keys read as zero.
    pub fn load(store: &TransientStore) -> Self {
        Self {
            total_bytes: store.get(TOTAL_BYTES_KEY).unwrap_or(0),
            total_millis: store.get(TOTAL_MILLIS_KEY).unwrap_or(0),
            row_count: store.get(ROW_COUNT_KEY).unwrap_or(0),
        }
    }

    pub fn save(&self, store: &mut TransientStore) {
        store.set(TOTAL_BYTES_KEY, self.total_bytes);
        store.set(TOTAL_MILLIS_KEY, self.total_millis);
        store.set(ROW_COUNT_KEY, self.row_count);
    }

    // Saturating: totals must never decrease within a run.
    fn add(&mut self, bytes: i64, millis: i64) {
        self.total_bytes = self.total_bytes.saturating_add(bytes);
        self.total_millis = self.total_millis.saturating_add(millis);
    }

    fn see_row(&mut self) {
        self.row_count = self.row_count.saturating_add(1);
    }
}

/// Processed/error row counts for the current run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct RunTally {
    processed_rows: i64,
    error_rows: i64,
}

#[derive(Debug, Default)]
pub struct AggregateStats {
    config: Option<AggregateStatsConfig>,
    tally: RunTally,
}

impl AggregateStats {
    /// An already-configured instance; `initialize` is not needed.
    pub fn new(config: AggregateStatsConfig) -> Self {
        Self {
            config: Some(config),
            tally: RunTally::default(),
        }
    }

    pub fn config(&self) -> Option<&AggregateStatsConfig> {
        self.config.as_ref()
    }
}

impl Directive for AggregateStats {
    fn name(&self) -> &'static str {
        NAME
    }

    fn define(&self) -> UsageDefinition {
        UsageDefinition::builder(NAME)
            .define(ARG_BYTE_SIZE_COLUMN, TokenType::ColumnName)
            .define(ARG_TIME_DURATION_COLUMN, TokenType::ColumnName)
            .define(ARG_TOTAL_SIZE_COLUMN, TokenType::ColumnName)
            .define(ARG_TOTAL_TIME_COLUMN, TokenType::ColumnName)
            .define_optional(ARG_SIZE_UNIT, TokenType::Text)
            .define_optional(ARG_TIME_UNIT, TokenType::Text)
            .build()
    }

    fn initialize(&mut self, args: &Arguments) -> Result<(), DirectiveError> {
        self.config = Some(AggregateStatsConfig::from_arguments(args)?);
        self.tally = RunTally::default();
        Ok(())
    }

    fn execute(
        &mut self,
        rows: Batch,
        ctx: &mut ExecutorContext<'_>,
    ) -> Result<Batch, DirectiveError> {
        let config = self.config.as_ref().ok_or_else(|| {
            DirectiveError::Configuration(format!("{NAME} executed before initialize"))
        })?;

        // No totals in the store means this is the first batch of a new run.
        if !Accumulator::is_present(ctx.store()) {
            self.tally = RunTally::default();
        }

        let mut acc = Accumulator::load(ctx.store());
        let mut processed = 0i64;
        let mut errors = 0i64;

        for row in &rows {
            acc.see_row();
            match config.measure(row) {
                Ok((bytes, millis)) => {
                    acc.add(bytes, millis);
                    processed += 1;
                    ctx.count(PROCESSED_ROWS);
                }
                Err(reason) => {
                    trace!(error = %reason, "aggregate-stats skipped row");
                    errors += 1;
                    ctx.count(ERROR_ROWS);
                }
            }
        }

        acc.save(ctx.store_mut());
        self.tally.processed_rows += processed;
        self.tally.error_rows += errors;

        debug!(
            rows = rows.len(),
            processed,
            errors,
            total_bytes = acc.total_bytes,
            total_millis = acc.total_millis,
            phase = ?ctx.phase(),
            "aggregate-stats batch"
        );

        if !ctx.phase().is_terminal() {
            return Ok(Vec::new());
        }

        if self.tally.processed_rows == 0 {
            return Err(DirectiveError::Termination {
                total_rows: acc.row_count,
                error_rows: self.tally.error_rows,
            });
        }

        let size = format_byte_size_in(acc.total_bytes, config.size_unit)?;
        let time = format_time_duration_in(acc.total_millis, config.time_unit)?;

        let summary = Row::new()
            .with(config.total_size_column.as_str(), size)
            .with(config.total_time_column.as_str(), time);
        Ok(vec![summary])
    }

    fn lineage(&self) -> Mutation {
        let Some(cfg) = &self.config else {
            return Mutation::new(format!("{NAME} (unconfigured)"));
        };
        Mutation::new(format!(
            "Aggregates byte size from column '{}' and time duration from column '{}' into '{}' and '{}'",
            cfg.byte_size_column,
            cfg.time_duration_column,
            cfg.total_size_column,
            cfg.total_time_column
        ))
        .relation(
            [&cfg.byte_size_column, &cfg.time_duration_column].map(String::clone),
            [&cfg.total_size_column, &cfg.total_time_column].map(String::clone),
        )
    }
}
