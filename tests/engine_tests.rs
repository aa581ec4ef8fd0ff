//! Engine-level behavior: batching, phases, registry-built directives.

use serde_json::json;

use unitagg_core::config::RunConfig;
use unitagg_core::types::{Batch, Row};
use unitagg_exec::{Engine, ExecError};
use unitagg_operators::metrics::{ERROR_ROWS, PROCESSED_ROWS};
use unitagg_operators::{
    Arguments, Directive, DirectiveError, ExecutorContext, Mutation, UsageDefinition,
};

/// Counts rows across the run and emits the count at the terminal phase.
#[derive(Debug, Default)]
struct CountRows;

const SEEN_KEY: &str = "count-rows:seen";

impl Directive for CountRows {
    fn name(&self) -> &'static str {
        "count-rows"
    }

    fn define(&self) -> UsageDefinition {
        UsageDefinition::builder("count-rows").build()
    }

    fn initialize(&mut self, _args: &Arguments) -> Result<(), DirectiveError> {
        Ok(())
    }

    fn execute(
        &mut self,
        rows: Batch,
        ctx: &mut ExecutorContext<'_>,
    ) -> Result<Batch, DirectiveError> {
        let seen = ctx.store().get(SEEN_KEY).unwrap_or(0) + rows.len() as i64;
        ctx.store_mut().set(SEEN_KEY, seen);
        if !ctx.phase().is_terminal() {
            return Ok(Vec::new());
        }
        Ok(vec![Row::new().with("rows", seen)])
    }

    fn lineage(&self) -> Mutation {
        Mutation::new("Counts rows")
    }
}

fn args() -> serde_json::Value {
    json!({
        "byteSizeColumn": "size",
        "timeDurationColumn": "duration",
        "totalSizeColumnName": "total_size",
        "totalTimeColumnName": "total_time",
        "sizeOutputUnit": "KB",
        "timeOutputUnit": "ms",
    })
}

fn rows() -> Vec<Row> {
    vec![
        Row::new().with("size", "1KB").with("duration", "1ms"),
        Row::new().with("size", "2KB").with("duration", "2ms"),
        Row::new().with("size", "x").with("duration", "3ms"),
        Row::new().with("size", "4KB").with("duration", "4ms"),
    ]
}

#[test]
fn test_batch_size_does_not_change_the_summary() {
    let mut reports = Vec::new();
    for batch_size in [1, 2, 3, 1024] {
        let engine = Engine::new(RunConfig { batch_size }).unwrap();
        reports.push(engine.run_named("aggregate-stats", &args(), rows()).unwrap());
    }

    assert_eq!(reports[0].batches, 4);
    assert_eq!(reports[3].batches, 1);
    for report in &reports {
        assert_eq!(report.rows_in, 4);
        assert_eq!(report.output, reports[3].output);
        assert_eq!(report.metrics[PROCESSED_ROWS], 3);
        assert_eq!(report.metrics[ERROR_ROWS], 1);
    }

    let summary = &reports[0].output[0];
    assert_eq!(summary.get("total_size").unwrap().to_string(), "7.00KB");
    assert_eq!(summary.get("total_time").unwrap().to_string(), "7.00ms");
}

#[test]
fn test_empty_input_terminates() {
    let engine = Engine::new(RunConfig::default()).unwrap();
    let err = engine
        .run_named("aggregate-stats", &args(), Vec::new())
        .unwrap_err();

    assert!(matches!(
        err.directive_error(),
        Some(DirectiveError::Termination {
            total_rows: 0,
            error_rows: 0
        })
    ));
    assert!(err
        .to_string()
        .contains("No valid rows were processed. Total rows: 0, Error rows: 0"));
}

#[test]
fn test_runs_do_not_share_state() {
    let engine = Engine::new(RunConfig { batch_size: 2 }).unwrap();
    let first = engine.run_named("aggregate-stats", &args(), rows()).unwrap();
    let second = engine.run_named("aggregate-stats", &args(), rows()).unwrap();
    assert_eq!(first.output, second.output);
    assert_ne!(first.id, second.id);
}

#[test]
fn test_bad_arguments_are_reported() {
    let engine = Engine::new(RunConfig::default()).unwrap();

    let err = engine
        .run_named("aggregate-stats", &json!({ "byteSizeColumn": "size" }), rows())
        .unwrap_err();
    assert!(matches!(
        err.directive_error(),
        Some(DirectiveError::Configuration(_))
    ));

    let err = engine.run_named("no-such-directive", &args(), rows()).unwrap_err();
    assert!(matches!(err, ExecError::Directive { .. }));
}

#[test]
fn test_rename_then_aggregate() {
    let engine = Engine::new(RunConfig::default()).unwrap();
    let renamed = engine
        .run_named(
            "rename",
            &json!({ "old": "bytes", "new": "size" }),
            vec![Row::new().with("bytes", "1MB").with("duration", "1s")],
        )
        .unwrap();

    let report = engine
        .run_named("aggregate-stats", &args(), renamed.output)
        .unwrap();
    assert_eq!(
        report.output[0].get("total_size").unwrap().to_string(),
        "1024.00KB"
    );
}

#[test]
fn test_custom_directive_runs_through_the_engine() {
    let mut engine = Engine::new(RunConfig { batch_size: 3 }).unwrap();
    engine
        .registry_mut()
        .register("count-rows", || -> Box<dyn Directive> { Box::new(CountRows) });

    let report = engine
        .run_named("count-rows", &serde_json::Value::Null, rows())
        .unwrap();
    assert_eq!(report.directive, "count-rows");
    assert_eq!(report.batches, 2);
    assert_eq!(report.output, vec![Row::new().with("rows", 4i64)]);

    // Undeclared arguments are still rejected by binding.
    let err = engine
        .run_named("count-rows", &json!({ "extra": "x" }), rows())
        .unwrap_err();
    assert!(matches!(
        err.directive_error(),
        Some(DirectiveError::Configuration(_))
    ));
}

#[test]
fn test_zero_batch_size_is_rejected() {
    assert!(matches!(
        Engine::new(RunConfig { batch_size: 0 }),
        Err(ExecError::Invalid(_))
    ));
}
