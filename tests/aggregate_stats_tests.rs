//! aggregate-stats driven through the directive interface and the engine.

use proptest::prelude::*;
use serde_json::json;

use unitagg_core::config::RunConfig;
use unitagg_core::types::{Row, Scalar};
use unitagg_exec::Engine;
use unitagg_operators::aggregate_stats::{ROW_COUNT_KEY, TOTAL_BYTES_KEY, TOTAL_MILLIS_KEY};
use unitagg_operators::metrics::{ERROR_ROWS, PROCESSED_ROWS};
use unitagg_operators::{
    Accumulator, AggregateStats, AggregateStatsConfig, Directive, DirectiveError,
    ExecutorContext, InMemoryMetrics, Phase, TransientStore,
};
use unitagg_units::{ByteUnit, TimeUnit};

fn config(size_unit: ByteUnit, time_unit: TimeUnit) -> AggregateStatsConfig {
    let mut cfg = AggregateStatsConfig::new("size", "duration", "total_size", "total_time");
    cfg.size_unit = size_unit;
    cfg.time_unit = time_unit;
    cfg
}

fn row(size: &str, duration: &str) -> Row {
    Row::new().with("size", size).with("duration", duration)
}

fn text(row: &Row, col: &str) -> String {
    row.get(col).map(|v| v.to_string()).unwrap_or_default()
}

#[test]
fn test_end_to_end_summary() {
    let mut d = AggregateStats::new(config(ByteUnit::MB, TimeUnit::Seconds));
    let mut store = TransientStore::new();
    let metrics = InMemoryMetrics::new();
    let mut ctx = ExecutorContext::new(Phase::Terminal, &mut store, &metrics);

    let out = d
        .execute(vec![row("1.5MB", "2.5s"), row("500KB", "1500ms")], &mut ctx)
        .unwrap();

    // 1_572_864 + 512_000 bytes = 1.988 MiB.
    assert_eq!(out.len(), 1);
    assert_eq!(text(&out[0], "total_size"), "1.99MB");
    assert_eq!(text(&out[0], "total_time"), "4.00s");
    assert_eq!(Accumulator::load(&store).total_bytes, 2_084_864);
}

#[test]
fn test_default_units() {
    let engine = Engine::new(RunConfig::default()).unwrap();
    let report = engine
        .run_named(
            "aggregate-stats",
            &json!({
                "byteSizeColumn": "size",
                "timeDurationColumn": "duration",
                "totalSizeColumnName": "total_size",
                "totalTimeColumnName": "total_time",
            }),
            vec![row("1024KB", "1000ms")],
        )
        .unwrap();

    assert_eq!(text(&report.output[0], "total_size"), "1.00MB");
    assert_eq!(text(&report.output[0], "total_time"), "1.00s");
}

#[test]
fn test_mixed_validity_batch() {
    let mut d = AggregateStats::new(config(ByteUnit::MB, TimeUnit::Seconds));
    let mut store = TransientStore::new();
    let metrics = InMemoryMetrics::new();

    let rows = vec![
        row("1MB", "1s"),
        row("invalid", "2.5s"),
        row("500KB", "invalid"),
        Row::new().with("other", "value"),
        row("1MB", "2s"),
    ];

    let mut ctx = ExecutorContext::new(Phase::Terminal, &mut store, &metrics);
    let out = d.execute(rows, &mut ctx).unwrap();

    let acc = Accumulator::load(&store);
    assert_eq!(acc.row_count, 5);
    assert_eq!(acc.total_bytes, 2 * 1024 * 1024);
    assert_eq!(acc.total_millis, 3_000);
    assert_eq!(metrics.get(PROCESSED_ROWS), 2);
    assert_eq!(metrics.get(ERROR_ROWS), 3);
    assert_eq!(text(&out[0], "total_size"), "2.00MB");
    assert_eq!(text(&out[0], "total_time"), "3.00s");
}

#[test]
fn test_null_cells_are_error_rows() {
    let mut d = AggregateStats::new(config(ByteUnit::KB, TimeUnit::Millis));
    let mut store = TransientStore::new();
    let metrics = InMemoryMetrics::new();
    let mut ctx = ExecutorContext::new(Phase::Terminal, &mut store, &metrics);

    let rows = vec![
        Row::new().with("size", Scalar::Null).with("duration", Scalar::Null),
        Row::new().with("size", "1KB").with("duration", Scalar::Null),
        row("2KB", "5ms"),
    ];
    let out = d.execute(rows, &mut ctx).unwrap();

    assert_eq!(text(&out[0], "total_size"), "2.00KB");
    assert_eq!(text(&out[0], "total_time"), "5.00ms");
    assert_eq!(metrics.get(ERROR_ROWS), 2);
}

#[test]
fn test_termination_error_counts() {
    let mut d = AggregateStats::new(config(ByteUnit::MB, TimeUnit::Seconds));
    let mut store = TransientStore::new();
    let metrics = InMemoryMetrics::new();

    let mut ctx = ExecutorContext::new(Phase::Intermediate, &mut store, &metrics);
    d.execute(vec![row("bad", "1s"), row("1KB", "never")], &mut ctx)
        .unwrap();

    let mut ctx = ExecutorContext::new(Phase::Terminal, &mut store, &metrics);
    let err = d
        .execute(vec![Row::new().with("size", "1KB")], &mut ctx)
        .unwrap_err();

    match err {
        DirectiveError::Termination {
            total_rows,
            error_rows,
        } => {
            assert_eq!(total_rows, 3);
            assert_eq!(error_rows, 3);
        }
        other => panic!("expected termination error, got {other:?}"),
    }
}

#[test]
fn test_processed_count_spans_the_whole_run() {
    // Only the first batch has valid rows; the terminal batch is all errors.
    let mut d = AggregateStats::new(config(ByteUnit::B, TimeUnit::Millis));
    let mut store = TransientStore::new();
    let metrics = InMemoryMetrics::new();

    let mut ctx = ExecutorContext::new(Phase::Intermediate, &mut store, &metrics);
    d.execute(vec![row("10B", "10ms")], &mut ctx).unwrap();

    let mut ctx = ExecutorContext::new(Phase::Terminal, &mut store, &metrics);
    let out = d.execute(vec![row("nope", "nope")], &mut ctx).unwrap();
    assert_eq!(text(&out[0], "total_size"), "10.00B");
}

#[test]
fn test_store_keys_are_namespaced() {
    let mut d = AggregateStats::new(config(ByteUnit::MB, TimeUnit::Seconds));
    let mut store = TransientStore::new();
    store.set("someone-else", 7);
    let metrics = InMemoryMetrics::new();
    let mut ctx = ExecutorContext::new(Phase::Intermediate, &mut store, &metrics);
    d.execute(vec![row("1KB", "1s")], &mut ctx).unwrap();

    let keys: Vec<_> = store.keys().collect();
    assert_eq!(
        keys,
        vec![ROW_COUNT_KEY, TOTAL_BYTES_KEY, TOTAL_MILLIS_KEY, "someone-else"]
    );
    assert_eq!(store.get("someone-else"), Some(7));
}

#[test]
fn test_batch_splitting_invariance() {
    let rows = vec![row("1MB", "1s"), row("2KB", "250ms"), row("3GB", "1h")];
    let engine = Engine::new(RunConfig::default()).unwrap();

    let mut one = AggregateStats::new(config(ByteUnit::GB, TimeUnit::Minutes));
    let whole = engine.run_batches(&mut one, vec![rows.clone()]).unwrap();

    let mut two = AggregateStats::new(config(ByteUnit::GB, TimeUnit::Minutes));
    let split = engine
        .run_batches(&mut two, vec![rows[..1].to_vec(), rows[1..].to_vec()])
        .unwrap();

    assert_eq!(whole.output, split.output);
    assert_eq!(whole.metrics, split.metrics);
    assert_eq!(split.batches, 2);
}

fn cell() -> impl Strategy<Value = Option<&'static str>> {
    prop::sample::select(vec![
        Some("1KB"),
        Some("1.5MB"),
        Some("3 gb"),
        Some("250ms"),
        Some("2.5s"),
        Some("1h"),
        Some("oops"),
        Some("0KB"),
        None,
    ])
}

proptest! {
    #[test]
    fn splitting_never_changes_the_summary(
        cells in prop::collection::vec((cell(), cell()), 1..40),
        cuts in prop::collection::vec(any::<prop::sample::Index>(), 0..5),
    ) {
        let rows: Vec<Row> = cells
            .into_iter()
            .map(|(s, d)| Row::new().with("size", s).with("duration", d))
            .collect();

        let mut points: Vec<usize> = cuts.iter().map(|i| i.index(rows.len())).collect();
        points.sort_unstable();
        points.dedup();
        let mut batches = Vec::new();
        let mut start = 0;
        for p in points {
            batches.push(rows[start..p].to_vec());
            start = p;
        }
        batches.push(rows[start..].to_vec());

        let engine = Engine::new(RunConfig::default()).unwrap();
        let mut a = AggregateStats::new(config(ByteUnit::KB, TimeUnit::Millis));
        let mut b = AggregateStats::new(config(ByteUnit::KB, TimeUnit::Millis));

        let whole = engine.run_batches(&mut a, vec![rows.clone()]);
        let split = engine.run_batches(&mut b, batches);

        match (whole, split) {
            (Ok(w), Ok(s)) => {
                prop_assert_eq!(w.output, s.output);
                prop_assert_eq!(w.metrics, s.metrics);
            }
            (Err(w), Err(s)) => prop_assert_eq!(w.to_string(), s.to_string()),
            (w, s) => prop_assert!(false, "outcomes differ: {:?} vs {:?}", w.is_ok(), s.is_ok()),
        }
    }
}
