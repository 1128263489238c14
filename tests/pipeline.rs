//! End-to-end tests: CSV fixture → loader → store → statistics.

use std::path::{Path, PathBuf};
use weather_stats::data::CoercionError;
use weather_stats::pipeline::{self, PipelineError};
use weather_stats::stats::{StatisticsResult, Summary};
use weather_stats::{
    IngestError, LoadError, MemoryStore, ReadError, RecordStore, SqliteStore, StatsCalculator,
};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn numeric(result: &StatisticsResult, column: &str) -> weather_stats::stats::NumericSummary {
    let StatisticsResult::Columns(summaries) = result else {
        panic!("expected column summaries, got {result:?}");
    };
    let summary = summaries
        .iter()
        .find(|s| s.column == column)
        .unwrap_or_else(|| panic!("no summary for {column}"));
    match &summary.summary {
        Summary::Numeric(s) => s.clone(),
        other => panic!("{column} is not numeric: {other:?}"),
    }
}

fn assert_matches_raw_columns(store: &impl RecordStore) {
    let table = pipeline::load_table(&fixture("weather_sample.csv")).unwrap();
    let raw = StatsCalculator::describe_table(&table, &["MinTemp", "MaxTemp"]).unwrap();
    let raw_rainfall: f64 = table.numeric_values("Rainfall").unwrap().iter().sum();

    let aggregate = StatsCalculator::aggregate(&store.all().unwrap());

    assert_eq!(aggregate.mean_min_temp, numeric(&raw, "MinTemp").mean);
    assert_eq!(aggregate.mean_max_temp, numeric(&raw, "MaxTemp").mean);
    assert_eq!(aggregate.total_rainfall, raw_rainfall);
}

#[test]
fn memory_round_trip_reproduces_raw_statistics() {
    let mut store = MemoryStore::new();
    let report = pipeline::load_into_store(&fixture("weather_sample.csv"), &mut store).unwrap();

    assert_eq!(report.rows_added, 11);
    assert_eq!(report.rows_skipped, 0);
    assert_matches_raw_columns(&store);
}

#[test]
fn sqlite_round_trip_reproduces_raw_statistics() {
    let mut store = SqliteStore::connect("sqlite::memory:").unwrap();
    let report = pipeline::load_into_store(&fixture("weather_sample.csv"), &mut store).unwrap();

    assert_eq!(report.rows_added, 11);
    assert_matches_raw_columns(&store);
}

#[test]
fn stored_records_keep_source_values() {
    let mut store = MemoryStore::new();
    pipeline::load_into_store(&fixture("weather_sample.csv"), &mut store).unwrap();
    let records = store.all().unwrap();

    let first = &records[0];
    assert_eq!(first.location.as_deref(), Some("Albury"));
    assert_eq!(first.min_temp, Some(13.4));
    assert_eq!(first.evaporation, None);
    assert_eq!(first.wind_dir_3pm.as_deref(), Some("WNW"));
    assert_eq!(first.cloud_3pm, None);
    assert_eq!(first.rain_today.as_deref(), Some("No"));
    // zero readings are stored as missing
    assert_eq!(first.rain_tomorrow, None);
    assert_eq!(records[1].rainfall, None);

    let last = records.last().unwrap();
    assert_eq!(last.location.as_deref(), Some("Darwin"));
    assert_eq!(last.sunshine, Some(9.8));
    assert_eq!(last.rain_tomorrow, Some(1));
}

#[test]
fn bad_row_rolls_back_the_whole_file() {
    let mut memory = MemoryStore::new();
    let err = pipeline::load_into_store(&fixture("bad_row.csv"), &mut memory).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Ingest(IngestError::Row(CoercionError::InvalidValue { column: "RainTomorrow", .. }))
    ));
    assert!(memory.all().unwrap().is_empty());

    let mut sqlite = SqliteStore::connect("sqlite::memory:").unwrap();
    pipeline::load_into_store(&fixture("bad_row.csv"), &mut sqlite).unwrap_err();
    assert!(sqlite.all().unwrap().is_empty());
}

#[test]
fn read_failures_keep_their_kind() {
    let mut store = MemoryStore::new();

    let err = pipeline::load_into_store(&fixture("ragged.csv"), &mut store).unwrap_err();
    assert!(matches!(
        err,
        PipelineError::Load(LoadError::Read(ReadError::MalformedContent { .. }))
    ));

    let err = pipeline::load_into_store(&fixture("absent.csv"), &mut store).unwrap_err();
    assert!(matches!(err, PipelineError::Load(LoadError::Read(ReadError::NotFound(_)))));
}

#[test]
fn describe_records_agrees_with_describe_table() {
    let mut store = MemoryStore::new();
    pipeline::load_into_store(&fixture("weather_sample.csv"), &mut store).unwrap();
    let table = pipeline::load_table(&fixture("weather_sample.csv")).unwrap();

    let from_records =
        StatsCalculator::describe_records(&store.all().unwrap(), &["max_temp", "humidity_9am"]).unwrap();
    let from_table = StatsCalculator::describe_table(&table, &["MaxTemp", "Humidity9am"]).unwrap();

    assert_eq!(numeric(&from_records, "max_temp"), numeric(&from_table, "MaxTemp"));
    assert_eq!(numeric(&from_records, "humidity_9am"), numeric(&from_table, "Humidity9am"));
    assert_eq!(numeric(&from_table, "MaxTemp").count, 11);
}

#[test]
fn blank_numeric_column_describes_the_same_both_ways() {
    let mut store = MemoryStore::new();
    pipeline::load_into_store(&fixture("no_evaporation.csv"), &mut store).unwrap();
    let table = pipeline::load_table(&fixture("no_evaporation.csv")).unwrap();

    let from_records = StatsCalculator::describe_records(&store.all().unwrap(), &["evaporation"]).unwrap();
    let from_table = StatsCalculator::describe_table(&table, &["Evaporation"]).unwrap();

    let records = numeric(&from_records, "evaporation");
    let raw = numeric(&from_table, "Evaporation");
    assert_eq!(records.count, 0);
    assert_eq!(raw.count, 0);
    assert!(records.mean.is_nan() && raw.mean.is_nan());
    assert!(records.q75.is_nan() && raw.q75.is_nan());
}

#[test]
fn describe_request_shapes() {
    let table = pipeline::load_table(&fixture("weather_sample.csv")).unwrap();
    let none: [&str; 0] = [];

    assert_eq!(
        StatsCalculator::describe_table(&table, &none).unwrap(),
        StatisticsResult::NoColumnsRequested
    );

    let result = StatsCalculator::describe_table(&table, &["MinTemp", "Snowfall", "Location"]).unwrap();
    let StatisticsResult::Columns(summaries) = result else {
        panic!("expected column summaries");
    };
    assert_eq!(summaries.len(), 2);
    match &summaries[1].summary {
        Summary::Categorical(s) => {
            assert_eq!(s.count, 11);
            assert_eq!(s.unique, 5);
            assert_eq!(s.top.as_deref(), Some("Albury"));
            assert_eq!(s.freq, 3);
        }
        other => panic!("Location should be categorical: {other:?}"),
    }
}

#[test]
fn batch_run_reports_aggregate_and_heavy_rain() {
    let output = pipeline::run_batch(&fixture("weather_sample.csv"), 50.0).unwrap();

    let StatisticsResult::Aggregate(aggregate) = output.statistics else {
        panic!("expected the fixed aggregate");
    };
    assert!((aggregate.total_rainfall - 154.2).abs() < 1e-9);
    assert_eq!(output.high_rainfall.days, 2);
    assert!((output.high_rainfall.total - 129.6).abs() < 1e-9);
}
