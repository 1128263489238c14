//! End-to-end flows: file → loader → (store) → statistics.

use crate::data::{CoercionError, DataLoader, FileReader, LoadError, TabularData};
use crate::ingest::{IngestError, IngestReport, Ingestor};
use crate::stats::{high_rainfall_total, HighRainfall, StatisticsResult, StatsCalculator};
use crate::store::RecordStore;
use polars::prelude::PolarsError;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("Error processing row: {0}")]
    Row(#[from] CoercionError),
    #[error("Statistics failed: {0}")]
    Statistics(#[from] PolarsError),
}

/// Read `path` once through a fresh loader.
pub fn load_table(path: &Path) -> Result<TabularData, LoadError> {
    DataLoader::new(FileReader::new(path)).load()
}

/// Load the CSV at `path` and commit every row to `store` as one batch.
pub fn load_into_store<S: RecordStore + ?Sized>(
    path: &Path,
    store: &mut S,
) -> Result<IngestReport, PipelineError> {
    let table = load_table(path)?;
    Ok(Ingestor::ingest(&table, store)?)
}

/// What the batch run produces for the console.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchOutput {
    pub statistics: StatisticsResult,
    pub high_rainfall: HighRainfall,
}

/// Read → normalize → aggregate, without touching a store.
pub fn run_batch(path: &Path, rainfall_threshold: f64) -> Result<BatchOutput, PipelineError> {
    info!(path = %path.display(), "starting weather data processing");

    let table = load_table(path)?;
    let records = Ingestor::normalize_all(&table)?;
    let statistics = StatsCalculator::compute(&records);
    let high_rainfall = high_rainfall_total(&table, rainfall_threshold)?;

    info!(%high_rainfall, "weather data processing completed");
    Ok(BatchOutput {
        statistics,
        high_rainfall,
    })
}
