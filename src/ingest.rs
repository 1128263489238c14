//! Batch ingestion: table rows → records → store, all or nothing.

use crate::data::normalizer::{CoercionError, RowNormalizer};
use crate::data::TabularData;
use crate::model::WeatherRecord;
use crate::store::{RecordStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info};

pub const LOAD_SUCCESS_STATUS: &str = "Data loaded successfully";

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("Error processing row: {0}")]
    Row(#[from] CoercionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Outcome of a committed batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub status: String,
    pub rows_added: usize,
    pub rows_skipped: usize,
}

/// Normalizes every row of a table and commits them as one batch.
pub struct Ingestor;

impl Ingestor {
    /// Stage all rows, then commit.
    ///
    /// The first row that fails coercion rolls the whole batch back; rows are
    /// never skipped individually, so `rows_skipped` is always zero.
    pub fn ingest<S: RecordStore + ?Sized>(
        table: &TabularData,
        store: &mut S,
    ) -> Result<IngestReport, IngestError> {
        info!(rows = table.height(), "ingesting weather rows");

        let skipped_rows = 0;
        let mut added_rows = 0;

        for row in table.rows() {
            match RowNormalizer::normalize(&row) {
                Ok(record) => {
                    store.add(record);
                    added_rows += 1;
                }
                Err(e) => {
                    error!(error = %e, "error processing row, rolling back batch");
                    store.rollback();
                    return Err(e.into());
                }
            }
        }

        if let Err(e) = store.commit() {
            error!(error = %e, "commit failed, rolling back batch");
            store.rollback();
            return Err(e.into());
        }

        info!(added_rows, skipped_rows, "weather rows ingested");
        Ok(IngestReport {
            status: LOAD_SUCCESS_STATUS.to_string(),
            rows_added: added_rows,
            rows_skipped: skipped_rows,
        })
    }

    /// Normalize without persisting, for pipelines that only need records.
    pub fn normalize_all(table: &TabularData) -> Result<Vec<WeatherRecord>, CoercionError> {
        table
            .rows()
            .map(|row| RowNormalizer::normalize(&row))
            .collect()
    }
}
