//! Weather Data Loader Module
//! Runs a table source and turns an unclassified read failure into an error.

use super::reader::{ReadError, TableSource};
use super::table::TabularData;
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error("Failed to load weather data")]
    FailedToLoad,
}

/// Loads weather data through the wrapped source.
///
/// Every call goes back to the source; nothing is retried or cached.
pub struct DataLoader<S> {
    source: S,
}

impl<S: TableSource> DataLoader<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Load the table, propagating typed read errors unchanged.
    pub fn load(&self) -> Result<TabularData, LoadError> {
        info!("attempting to load weather data");

        let table = self.source.read().inspect_err(|e| {
            error!(error = %e, "read error while loading weather data");
        })?;

        let Some(table) = table else {
            error!("failed to load weather data");
            return Err(LoadError::FailedToLoad);
        };

        info!(rows = table.height(), "weather data loaded successfully");
        Ok(table)
    }
}
