//! Store module - persistence boundary for weather records

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::model::WeatherRecord;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Runtime error: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("Commit rejected: {0}")]
    Rejected(String),
}

/// Transactional sink for records.
///
/// Records passed to `add` are only staged; `commit` makes the whole staged
/// batch visible at once and `rollback` discards it.
pub trait RecordStore {
    fn add(&mut self, record: WeatherRecord);

    /// Persist every staged record, returning how many were written.
    fn commit(&mut self) -> Result<usize, StoreError>;

    fn rollback(&mut self);

    /// All committed records, in insertion order.
    fn all(&self) -> Result<Vec<WeatherRecord>, StoreError>;
}
