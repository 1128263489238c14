//! Weather Stats - weather CSV ingestion & summary statistics
//!
//! Reads weather observations from CSV, stores them as typed records and
//! computes descriptive statistics over them.

pub mod config;
pub mod data;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod stats;
pub mod store;

pub use config::Settings;
pub use data::{DataLoader, FileReader, LoadError, ReadError, TabularData, TableSource};
pub use ingest::{IngestError, IngestReport, Ingestor};
pub use model::WeatherRecord;
pub use stats::{StatisticsResult, StatsCalculator};
pub use store::{MemoryStore, RecordStore, SqliteStore, StoreError};
