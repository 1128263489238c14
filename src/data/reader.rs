//! Weather File Reader Module
//! Reads a comma-separated file into a `TabularData` snapshot using Polars.

use super::table::TabularData;
use polars::prelude::*;
use std::fs;
use std::io::{Cursor, ErrorKind};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{error, info};

/// Cell texts read as null.
const NULL_MARKERS: [&str; 10] = [
    "NA", "N/A", "n/a", "NaN", "nan", "null", "NULL", "#N/A", "None", "<NA>",
];

#[derive(Error, Debug)]
pub enum ReadError {
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("File is empty: {}", .0.display())]
    EmptyContent(PathBuf),
    #[error("Unable to parse file {}: {source}", path.display())]
    MalformedContent {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Anything that can hand the loader a table.
///
/// `Ok(None)` means the read failed for a reason the source chose not to
/// classify; the loader turns it into a load failure.
pub trait TableSource {
    fn read(&self) -> Result<Option<TabularData>, ReadError>;
}

/// Reads one CSV file per call; the file is never cached.
#[derive(Debug, Clone)]
pub struct FileReader {
    path: PathBuf,
}

impl FileReader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, bytes: Vec<u8>) -> Result<TabularData, ReadError> {
        let null_values = NullValues::AllColumns(NULL_MARKERS.iter().map(|s| (*s).into()).collect());

        // Types are inferred over every row.
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .with_parse_options(CsvParseOptions::default().with_null_values(Some(null_values)))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()
            .map_err(|source| {
                error!(path = %self.path.display(), %source, "unable to parse file");
                ReadError::MalformedContent {
                    path: self.path.clone(),
                    source,
                }
            })?;

        if df.height() == 0 {
            error!(path = %self.path.display(), "file has a header but no rows");
            return Err(ReadError::EmptyContent(self.path.clone()));
        }

        Ok(TabularData::from_frame(df))
    }
}

impl TableSource for FileReader {
    fn read(&self) -> Result<Option<TabularData>, ReadError> {
        info!(path = %self.path.display(), "attempting to read file");

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                error!(path = %self.path.display(), "file not found");
                return Err(ReadError::NotFound(self.path.clone()));
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "unexpected error reading file");
                return Ok(None);
            }
        };

        match std::str::from_utf8(&bytes) {
            Ok(text) if text.lines().skip(1).all(|line| line.trim().is_empty()) => {
                error!(path = %self.path.display(), "file is empty");
                return Err(ReadError::EmptyContent(self.path.clone()));
            }
            Ok(_) => {}
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "unexpected error decoding file");
                return Ok(None);
            }
        }

        let table = self.parse(bytes)?;
        info!(
            path = %self.path.display(),
            rows = table.height(),
            "successfully read file"
        );
        Ok(Some(table))
    }
}
