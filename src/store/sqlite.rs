//! SQLite record store.
//!
//! sqlx is async, the pipeline is not: the store owns a current-thread
//! runtime and blocks on it for every call.

use super::{RecordStore, StoreError};
use crate::model::{Field, FieldKind, FieldValue, WeatherRecord};
use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Sqlite;
use std::str::FromStr;
use tokio::runtime::{Builder, Runtime};
use tracing::{error, info};

const TABLE: &str = "weather_data";

pub struct SqliteStore {
    pool: SqlitePool,
    runtime: Runtime,
    staged: Vec<WeatherRecord>,
}

impl SqliteStore {
    /// Open (or create) the database and make sure the table exists.
    pub fn connect(database_url: &str) -> Result<Self, StoreError> {
        let runtime = Builder::new_current_thread().enable_all().build()?;

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // One long-lived connection keeps `sqlite::memory:` databases alive.
        let pool = runtime.block_on(async {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
                .connect_with(options)
                .await?;
            sqlx::query(&create_table_sql()).execute(&pool).await?;
            Ok::<_, sqlx::Error>(pool)
        })?;

        info!(database_url, "connected to weather store");
        Ok(Self {
            pool,
            runtime,
            staged: Vec::new(),
        })
    }
}

impl RecordStore for SqliteStore {
    fn add(&mut self, record: WeatherRecord) {
        self.staged.push(record);
    }

    fn commit(&mut self) -> Result<usize, StoreError> {
        let staged = std::mem::take(&mut self.staged);
        let sql = insert_sql();

        // The transaction rolls back on drop if any insert fails.
        let result = self.runtime.block_on(async {
            let mut tx = self.pool.begin().await?;
            for record in &staged {
                bind_record(sqlx::query(&sql), record)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await
        });

        if let Err(e) = result {
            error!(error = %e, records = staged.len(), "commit failed, batch rolled back");
            return Err(e.into());
        }

        info!(records = staged.len(), "committed weather records");
        Ok(staged.len())
    }

    fn rollback(&mut self) {
        if !self.staged.is_empty() {
            info!(records = self.staged.len(), "discarding staged weather records");
        }
        self.staged.clear();
    }

    fn all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        let records = self.runtime.block_on(
            sqlx::query_as::<_, WeatherRecord>(&select_sql()).fetch_all(&self.pool),
        )?;
        Ok(records)
    }
}

impl Drop for SqliteStore {
    fn drop(&mut self) {
        self.runtime.block_on(self.pool.close());
    }
}

fn column_list() -> String {
    Field::ALL
        .iter()
        .map(|f| f.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn create_table_sql() -> String {
    let columns = Field::ALL
        .iter()
        .map(|f| {
            let sql_type = match f.kind() {
                FieldKind::Text => "TEXT",
                FieldKind::Float => "REAL",
                FieldKind::Integer => "INTEGER",
            };
            format!("{} {}", f.name(), sql_type)
        })
        .collect::<Vec<_>>()
        .join(",\n    ");

    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (\n    id INTEGER PRIMARY KEY AUTOINCREMENT,\n    {columns}\n)"
    )
}

fn insert_sql() -> String {
    let placeholders = vec!["?"; Field::ALL.len()].join(", ");
    format!(
        "INSERT INTO {TABLE} ({}) VALUES ({placeholders})",
        column_list()
    )
}

fn select_sql() -> String {
    format!("SELECT {} FROM {TABLE} ORDER BY id", column_list())
}

fn bind_record<'q>(
    mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
    record: &WeatherRecord,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    for field in Field::ALL {
        query = match record.get(field) {
            FieldValue::Text(v) => query.bind(v.map(str::to_owned)),
            FieldValue::Float(v) => query.bind(v),
            FieldValue::Integer(v) => query.bind(v),
        };
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(location: &str, min_temp: f64, rain_tomorrow: Option<i64>) -> WeatherRecord {
        WeatherRecord {
            location: Some(location.to_string()),
            min_temp: Some(min_temp),
            rain_today: Some("No".to_string()),
            rain_tomorrow,
            ..Default::default()
        }
    }

    #[test]
    fn commit_persists_all_fields_in_order() {
        let mut store = SqliteStore::connect("sqlite::memory:").unwrap();
        store.add(record("Albury", 13.4, Some(1)));
        store.add(record("Cobar", 9.1, None));

        assert!(store.all().unwrap().is_empty());
        assert_eq!(store.commit().unwrap(), 2);

        let stored = store.all().unwrap();
        assert_eq!(stored, vec![record("Albury", 13.4, Some(1)), record("Cobar", 9.1, None)]);
    }

    #[test]
    fn rollback_leaves_table_untouched() {
        let mut store = SqliteStore::connect("sqlite::memory:").unwrap();
        store.add(record("Albury", 13.4, None));
        store.commit().unwrap();

        store.add(record("Cobar", 9.1, None));
        store.rollback();
        assert_eq!(store.commit().unwrap(), 0);
        assert_eq!(store.all().unwrap().len(), 1);
    }

    #[test]
    fn file_database_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let url = format!("sqlite://{}", dir.path().join("weather.db").display());

        {
            let mut store = SqliteStore::connect(&url).unwrap();
            store.add(record("Albury", 13.4, Some(0)));
            store.commit().unwrap();
        }

        let store = SqliteStore::connect(&url).unwrap();
        assert_eq!(store.all().unwrap(), vec![record("Albury", 13.4, Some(0))]);
    }

    #[test]
    fn generated_sql_covers_every_field() {
        let insert = insert_sql();
        assert_eq!(insert.matches('?').count(), 22);
        assert!(insert.starts_with("INSERT INTO weather_data (location, min_temp"));
        assert!(create_table_sql().contains("rain_tomorrow INTEGER"));
    }
}
