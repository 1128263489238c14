//! In-memory record store.

use super::{RecordStore, StoreError};
use crate::model::WeatherRecord;

#[derive(Debug, Default)]
pub struct MemoryStore {
    staged: Vec<WeatherRecord>,
    committed: Vec<WeatherRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn staged_len(&self) -> usize {
        self.staged.len()
    }
}

impl RecordStore for MemoryStore {
    fn add(&mut self, record: WeatherRecord) {
        self.staged.push(record);
    }

    fn commit(&mut self) -> Result<usize, StoreError> {
        let count = self.staged.len();
        self.committed.append(&mut self.staged);
        Ok(count)
    }

    fn rollback(&mut self) {
        self.staged.clear();
    }

    fn all(&self) -> Result<Vec<WeatherRecord>, StoreError> {
        Ok(self.committed.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(min_temp: f64) -> WeatherRecord {
        WeatherRecord {
            min_temp: Some(min_temp),
            ..Default::default()
        }
    }

    #[test]
    fn staged_records_are_invisible_until_commit() {
        let mut store = MemoryStore::new();
        store.add(record(1.0));
        store.add(record(2.0));
        assert!(store.all().unwrap().is_empty());

        assert_eq!(store.commit().unwrap(), 2);
        assert_eq!(store.all().unwrap(), vec![record(1.0), record(2.0)]);
        assert_eq!(store.staged_len(), 0);
    }

    #[test]
    fn rollback_discards_only_the_open_batch() {
        let mut store = MemoryStore::new();
        store.add(record(1.0));
        store.commit().unwrap();

        store.add(record(2.0));
        store.rollback();
        assert_eq!(store.commit().unwrap(), 0);
        assert_eq!(store.all().unwrap(), vec![record(1.0)]);
    }
}
