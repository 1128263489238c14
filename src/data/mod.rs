//! Data module - CSV reading, loading and row normalization

mod loader;
pub mod normalizer;
mod reader;
mod table;

pub use loader::{DataLoader, LoadError};
pub use normalizer::{CoercionError, RowNormalizer};
pub use reader::{FileReader, ReadError, TableSource};
pub use table::{is_numeric, Cell, Row, TabularData};
