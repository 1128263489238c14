//! Tabular Data Module
//! In-memory rows × named columns snapshot, backed by a Polars DataFrame.

use polars::prelude::*;
use std::fmt;

/// Raw value of one cell, as inferred from the source text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl Cell {
    /// Truthiness used by the row normalizer: empty text, zero and `false`
    /// all count as "no value".
    pub fn is_truthy(&self) -> bool {
        match self {
            Cell::Text(s) => !s.is_empty(),
            Cell::Integer(v) => *v != 0,
            Cell::Float(v) => *v != 0.0,
            Cell::Bool(b) => *b,
        }
    }

    fn from_any(value: AnyValue<'_>) -> Option<Self> {
        match value {
            AnyValue::Null => None,
            AnyValue::Boolean(b) => Some(Cell::Bool(b)),
            AnyValue::String(s) => Some(Cell::Text(s.to_string())),
            AnyValue::StringOwned(s) => Some(Cell::Text(s.to_string())),
            AnyValue::Int8(v) => Some(Cell::Integer(v.into())),
            AnyValue::Int16(v) => Some(Cell::Integer(v.into())),
            AnyValue::Int32(v) => Some(Cell::Integer(v.into())),
            AnyValue::Int64(v) => Some(Cell::Integer(v)),
            AnyValue::UInt8(v) => Some(Cell::Integer(v.into())),
            AnyValue::UInt16(v) => Some(Cell::Integer(v.into())),
            AnyValue::UInt32(v) => Some(Cell::Integer(v.into())),
            AnyValue::UInt64(v) => Some(
                i64::try_from(v)
                    .map(Cell::Integer)
                    .unwrap_or(Cell::Float(v as f64)),
            ),
            AnyValue::Float32(v) => Some(Cell::Float(v.into())),
            AnyValue::Float64(v) => Some(Cell::Float(v)),
            other => Some(Cell::Text(other.to_string().trim_matches('"').to_string())),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => write!(f, "{s}"),
            Cell::Integer(v) => write!(f, "{v}"),
            Cell::Float(v) => write!(f, "{v:?}"),
            Cell::Bool(true) => write!(f, "True"),
            Cell::Bool(false) => write!(f, "False"),
        }
    }
}

/// One source row: column name → cell, in header order.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub index: usize,
    cells: Vec<(String, Option<Cell>)>,
}

impl Row {
    pub fn contains(&self, column: &str) -> bool {
        self.cells.iter().any(|(name, _)| name == column)
    }

    /// Cell value, `None` when the column is absent or the cell is null.
    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, cell)| cell.as_ref())
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "row {} {{", self.index)?;
        for (i, (name, cell)) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            match cell {
                Some(cell) => write!(f, " {name}: {cell}")?,
                None => write!(f, " {name}: null")?,
            }
        }
        write!(f, " }}")
    }
}

/// Immutable rows × columns snapshot produced by one read.
#[derive(Debug, Clone)]
pub struct TabularData {
    df: DataFrame,
}

impl TabularData {
    pub fn from_frame(df: DataFrame) -> Self {
        Self { df }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    /// Number of data rows (header excluded).
    pub fn height(&self) -> usize {
        self.df.height()
    }

    /// Column names in header order.
    pub fn columns(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    pub fn row(&self, index: usize) -> Option<Row> {
        if index >= self.df.height() {
            return None;
        }

        let cells = self
            .df
            .get_columns()
            .iter()
            .map(|col| {
                let value = col
                    .as_materialized_series()
                    .get(index)
                    .ok()
                    .and_then(Cell::from_any);
                (col.name().to_string(), value)
            })
            .collect();

        Some(Row { index, cells })
    }

    pub fn rows(&self) -> impl Iterator<Item = Row> + '_ {
        (0..self.df.height()).filter_map(move |i| self.row(i))
    }

    /// Non-null values of a numeric column, in row order.
    ///
    /// Returns `None` when the column is missing or not numeric.
    pub fn numeric_values(&self, column: &str) -> Option<Vec<f64>> {
        let col = self.df.column(column).ok()?;
        if !is_numeric(col.dtype()) {
            return None;
        }
        let series = col.as_materialized_series().cast(&DataType::Float64).ok()?;
        let values = series
            .f64()
            .ok()?
            .into_iter()
            .flatten()
            .filter(|v| !v.is_nan())
            .collect();
        Some(values)
    }
}

/// Whether a column dtype holds numbers.
pub fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> TabularData {
        let df = DataFrame::new(vec![
            Column::new("Location".into(), vec![Some("Albury"), None, Some("")]),
            Column::new("MinTemp".into(), vec![Some(13.4), Some(0.0), None]),
            Column::new("Cloud9am".into(), vec![Some(8i64), None, Some(0)]),
        ])
        .unwrap();
        TabularData::from_frame(df)
    }

    #[test]
    fn rows_keep_header_order_and_nulls() {
        let table = sample();
        assert_eq!(table.columns(), vec!["Location", "MinTemp", "Cloud9am"]);
        assert_eq!(table.height(), 3);

        let first = table.row(0).unwrap();
        assert_eq!(first.get("Location"), Some(&Cell::Text("Albury".into())));
        assert_eq!(first.get("MinTemp"), Some(&Cell::Float(13.4)));
        assert_eq!(first.get("Cloud9am"), Some(&Cell::Integer(8)));

        let second = table.row(1).unwrap();
        assert!(second.contains("Location"));
        assert_eq!(second.get("Location"), None);
        assert!(!second.contains("Sunshine"));
        assert!(table.row(3).is_none());
    }

    #[test]
    fn truthiness_treats_zero_and_empty_as_missing() {
        assert!(!Cell::Text(String::new()).is_truthy());
        assert!(Cell::Text("0".into()).is_truthy());
        assert!(!Cell::Integer(0).is_truthy());
        assert!(!Cell::Float(0.0).is_truthy());
        assert!(Cell::Float(-0.5).is_truthy());
        assert!(!Cell::Bool(false).is_truthy());
    }

    #[test]
    fn numeric_values_skip_nulls() {
        let table = sample();
        assert_eq!(table.numeric_values("MinTemp"), Some(vec![13.4, 0.0]));
        assert_eq!(table.numeric_values("Cloud9am"), Some(vec![8.0, 0.0]));
        assert_eq!(table.numeric_values("Location"), None);
        assert_eq!(table.numeric_values("Nope"), None);
    }

    #[test]
    fn row_display_lists_cells() {
        let row = sample().row(1).unwrap();
        assert_eq!(
            row.to_string(),
            "row 1 { Location: null, MinTemp: 0.0, Cloud9am: null }"
        );
    }
}
