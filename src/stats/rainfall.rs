//! High-rainfall day filter.

use crate::data::TabularData;
use crate::model::Field;
use polars::prelude::*;
use serde::Serialize;
use std::fmt;

/// Millimetres above which a day counts as high rainfall.
pub const DEFAULT_HIGH_RAINFALL_MM: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HighRainfall {
    pub threshold: f64,
    pub days: usize,
    pub total: f64,
}

impl fmt::Display for HighRainfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total rainfall on high rainfall days: {} mm ({} days above {} mm)",
            self.total, self.days, self.threshold
        )
    }
}

/// Rows whose Rainfall is strictly above `threshold`.
pub fn high_rainfall_days(table: &TabularData, threshold: f64) -> PolarsResult<TabularData> {
    let rainfall = Field::Rainfall.header();
    let df = table
        .frame()
        .clone()
        .lazy()
        .filter(col(rainfall).cast(DataType::Float64).gt(lit(threshold)))
        .collect()?;
    Ok(TabularData::from_frame(df))
}

/// Day count and summed rainfall of the high-rainfall days.
pub fn high_rainfall_total(table: &TabularData, threshold: f64) -> PolarsResult<HighRainfall> {
    let days = high_rainfall_days(table, threshold)?;
    let total: f64 = days
        .numeric_values(Field::Rainfall.header())
        .unwrap_or_default()
        .iter()
        .sum();

    Ok(HighRainfall {
        threshold,
        days: days.height(),
        total,
    })
}
