//! Statistics Calculator Module
//! Descriptive summaries over selected columns and the fixed weather aggregate.

use super::summary::{
    AggregateSummary, CategoricalSummary, ColumnSummary, NumericSummary, StatisticsResult, Summary,
};
use crate::data::{is_numeric, TabularData};
use crate::model::{Field, FieldKind, FieldValue, WeatherRecord};
use polars::prelude::*;
use statrs::statistics::Statistics;
use std::collections::HashMap;
use tracing::{debug, info};

/// Handles statistical calculations over tables and record collections.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Empty input gives a zero count and NaN everywhere else; `std` is the
    /// sample deviation and is NaN below two values.
    pub fn compute_descriptive_stats(values: &[f64]) -> NumericSummary {
        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        NumericSummary {
            count: values.len(),
            mean: Statistics::mean(values.iter()),
            std: Statistics::std_dev(values.iter()),
            min: sorted.first().copied().unwrap_or(f64::NAN),
            q25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            q75: Self::percentile(&sorted, 75.0),
            max: sorted.last().copied().unwrap_or(f64::NAN),
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    /// Same as pandas' default `linear` quantile, so q25/q75 match `describe`.
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    /// count / unique / most frequent value of non-null text values.
    ///
    /// Ties for the most frequent value go to the one seen first.
    pub fn compute_categorical_stats<'a>(values: impl IntoIterator<Item = &'a str>) -> CategoricalSummary {
        let mut order: Vec<(&str, usize)> = Vec::new();
        let mut positions: HashMap<&str, usize> = HashMap::new();

        for value in values {
            match positions.get(value) {
                Some(&pos) => order[pos].1 += 1,
                None => {
                    positions.insert(value, order.len());
                    order.push((value, 1));
                }
            }
        }

        let count = order.iter().map(|(_, n)| n).sum();
        let top = order
            .iter()
            .fold(None::<(&str, usize)>, |best, &(value, n)| match best {
                Some((_, best_n)) if best_n >= n => best,
                _ => Some((value, n)),
            });

        CategoricalSummary {
            count,
            unique: order.len(),
            top: top.map(|(value, _)| value.to_string()),
            freq: top.map(|(_, n)| n).unwrap_or(0),
        }
    }

    /// Summarize one frame column; numeric dtypes get the numeric summary.
    ///
    /// A column with no values at all counts as numeric, whatever dtype the
    /// CSV parser gave it.
    fn summarize_column(column: &Column) -> PolarsResult<Summary> {
        let series = column.as_materialized_series();

        if is_numeric(series.dtype()) || series.null_count() == series.len() {
            let as_f64 = series.cast(&DataType::Float64)?;
            let values: Vec<f64> = as_f64
                .f64()?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();
            return Ok(Summary::Numeric(Self::compute_descriptive_stats(&values)));
        }

        let as_str = series.cast(&DataType::String)?;
        let summary = Self::compute_categorical_stats(as_str.str()?.into_iter().flatten());
        Ok(Summary::Categorical(summary))
    }

    /// Describe the requested columns of a frame.
    ///
    /// Names that are not frame columns are skipped without error. An empty
    /// request yields `NoColumnsRequested`, never an empty summary list.
    pub fn describe_frame<S: AsRef<str>>(
        df: &DataFrame,
        columns: &[S],
    ) -> PolarsResult<StatisticsResult> {
        if columns.is_empty() {
            return Ok(StatisticsResult::NoColumnsRequested);
        }

        let mut summaries = Vec::with_capacity(columns.len());
        for name in columns {
            let name = name.as_ref();
            let Ok(column) = df.column(name) else {
                debug!(column = name, "skipping unknown column");
                continue;
            };
            summaries.push(ColumnSummary {
                column: name.to_string(),
                summary: Self::summarize_column(column)?,
            });
        }

        info!(
            requested = columns.len(),
            described = summaries.len(),
            "computed column statistics"
        );
        Ok(StatisticsResult::Columns(summaries))
    }

    /// Describe columns of a raw table, addressed by CSV header name.
    pub fn describe_table<S: AsRef<str>>(
        table: &TabularData,
        columns: &[S],
    ) -> PolarsResult<StatisticsResult> {
        Self::describe_frame(table.frame(), columns)
    }

    /// Describe record fields, addressed by field name (`min_temp`, ...).
    pub fn describe_records<S: AsRef<str>>(
        records: &[WeatherRecord],
        columns: &[S],
    ) -> PolarsResult<StatisticsResult> {
        if columns.is_empty() {
            return Ok(StatisticsResult::NoColumnsRequested);
        }
        let df = Self::records_to_frame(records)?;
        Self::describe_frame(&df, columns)
    }

    /// One frame column per schema field, named by field name.
    pub fn records_to_frame(records: &[WeatherRecord]) -> PolarsResult<DataFrame> {
        let columns = Field::ALL
            .iter()
            .map(|&field| {
                let name = field.name().into();
                match field.kind() {
                    FieldKind::Text => Column::new(name, Self::texts(records, field)),
                    FieldKind::Float => Column::new(name, Self::floats(records, field)),
                    FieldKind::Integer => Column::new(name, Self::integers(records, field)),
                }
            })
            .collect();

        DataFrame::new(columns)
    }

    fn texts(records: &[WeatherRecord], field: Field) -> Vec<Option<String>> {
        records
            .iter()
            .map(|r| match r.get(field) {
                FieldValue::Text(v) => v.map(str::to_owned),
                _ => None,
            })
            .collect()
    }

    fn floats(records: &[WeatherRecord], field: Field) -> Vec<Option<f64>> {
        records
            .iter()
            .map(|r| match r.get(field) {
                FieldValue::Float(v) => v,
                _ => None,
            })
            .collect()
    }

    fn integers(records: &[WeatherRecord], field: Field) -> Vec<Option<i64>> {
        records
            .iter()
            .map(|r| match r.get(field) {
                FieldValue::Integer(v) => v,
                _ => None,
            })
            .collect()
    }

    /// mean(min_temp), mean(max_temp) and sum(rainfall) over all records.
    ///
    /// Missing values are left out. No records gives NaN means and a zero sum.
    pub fn aggregate(records: &[WeatherRecord]) -> AggregateSummary {
        let min_temps: Vec<f64> = records.iter().filter_map(|r| r.min_temp).collect();
        let max_temps: Vec<f64> = records.iter().filter_map(|r| r.max_temp).collect();
        let total_rainfall: f64 = records.iter().filter_map(|r| r.rainfall).sum();

        let summary = AggregateSummary {
            mean_min_temp: Statistics::mean(min_temps.iter()),
            mean_max_temp: Statistics::mean(max_temps.iter()),
            total_rainfall,
        };
        info!(records = records.len(), %summary, "computed weather aggregate");
        summary
    }

    /// The fixed aggregate wrapped as a statistics result.
    pub fn compute(records: &[WeatherRecord]) -> StatisticsResult {
        StatisticsResult::Aggregate(Self::aggregate(records))
    }
}
