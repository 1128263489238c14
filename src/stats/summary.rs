//! Statistics result types.

use serde::Serialize;
use std::fmt;

/// count / mean / std / min / quartiles / max of a numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// count / unique / top / freq of a non-numeric column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoricalSummary {
    pub count: usize,
    pub unique: usize,
    pub top: Option<String>,
    pub freq: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Summary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Descriptive summary of one column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnSummary {
    pub column: String,
    pub summary: Summary,
}

impl fmt::Display for ColumnSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.summary {
            Summary::Numeric(s) => {
                writeln!(f, "count {:>14.6}", s.count as f64)?;
                writeln!(f, "mean  {:>14.6}", s.mean)?;
                writeln!(f, "std   {:>14.6}", s.std)?;
                writeln!(f, "min   {:>14.6}", s.min)?;
                writeln!(f, "25%   {:>14.6}", s.q25)?;
                writeln!(f, "50%   {:>14.6}", s.median)?;
                writeln!(f, "75%   {:>14.6}", s.q75)?;
                writeln!(f, "max   {:>14.6}", s.max)?;
            }
            Summary::Categorical(s) => {
                writeln!(f, "count  {:>14}", s.count)?;
                writeln!(f, "unique {:>14}", s.unique)?;
                writeln!(f, "top    {:>14}", s.top.as_deref().unwrap_or("NaN"))?;
                writeln!(f, "freq   {:>14}", s.freq)?;
            }
        }
        write!(f, "Name: {}", self.column)
    }
}

/// mean(min_temp), mean(max_temp), sum(rainfall) over every record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AggregateSummary {
    pub mean_min_temp: f64,
    pub mean_max_temp: f64,
    pub total_rainfall: f64,
}

impl fmt::Display for AggregateSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Avg Min Temp: {:?}, Avg Max Temp: {:?}, Total Rainfall: {:?}",
            self.mean_min_temp, self.mean_max_temp, self.total_rainfall
        )
    }
}

/// Output of a statistics request, handed to the presentation layer as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "result", content = "value", rename_all = "snake_case")]
pub enum StatisticsResult {
    Aggregate(AggregateSummary),
    Columns(Vec<ColumnSummary>),
    /// Describe was called without any column names.
    NoColumnsRequested,
}

pub const NO_COLUMNS_MESSAGE: &str = "Please provide at least one column";

impl StatisticsResult {
    /// One printable item per summary; a single result yields itself.
    pub fn lines(&self) -> Vec<String> {
        match self {
            StatisticsResult::Aggregate(summary) => vec![summary.to_string()],
            StatisticsResult::Columns(columns) => columns.iter().map(|c| c.to_string()).collect(),
            StatisticsResult::NoColumnsRequested => vec![NO_COLUMNS_MESSAGE.to_string()],
        }
    }
}
