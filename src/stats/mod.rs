//! Stats module - Statistical calculations

mod calculator;
pub mod rainfall;
mod summary;

pub use calculator::StatsCalculator;
pub use rainfall::{high_rainfall_total, HighRainfall, DEFAULT_HIGH_RAINFALL_MM};
pub use summary::{
    AggregateSummary, CategoricalSummary, ColumnSummary, NumericSummary, StatisticsResult, Summary,
    NO_COLUMNS_MESSAGE,
};
