//! Row Normalizer Module
//! Maps raw table rows onto typed `WeatherRecord`s.
//!
//! A cell only produces a value when it is present *and* truthy: empty text,
//! `0`, `0.0` and `false` all become `None`. Zero readings are therefore
//! stored as missing. A present value that cannot be coerced is an error.

use super::table::{Cell, Row};
use crate::model::{Field, WeatherRecord};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoercionError {
    #[error("missing column '{column}' in {row}")]
    MissingColumn { column: &'static str, row: String },
    #[error("cannot read '{value}' in column '{column}' as {expected} in {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        expected: &'static str,
        row: String,
    },
}

/// Builds one `WeatherRecord` per table row.
pub struct RowNormalizer;

impl RowNormalizer {
    pub fn normalize(row: &Row) -> Result<WeatherRecord, CoercionError> {
        Ok(WeatherRecord {
            location: Self::location(row),
            min_temp: Self::float(row, Field::MinTemp)?,
            max_temp: Self::float(row, Field::MaxTemp)?,
            rainfall: Self::float(row, Field::Rainfall)?,

            evaporation: Self::float(row, Field::Evaporation)?,
            sunshine: Self::float(row, Field::Sunshine)?,
            wind_gust_dir: Self::text(row, Field::WindGustDir)?,
            wind_gust_speed: Self::float(row, Field::WindGustSpeed)?,
            wind_dir_9am: Self::text(row, Field::WindDir9am)?,
            wind_dir_3pm: Self::text(row, Field::WindDir3pm)?,
            wind_speed_9am: Self::float(row, Field::WindSpeed9am)?,
            wind_speed_3pm: Self::float(row, Field::WindSpeed3pm)?,
            humidity_9am: Self::float(row, Field::Humidity9am)?,
            humidity_3pm: Self::float(row, Field::Humidity3pm)?,
            pressure_9am: Self::float(row, Field::Pressure9am)?,
            pressure_3pm: Self::float(row, Field::Pressure3pm)?,
            cloud_9am: Self::float(row, Field::Cloud9am)?,
            cloud_3pm: Self::float(row, Field::Cloud3pm)?,
            temp_9am: Self::float(row, Field::Temp9am)?,
            temp_3pm: Self::float(row, Field::Temp3pm)?,
            rain_today: Self::text(row, Field::RainToday)?,
            rain_tomorrow: Self::integer(row, Field::RainTomorrow)?,
        })
    }

    /// Location is optional in the header; every other column is required.
    fn location(row: &Row) -> Option<String> {
        row.get(Field::Location.header())
            .filter(|cell| cell.is_truthy())
            .map(Cell::to_string)
    }

    /// Present, truthy cell for `field`, or `None`.
    fn cell(row: &Row, field: Field) -> Result<Option<&Cell>, CoercionError> {
        if !row.contains(field.header()) {
            return Err(CoercionError::MissingColumn {
                column: field.header(),
                row: row.to_string(),
            });
        }
        Ok(row.get(field.header()).filter(|cell| cell.is_truthy()))
    }

    fn text(row: &Row, field: Field) -> Result<Option<String>, CoercionError> {
        Ok(Self::cell(row, field)?.map(Cell::to_string))
    }

    fn float(row: &Row, field: Field) -> Result<Option<f64>, CoercionError> {
        let Some(cell) = Self::cell(row, field)? else {
            return Ok(None);
        };
        let value = match cell {
            Cell::Float(v) => Some(*v),
            Cell::Integer(v) => Some(*v as f64),
            Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            Cell::Text(s) => s.trim().parse::<f64>().ok(),
        };
        value
            .map(Some)
            .ok_or_else(|| Self::invalid(row, field, cell, "a number"))
    }

    fn integer(row: &Row, field: Field) -> Result<Option<i64>, CoercionError> {
        let Some(cell) = Self::cell(row, field)? else {
            return Ok(None);
        };
        let value = match cell {
            Cell::Integer(v) => Some(*v),
            Cell::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            Cell::Float(_) => None,
            Cell::Bool(b) => Some(i64::from(*b)),
            Cell::Text(s) => s.trim().parse::<i64>().ok(),
        };
        value
            .map(Some)
            .ok_or_else(|| Self::invalid(row, field, cell, "an integer"))
    }

    fn invalid(row: &Row, field: Field, cell: &Cell, expected: &'static str) -> CoercionError {
        CoercionError::InvalidValue {
            column: field.header(),
            value: cell.to_string(),
            expected,
            row: row.to_string(),
        }
    }
}
