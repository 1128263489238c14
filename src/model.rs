//! Weather record model.
//!
//! `WeatherRecord` is one normalized observation. Every field is nullable:
//! the normalizer maps empty *and* zero-like source cells to `None`, so a
//! literal `0` in the CSV cannot be told apart from a missing value once it
//! has been ingested.

use serde::{Deserialize, Serialize};

/// Storage type of a record field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Float,
    Integer,
}

/// Columns of the weather schema, in CSV header order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Location,
    MinTemp,
    MaxTemp,
    Rainfall,
    Evaporation,
    Sunshine,
    WindGustDir,
    WindGustSpeed,
    WindDir9am,
    WindDir3pm,
    WindSpeed9am,
    WindSpeed3pm,
    Humidity9am,
    Humidity3pm,
    Pressure9am,
    Pressure3pm,
    Cloud9am,
    Cloud3pm,
    Temp9am,
    Temp3pm,
    RainToday,
    RainTomorrow,
}

impl Field {
    pub const ALL: [Field; 22] = [
        Field::Location,
        Field::MinTemp,
        Field::MaxTemp,
        Field::Rainfall,
        Field::Evaporation,
        Field::Sunshine,
        Field::WindGustDir,
        Field::WindGustSpeed,
        Field::WindDir9am,
        Field::WindDir3pm,
        Field::WindSpeed9am,
        Field::WindSpeed3pm,
        Field::Humidity9am,
        Field::Humidity3pm,
        Field::Pressure9am,
        Field::Pressure3pm,
        Field::Cloud9am,
        Field::Cloud3pm,
        Field::Temp9am,
        Field::Temp3pm,
        Field::RainToday,
        Field::RainTomorrow,
    ];

    /// Column name in the source CSV header.
    pub fn header(self) -> &'static str {
        match self {
            Field::Location => "Location",
            Field::MinTemp => "MinTemp",
            Field::MaxTemp => "MaxTemp",
            Field::Rainfall => "Rainfall",
            Field::Evaporation => "Evaporation",
            Field::Sunshine => "Sunshine",
            Field::WindGustDir => "WindGustDir",
            Field::WindGustSpeed => "WindGustSpeed",
            Field::WindDir9am => "WindDir9am",
            Field::WindDir3pm => "WindDir3pm",
            Field::WindSpeed9am => "WindSpeed9am",
            Field::WindSpeed3pm => "WindSpeed3pm",
            Field::Humidity9am => "Humidity9am",
            Field::Humidity3pm => "Humidity3pm",
            Field::Pressure9am => "Pressure9am",
            Field::Pressure3pm => "Pressure3pm",
            Field::Cloud9am => "Cloud9am",
            Field::Cloud3pm => "Cloud3pm",
            Field::Temp9am => "Temp9am",
            Field::Temp3pm => "Temp3pm",
            Field::RainToday => "RainToday",
            Field::RainTomorrow => "RainTomorrow",
        }
    }

    /// Record attribute / database column name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Location => "location",
            Field::MinTemp => "min_temp",
            Field::MaxTemp => "max_temp",
            Field::Rainfall => "rainfall",
            Field::Evaporation => "evaporation",
            Field::Sunshine => "sunshine",
            Field::WindGustDir => "wind_gust_dir",
            Field::WindGustSpeed => "wind_gust_speed",
            Field::WindDir9am => "wind_dir_9am",
            Field::WindDir3pm => "wind_dir_3pm",
            Field::WindSpeed9am => "wind_speed_9am",
            Field::WindSpeed3pm => "wind_speed_3pm",
            Field::Humidity9am => "humidity_9am",
            Field::Humidity3pm => "humidity_3pm",
            Field::Pressure9am => "pressure_9am",
            Field::Pressure3pm => "pressure_3pm",
            Field::Cloud9am => "cloud_9am",
            Field::Cloud3pm => "cloud_3pm",
            Field::Temp9am => "temp_9am",
            Field::Temp3pm => "temp_3pm",
            Field::RainToday => "rain_today",
            Field::RainTomorrow => "rain_tomorrow",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            Field::Location
            | Field::WindGustDir
            | Field::WindDir9am
            | Field::WindDir3pm
            | Field::RainToday => FieldKind::Text,
            Field::RainTomorrow => FieldKind::Integer,
            _ => FieldKind::Float,
        }
    }

    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// Borrowed value of one record field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    Text(Option<&'a str>),
    Float(Option<f64>),
    Integer(Option<i64>),
}

/// One normalized weather observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct WeatherRecord {
    pub location: Option<String>,
    pub min_temp: Option<f64>,
    pub max_temp: Option<f64>,
    pub rainfall: Option<f64>,

    pub evaporation: Option<f64>,
    pub sunshine: Option<f64>,
    pub wind_gust_dir: Option<String>,
    pub wind_gust_speed: Option<f64>,
    pub wind_dir_9am: Option<String>,
    pub wind_dir_3pm: Option<String>,
    pub wind_speed_9am: Option<f64>,
    pub wind_speed_3pm: Option<f64>,
    pub humidity_9am: Option<f64>,
    pub humidity_3pm: Option<f64>,
    pub pressure_9am: Option<f64>,
    pub pressure_3pm: Option<f64>,
    pub cloud_9am: Option<f64>,
    pub cloud_3pm: Option<f64>,
    pub temp_9am: Option<f64>,
    pub temp_3pm: Option<f64>,
    pub rain_today: Option<String>,
    pub rain_tomorrow: Option<i64>,
}

impl WeatherRecord {
    pub fn get(&self, field: Field) -> FieldValue<'_> {
        match field {
            Field::Location => FieldValue::Text(self.location.as_deref()),
            Field::MinTemp => FieldValue::Float(self.min_temp),
            Field::MaxTemp => FieldValue::Float(self.max_temp),
            Field::Rainfall => FieldValue::Float(self.rainfall),
            Field::Evaporation => FieldValue::Float(self.evaporation),
            Field::Sunshine => FieldValue::Float(self.sunshine),
            Field::WindGustDir => FieldValue::Text(self.wind_gust_dir.as_deref()),
            Field::WindGustSpeed => FieldValue::Float(self.wind_gust_speed),
            Field::WindDir9am => FieldValue::Text(self.wind_dir_9am.as_deref()),
            Field::WindDir3pm => FieldValue::Text(self.wind_dir_3pm.as_deref()),
            Field::WindSpeed9am => FieldValue::Float(self.wind_speed_9am),
            Field::WindSpeed3pm => FieldValue::Float(self.wind_speed_3pm),
            Field::Humidity9am => FieldValue::Float(self.humidity_9am),
            Field::Humidity3pm => FieldValue::Float(self.humidity_3pm),
            Field::Pressure9am => FieldValue::Float(self.pressure_9am),
            Field::Pressure3pm => FieldValue::Float(self.pressure_3pm),
            Field::Cloud9am => FieldValue::Float(self.cloud_9am),
            Field::Cloud3pm => FieldValue::Float(self.cloud_3pm),
            Field::Temp9am => FieldValue::Float(self.temp_9am),
            Field::Temp3pm => FieldValue::Float(self.temp_3pm),
            Field::RainToday => FieldValue::Text(self.rain_today.as_deref()),
            Field::RainTomorrow => FieldValue::Integer(self.rain_tomorrow),
        }
    }
}
