//! Wire types for the WeatherAPI.com forecast endpoint
//!
//! These structs mirror the provider's JSON payload and exist only to get
//! data off the wire; the screen consumes [`crate::domain::WeatherSnapshot`]
//! instead. Only the fields the pipeline reads are declared, so extra
//! payload fields are ignored rather than rejected.

use serde::Deserialize;

/// Top-level forecast payload
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub location: Location,
    pub current: Current,
    pub forecast: Forecast,
}

/// Resolved place metadata, including the provider's view of local time
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    pub name: String,
    /// Unix seconds of the location's current local time
    pub localtime_epoch: i64,
    /// IANA timezone identifier; absent or null on some partner feeds
    #[serde(default)]
    pub tz_id: Option<String>,
}

/// Current observed conditions
#[derive(Debug, Clone, Deserialize)]
pub struct Current {
    pub temp_c: f64,
    #[serde(rename = "feelslike_c")]
    pub feels_like_c: f64,
    pub condition: Condition,
    pub wind_kph: f64,
    pub wind_dir: String,
    pub humidity: u8,
    pub pressure_mb: f64,
    pub uv: f64,
}

/// Condition text plus a scheme-relative icon reference ("//cdn...")
#[derive(Debug, Clone, Deserialize)]
pub struct Condition {
    pub text: String,
    pub icon: String,
}

/// Forecast container
#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub forecastday: Vec<ForecastDay>,
}

/// One forecast day: a calendar date, a daily summary, and hourly records
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastDay {
    /// Calendar date, "YYYY-MM-DD"
    pub date: String,
    pub day: DaySummary,
    pub hour: Vec<ForecastHour>,
}

/// Aggregates for a whole forecast day
#[derive(Debug, Clone, Deserialize)]
pub struct DaySummary {
    #[serde(rename = "maxtemp_c")]
    pub max_temp_c: f64,
    #[serde(rename = "mintemp_c")]
    pub min_temp_c: f64,
    pub condition: Condition,
}

/// One hourly forecast record
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastHour {
    /// Local wall-clock timestamp, "YYYY-MM-DD H:MM"; the hour is not
    /// always zero-padded
    pub time: String,
    pub temp_c: f64,
    pub condition: Condition,
}
