//! Core domain models for the weather screen
//!
//! This module contains the UI-ready types produced by the normalization
//! pipeline, plus the location and locale inputs that shape them. Everything
//! here is plain data: no network types, no provider field names.

pub mod normalize;

pub use normalize::{normalize, normalize_at, NormalizeError};

use chrono::Locale;
use std::fmt;

/// Everything the weather screen renders, in final display form
///
/// Numeric fields are whole units (degrees, km/h, millibars) because that is
/// what the screen shows; fractional precision is dropped during
/// normalization, not by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherSnapshot {
    /// Resolved place name reported by the provider
    pub city_name: String,
    /// Current temperature in whole degrees Celsius
    pub temp_c: i32,
    /// Feels-like temperature in whole degrees Celsius
    pub feels_like_c: i32,
    /// Short text for the current condition, in the requested language
    pub condition_text: String,
    /// Absolute URL of the current condition icon
    pub icon_url: String,
    /// Wind speed in whole km/h
    pub wind_kph: i32,
    /// Compass direction the wind blows from (e.g. "NW")
    pub wind_dir: String,
    /// Relative humidity percentage (0-100)
    pub humidity_pct: u8,
    /// Barometric pressure in whole millibars
    pub pressure_mb: i32,
    /// UV index, whole units
    pub uv_index: i32,
    /// Rolling window of upcoming hours, at most 24 entries
    pub hourly: Vec<HourItem>,
    /// Daily outlook, at most 7 entries, nearest day first
    pub daily: Vec<DayItem>,
}

/// One entry of the hourly forecast strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourItem {
    /// Local wall-clock label, always zero-padded "HH:MM"
    pub time: String,
    /// Forecast temperature in whole degrees Celsius
    pub temp_c: i32,
    /// Absolute URL of the condition icon for this hour
    pub icon_url: String,
}

/// One entry of the daily forecast list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayItem {
    /// "Today"/"Tomorrow" in the display language, or a capitalized
    /// weekday name for later days
    pub label: String,
    /// Localized short date, e.g. "26 ноя"
    pub date: String,
    /// Daily maximum in whole degrees Celsius
    pub max_temp_c: i32,
    /// Daily minimum in whole degrees Celsius
    pub min_temp_c: i32,
    /// Absolute URL of the representative condition icon
    pub icon_url: String,
}

/// Which place a forecast request targets
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    /// Free-text place name, e.g. "Moscow" or "Paris"
    City(String),
    /// Explicit coordinates, sent to the provider as "lat,lon"
    Coords { lat: f64, lon: f64 },
}

impl LocationQuery {
    /// Latitude of the fallback location (central Moscow)
    pub const DEFAULT_LAT: f64 = 55.7569;
    /// Longitude of the fallback location (central Moscow)
    pub const DEFAULT_LON: f64 = 37.6151;
}

impl Default for LocationQuery {
    /// Falls back to fixed Moscow coordinates when the caller has no
    /// better location source
    fn default() -> Self {
        Self::Coords {
            lat: Self::DEFAULT_LAT,
            lon: Self::DEFAULT_LON,
        }
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::City(name) => f.write_str(name),
            Self::Coords { lat, lon } => write!(f, "{},{}", lat, lon),
        }
    }
}

/// Localization inputs for user-facing labels
///
/// Passed explicitly wherever labels are produced, so tests can pin the
/// language instead of inheriting whatever the host environment uses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplayLocale {
    /// chrono locale used for weekday and month names
    pub time_locale: Locale,
    /// Language code sent to the forecast provider
    pub lang: &'static str,
    /// Label for the forecast day matching the location's current date
    pub today: &'static str,
    /// Label for the day after that
    pub tomorrow: &'static str,
}

impl DisplayLocale {
    /// Russian labels; the product default
    pub const RUSSIAN: Self = Self {
        time_locale: Locale::ru_RU,
        lang: "ru",
        today: "Сегодня",
        tomorrow: "Завтра",
    };

    /// English labels
    pub const ENGLISH: Self = Self {
        time_locale: Locale::en_US,
        lang: "en",
        today: "Today",
        tomorrow: "Tomorrow",
    };
}

impl Default for DisplayLocale {
    fn default() -> Self {
        Self::RUSSIAN
    }
}
