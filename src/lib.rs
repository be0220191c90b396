//! Weather screen core library
//!
//! Fetches a 3-day forecast from WeatherAPI.com and turns it into what a
//! single weather screen renders: current conditions, a rolling 24-hour
//! strip anchored to the location's own local time, and a localized daily
//! outlook. A small view-model drives the screen through
//! Loading/Success/Error with newest-wins refresh semantics.
//!
//! Rendering, navigation, and dependency wiring belong to the embedding
//! application; this crate ends at [`WeatherState`].

pub mod config;
pub mod data;
pub mod domain;
pub mod state;

pub use config::{ConfigError, WeatherConfig};
pub use data::client::{ClientError, ForecastClient};
pub use data::repository::{ApiWeatherRepository, FetchError, FetchErrorKind, WeatherRepository};
pub use domain::normalize::{normalize, normalize_at, NormalizeError};
pub use domain::{DayItem, DisplayLocale, HourItem, LocationQuery, WeatherSnapshot};
pub use state::{ErrorMessages, WeatherState, WeatherViewModel};
