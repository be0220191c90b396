//! Wire-facing layer for the weather screen
//!
//! This module contains the provider DTOs, the HTTP client that fetches
//! them, and the repository seam that hands normalized snapshots to the
//! rest of the crate.

pub mod client;
pub mod dto;
pub mod repository;

pub use client::{ClientError, ForecastClient};
pub use dto::ForecastResponse;
pub use repository::{ApiWeatherRepository, FetchError, FetchErrorKind, WeatherRepository};
