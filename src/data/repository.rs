//! Repository seam between transport and the domain model
//!
//! The screen's state holder talks to [`WeatherRepository`] and never to the
//! HTTP client directly, so tests can script outcomes without a network.

use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

use crate::data::client::{ClientError, ForecastClient};
use crate::domain::normalize::{normalize, NormalizeError};
use crate::domain::{DisplayLocale, LocationQuery, WeatherSnapshot};

/// Errors from a full fetch-then-normalize cycle
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

/// Coarse classification of a failed refresh, used to pick the dialog
/// message shown to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchErrorKind {
    /// The network could not be reached at all
    NoConnection,
    /// The provider was reached but the exchange failed
    ServiceFailure,
    /// Anything else; shown with the error's own message
    Other,
}

impl FetchError {
    /// Buckets this failure for user display
    ///
    /// Connect and timeout failures mean "no internet"; a rejected request
    /// or an undecodable body means the service misbehaved; broken response
    /// content falls through with its own description.
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Client(ClientError::Request(e)) if e.is_connect() || e.is_timeout() => {
                FetchErrorKind::NoConnection
            }
            FetchError::Client(_) => FetchErrorKind::ServiceFailure,
            FetchError::Normalize(_) => FetchErrorKind::Other,
        }
    }
}

/// Source of normalized weather snapshots
#[async_trait]
pub trait WeatherRepository: Send + Sync + Debug {
    /// Fetches and normalizes the forecast for a location
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError>;
}

/// Production repository: the WeatherAPI.com client plus the locale-aware
/// normalizer
#[derive(Debug, Clone)]
pub struct ApiWeatherRepository {
    client: ForecastClient,
    locale: DisplayLocale,
}

impl ApiWeatherRepository {
    pub fn new(client: ForecastClient, locale: DisplayLocale) -> Self {
        Self { client, locale }
    }
}

#[async_trait]
impl WeatherRepository for ApiWeatherRepository {
    async fn fetch_weather(&self, query: &LocationQuery) -> Result<WeatherSnapshot, FetchError> {
        let response = self.client.fetch_forecast(query).await?;
        Ok(normalize(&response, self.locale)?)
    }
}
