//! WeatherAPI.com forecast client
//!
//! This module fetches the raw multi-day forecast payload. It knows nothing
//! about windowing or labels; normalization happens in
//! [`crate::domain::normalize`].

use reqwest::Client;
use thiserror::Error;

use crate::data::dto::ForecastResponse;
use crate::domain::LocationQuery;

/// Base URL for the WeatherAPI.com forecast endpoint
pub const FORECAST_URL: &str = "https://api.weatherapi.com/v1/forecast.json";

/// Forecast horizon requested from the provider, in days
const FORECAST_DAYS: &str = "3";
/// Longest error-body excerpt carried in an error value
const MAX_ERROR_BODY: usize = 200;

/// Errors that can occur when fetching a forecast
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("forecast request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    /// Failed to parse the JSON response body
    #[error("failed to parse forecast response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Client for fetching forecast data from WeatherAPI.com
#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: Client,
    api_key: String,
    base_url: String,
    lang: &'static str,
}

impl ForecastClient {
    /// Creates a new client with the production endpoint and Russian
    /// condition texts
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: FORECAST_URL.to_string(),
            lang: "ru",
        }
    }

    /// Creates a client around a custom HTTP client
    #[allow(dead_code)]
    pub fn with_client(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: FORECAST_URL.to_string(),
            lang: "ru",
        }
    }

    /// Overrides the endpoint; used by tests and staging setups
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the language the provider localizes condition texts into
    pub fn with_lang(mut self, lang: &'static str) -> Self {
        self.lang = lang;
        self
    }

    /// Fetch the 3-day forecast for a location
    ///
    /// One HTTP request per call, no retries; refresh policy belongs to the
    /// caller. Air-quality data and alerts are never requested because the
    /// screen does not show them.
    ///
    /// # Arguments
    /// * `query` - The place to forecast, as a city name or coordinates
    ///
    /// # Returns
    /// * `Ok(ForecastResponse)` - The raw provider payload
    /// * `Err(ClientError)` - If the request, the provider, or parsing fails
    pub async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<ForecastResponse, ClientError> {
        let q = query.to_string();
        tracing::debug!(query = %q, "requesting forecast");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", q.as_str()),
                ("days", FORECAST_DAYS),
                ("aqi", "no"),
                ("alerts", "no"),
                ("lang", self.lang),
            ])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "forecast request rejected");
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: truncate_body(&body),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Keeps error bodies short enough to carry around and log
fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_ERROR_BODY {
        return body.to_string();
    }
    // back off to a char boundary so multi-byte text cannot split
    let mut end = MAX_ERROR_BODY;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
