//! Configuration for the weather screen core
//!
//! The only secret is the provider API key; everything else has sensible
//! production defaults that tests and staging setups can override. Nothing
//! is read from disk and nothing is persisted.

use std::env;
use std::sync::Arc;
use thiserror::Error;

use crate::data::client::{ForecastClient, FORECAST_URL};
use crate::data::repository::ApiWeatherRepository;
use crate::domain::{DisplayLocale, LocationQuery};
use crate::state::{ErrorMessages, WeatherViewModel};

/// Environment variable holding the WeatherAPI.com key
pub const API_KEY_VAR: &str = "WEATHER_API_KEY";

/// Errors that can occur when building a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The API key environment variable is unset or blank
    #[error("WEATHER_API_KEY is not set")]
    MissingApiKey,
}

/// Static configuration for the forecast pipeline
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// WeatherAPI.com key
    pub api_key: String,
    /// Forecast endpoint
    pub base_url: String,
    /// Language for provider texts and display labels
    pub locale: DisplayLocale,
    /// Strings for the error dialog
    pub messages: ErrorMessages,
    /// Location used when the caller supplies none
    pub default_query: LocationQuery,
}

impl WeatherConfig {
    /// Creates a configuration with production defaults around the given key
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: FORECAST_URL.to_string(),
            locale: DisplayLocale::default(),
            messages: ErrorMessages::default(),
            default_query: LocationQuery::default(),
        }
    }

    /// Reads the API key from the `WEATHER_API_KEY` environment variable
    ///
    /// # Returns
    /// * `Ok(WeatherConfig)` - Configuration with production defaults
    /// * `Err(ConfigError)` - If the variable is unset or blank
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var(API_KEY_VAR).unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }
        Ok(Self::new(api_key))
    }

    /// Overrides the forecast endpoint
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the display locale
    pub fn with_locale(mut self, locale: DisplayLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Overrides the error dialog strings
    pub fn with_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Overrides the fallback location
    pub fn with_default_query(mut self, query: LocationQuery) -> Self {
        self.default_query = query;
        self
    }

    /// Builds the HTTP client this configuration describes
    pub fn client(&self) -> ForecastClient {
        ForecastClient::new(self.api_key.clone())
            .with_base_url(self.base_url.clone())
            .with_lang(self.locale.lang)
    }

    /// Wires the whole pipeline: client, repository and view-model
    ///
    /// The screen starts in the loading state; call
    /// [`WeatherViewModel::refresh`] to populate it.
    pub fn view_model(&self) -> WeatherViewModel {
        let repository = Arc::new(ApiWeatherRepository::new(self.client(), self.locale));
        WeatherViewModel::with_query(repository, self.default_query.clone())
            .with_messages(self.messages)
    }
}
