//! Screen state and the view-model driving it
//!
//! The weather screen is always in exactly one of three states and moves
//! between them only through [`WeatherViewModel::refresh`]: every refresh
//! publishes `Loading` first and then exactly one of `Success` or `Error`.
//! State transitions are published over a tokio watch channel so the
//! rendering side can either poll the latest value or await changes.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::data::repository::{FetchError, FetchErrorKind, WeatherRepository};
use crate::domain::{LocationQuery, WeatherSnapshot};

/// What the weather screen is currently showing
///
/// A closed set: consumers match exhaustively, and there is no implicit
/// empty or null state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherState {
    /// A refresh is in flight; show placeholders
    Loading,
    /// The latest refresh produced a snapshot
    Success(WeatherSnapshot),
    /// The latest refresh failed; show a dialog with this message
    Error(String),
}

/// User-facing strings for the error dialog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorMessages {
    /// Shown when the network is unreachable
    pub no_connection: &'static str,
    /// Shown when the provider misbehaved
    pub service_failure: &'static str,
    /// Shown when a failure carries no description of its own
    pub fallback: &'static str,
}

impl ErrorMessages {
    /// Russian dialog strings; the product default
    pub const RUSSIAN: Self = Self {
        no_connection: "Нет подключения к интернету",
        service_failure: "Ошибка сети. Попробуйте позже",
        fallback: "Не удалось загрузить погоду",
    };

    /// English dialog strings
    pub const ENGLISH: Self = Self {
        no_connection: "No internet connection",
        service_failure: "Network error. Try again later",
        fallback: "Failed to load weather",
    };
}

impl Default for ErrorMessages {
    fn default() -> Self {
        Self::RUSSIAN
    }
}

/// Picks the dialog message for a failed refresh
fn error_message(error: &FetchError, messages: &ErrorMessages) -> String {
    match error.kind() {
        FetchErrorKind::NoConnection => messages.no_connection.to_string(),
        FetchErrorKind::ServiceFailure => messages.service_failure.to_string(),
        FetchErrorKind::Other => {
            let own = error.to_string();
            if own.is_empty() {
                messages.fallback.to_string()
            } else {
                own
            }
        }
    }
}

/// Drives the weather screen: owns the repository and publishes state
/// transitions
///
/// Each refresh claims a new generation number; a fetch whose generation is
/// no longer current when it completes is discarded without publishing, so
/// the newest request wins even when responses arrive out of order.
#[derive(Debug)]
pub struct WeatherViewModel {
    repository: Arc<dyn WeatherRepository>,
    query: LocationQuery,
    messages: ErrorMessages,
    shared: Arc<Shared>,
}

/// State shared between the view-model and its in-flight refresh tasks
#[derive(Debug)]
struct Shared {
    state_tx: watch::Sender<WeatherState>,
    generation: AtomicU64,
}

impl WeatherViewModel {
    /// Creates a view-model for the default location; the screen starts in
    /// [`WeatherState::Loading`]
    pub fn new(repository: Arc<dyn WeatherRepository>) -> Self {
        Self::with_query(repository, LocationQuery::default())
    }

    /// Creates a view-model pinned to a specific location
    pub fn with_query(repository: Arc<dyn WeatherRepository>, query: LocationQuery) -> Self {
        let (state_tx, _) = watch::channel(WeatherState::Loading);
        Self {
            repository,
            query,
            messages: ErrorMessages::default(),
            shared: Arc::new(Shared {
                state_tx,
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Overrides the error dialog strings
    pub fn with_messages(mut self, messages: ErrorMessages) -> Self {
        self.messages = messages;
        self
    }

    /// Returns the current screen state
    pub fn state(&self) -> WeatherState {
        self.shared.state_tx.borrow().clone()
    }

    /// Subscribes to state transitions
    pub fn subscribe(&self) -> watch::Receiver<WeatherState> {
        self.shared.state_tx.subscribe()
    }

    /// Starts a refresh
    ///
    /// Publishes [`WeatherState::Loading`] before returning, fetches in the
    /// background, and publishes the outcome unless a newer refresh claimed
    /// the screen in the meantime.
    ///
    /// # Returns
    /// The handle of the background task, so callers can await completion.
    /// Dropping the handle does not cancel the fetch.
    pub fn refresh(&self) -> JoinHandle<()> {
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.shared.state_tx.send_replace(WeatherState::Loading);

        let repository = Arc::clone(&self.repository);
        let query = self.query.clone();
        let messages = self.messages;
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            let result = repository.fetch_weather(&query).await;

            // A newer refresh owns the screen now; this result is stale
            if shared.generation.load(Ordering::SeqCst) != generation {
                tracing::debug!(generation, "discarding superseded refresh result");
                return;
            }

            let next = match result {
                Ok(snapshot) => WeatherState::Success(snapshot),
                Err(error) => {
                    tracing::warn!(error = %error, "refresh failed");
                    WeatherState::Error(error_message(&error, &messages))
                }
            };
            shared.state_tx.send_replace(next);
        })
    }
}
