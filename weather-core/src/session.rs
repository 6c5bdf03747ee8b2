use std::{sync::Arc, time::Duration};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    Config,
    debounce::Debouncer,
    error::{MIN_QUERY_CHARS, ProviderError, SearchError},
    model::{Suggestion, Unit, WeatherQuery, WeatherResult},
    provider::WeatherProvider,
};

/// Whether the session is collecting input or showing a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Searching,
    Displaying,
}

/// Lifecycle of the most recent primary fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

/// A finished suggestion lookup, tagged with the query generation it was issued for.
#[derive(Debug)]
pub struct SuggestionEvent {
    generation: u64,
    query: String,
    outcome: Result<Vec<Suggestion>, ProviderError>,
}

/// Whether `query` is long enough to look up, once trimmed.
pub fn qualifies(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Search/display state for one user.
///
/// Query edits debounce suggestion lookups onto a background task; the
/// results come back through [`suggestion_event`](Session::suggestion_event)
/// and only the one matching the current query generation is applied.
#[derive(Debug)]
pub struct Session {
    provider: Arc<dyn WeatherProvider>,
    debounce: Debouncer,
    query: String,
    suggestions: Vec<Suggestion>,
    result: Option<WeatherResult>,
    unit: Unit,
    error: Option<String>,
    status: FetchStatus,
    generation: u64,
    events_tx: mpsc::UnboundedSender<SuggestionEvent>,
    events_rx: mpsc::UnboundedReceiver<SuggestionEvent>,
}

impl Session {
    pub fn new(provider: Arc<dyn WeatherProvider>, debounce: Duration, unit: Unit) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            provider,
            debounce: Debouncer::new(debounce),
            query: String::new(),
            suggestions: Vec::new(),
            result: None,
            unit,
            error: None,
            status: FetchStatus::Idle,
            generation: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn from_config(provider: Arc<dyn WeatherProvider>, config: &Config) -> Self {
        Self::new(provider, config.debounce(), config.unit)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    pub fn result(&self) -> Option<&WeatherResult> {
        self.result.as_ref()
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == FetchStatus::Loading
    }

    pub fn mode(&self) -> Mode {
        if self.result.is_some() {
            Mode::Displaying
        } else {
            Mode::Searching
        }
    }

    /// Whether a suggestion lookup is waiting out the debounce or still in flight.
    pub fn suggestions_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Drop any scheduled or in-flight lookup and ignore its result.
    pub fn cancel_suggestions(&mut self) {
        self.generation += 1;
        self.debounce.cancel();
    }

    /// Replace the query text. Requires a tokio runtime.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query = text.into();
        self.refresh_suggestions();
    }

    /// Re-evaluate the suggestion effect after the query or result changed.
    fn refresh_suggestions(&mut self) {
        self.generation += 1;

        if !qualifies(&self.query) || self.result.is_some() {
            self.debounce.cancel();
            self.suggestions.clear();
            return;
        }

        let generation = self.generation;
        let query = self.query.trim().to_string();
        let provider = Arc::clone(&self.provider);
        let tx = self.events_tx.clone();

        debug!(%query, generation, "scheduling suggestion lookup");
        self.debounce.schedule(async move {
            let outcome = provider.fetch_suggestions(&query).await;
            // Receiver is gone only if the session was dropped.
            let _ = tx.send(SuggestionEvent {
                generation,
                query,
                outcome,
            });
        });
    }

    /// Wait for the next finished suggestion lookup.
    ///
    /// Never resolves if none is pending, so it is meant for `select!` loops.
    pub async fn suggestion_event(&mut self) -> Option<SuggestionEvent> {
        self.events_rx.recv().await
    }

    /// Apply a finished lookup. Returns `false` if it was stale and discarded.
    pub fn apply_suggestions(&mut self, event: SuggestionEvent) -> bool {
        if event.generation != self.generation || self.result.is_some() {
            debug!(
                query = %event.query,
                generation = event.generation,
                current = self.generation,
                "discarding stale suggestions"
            );
            return false;
        }

        match event.outcome {
            Ok(suggestions) => {
                debug!(query = %event.query, count = suggestions.len(), "suggestions updated");
                self.suggestions = suggestions;
            }
            Err(err) => {
                warn!(query = %event.query, error = %err, "suggestion lookup failed");
                self.error = Some(SearchError::Suggestions(err).to_string());
            }
        }
        true
    }

    /// Wait for one lookup and apply it.
    pub async fn next_suggestions(&mut self) -> bool {
        match self.suggestion_event().await {
            Some(event) => self.apply_suggestions(event),
            None => false,
        }
    }

    /// Apply every lookup that already finished, without waiting.
    pub fn drain_suggestions(&mut self) -> bool {
        let mut applied = false;
        while let Ok(event) = self.events_rx.try_recv() {
            applied |= self.apply_suggestions(event);
        }
        applied
    }

    /// Submit the typed query.
    pub async fn search(&mut self) -> Result<(), SearchError> {
        let trimmed = self.query.trim().to_string();
        if !qualifies(&trimmed) {
            return Err(self.fail_locally(SearchError::QueryTooShort));
        }

        self.fetch_weather(WeatherQuery::ByName(trimmed), String::new())
            .await
    }

    /// Fetch by the coordinates of the suggestion at `index` (zero-based).
    pub async fn select_suggestion(&mut self, index: usize) -> Result<(), SearchError> {
        let Some(suggestion) = self.suggestions.get(index).cloned() else {
            return Err(self.fail_locally(SearchError::NoSuchSuggestion(index + 1)));
        };

        self.fetch_weather(WeatherQuery::from(&suggestion), suggestion.label())
            .await
    }

    fn fail_locally(&mut self, err: SearchError) -> SearchError {
        self.error = Some(err.to_string());
        err
    }

    async fn fetch_weather(&mut self, query: WeatherQuery, label: String) -> Result<(), SearchError> {
        self.status = FetchStatus::Loading;
        self.error = None;

        match self.provider.fetch_weather(&query).await {
            Ok(result) => {
                info!(location = %result.location_name, "showing weather");
                self.result = Some(result);
                self.query = label;
                self.suggestions.clear();
                self.error = None;
                self.refresh_suggestions();
                self.status = FetchStatus::Succeeded;
                Ok(())
            }
            Err(err) => {
                warn!(?query, error = %err, "weather lookup failed");
                let err = SearchError::Weather(err);
                self.error = Some(err.to_string());
                self.status = FetchStatus::Failed;
                Err(err)
            }
        }
    }

    pub fn toggle_unit(&mut self) -> Unit {
        self.unit = self.unit.toggle();
        self.unit
    }

    pub fn set_unit(&mut self, unit: Unit) {
        self.unit = unit;
    }

    /// Drop the current result and go back to an empty search. Unit is kept.
    pub fn new_search(&mut self) {
        self.result = None;
        self.query.clear();
        self.error = None;
        self.status = FetchStatus::Idle;
        self.refresh_suggestions();
    }
}
