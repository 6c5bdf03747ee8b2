use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    error::ProviderError,
    model::{Suggestion, WeatherQuery, WeatherResult},
};

pub mod openweather;

/// Maximum number of geocoding candidates kept per lookup.
pub const SUGGESTION_LIMIT: usize = 5;

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Geocoding candidates for a partial place name, in provider order.
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError>;

    /// Current conditions for a place name or coordinate pair.
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, ProviderError>;
}
