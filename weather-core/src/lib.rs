//! Core library for the `weather` lookup client.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider behind a `WeatherProvider` seam
//! - The search session: debounced suggestions, primary fetch, unit toggle
//! - Pure formatting of payload values and the panels built from them
//!
//! It is used by `weather-cli`, but can also be reused by other front ends.

pub mod config;
pub mod debounce;
pub mod error;
pub mod format;
pub mod model;
pub mod provider;
pub mod scene;
pub mod session;
pub mod view;

pub use config::Config;
pub use error::{ProviderError, SearchError};
pub use model::{ClockZone, Suggestion, Unit, WeatherQuery, WeatherResult};
pub use provider::{WeatherProvider, openweather::OpenWeatherProvider};
pub use session::{FetchStatus, Mode, Session, qualifies};
pub use view::{ResultPanel, Screen, SearchPanel, View, ViewOptions};
