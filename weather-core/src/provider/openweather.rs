use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

use crate::{
    Config,
    error::ProviderError,
    model::{Suggestion, WeatherQuery, WeatherResult},
    provider::SUGGESTION_LIMIT,
};

use super::WeatherProvider;

const GEOCODE_PATH: &str = "/geo/1.0/direct";
const WEATHER_PATH: &str = "/data/2.5/weather";
const NOT_FOUND_FALLBACK: &str = "City not found.";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: String, base_url: impl Into<String>) -> Self {
        Self::with_client(api_key, base_url, Client::new())
    }

    pub fn with_client(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http,
        }
    }

    /// Build a provider from the key, base URL and timeout in `config`.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?.to_owned();

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self::with_client(api_key, config.base_url.as_str(), http))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    #[instrument(skip(self))]
    async fn fetch_suggestions(&self, query: &str) -> Result<Vec<Suggestion>, ProviderError> {
        let limit = SUGGESTION_LIMIT.to_string();

        let res = self
            .http
            .get(self.url(GEOCODE_PATH))
            .query(&[
                ("q", query),
                ("limit", limit.as_str()),
                ("appid", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "geocoding request failed");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&body)
                    .unwrap_or_else(|| format!("Geocoding failed with status {status}")),
            });
        }

        let mut suggestions: Vec<Suggestion> = serde_json::from_str(&body)?;
        suggestions.truncate(SUGGESTION_LIMIT);

        debug!(count = suggestions.len(), "geocoding candidates received");
        Ok(suggestions)
    }

    #[instrument(skip(self))]
    async fn fetch_weather(&self, query: &WeatherQuery) -> Result<WeatherResult, ProviderError> {
        let request = self.http.get(self.url(WEATHER_PATH));
        let request = match query {
            WeatherQuery::ByName(name) => request.query(&[("q", name.as_str())]),
            WeatherQuery::ByCoordinates {
                latitude,
                longitude,
            } => request.query(&[("lat", latitude), ("lon", longitude)]),
        };

        let res = request
            .query(&[("appid", self.api_key.as_str()), ("units", "metric")])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        if !status.is_success() {
            warn!(%status, body = %truncate_body(&body), "weather request failed");
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message: error_message(&body).unwrap_or_else(|| NOT_FOUND_FALLBACK.to_string()),
            });
        }

        let parsed: OwCurrentResponse = serde_json::from_str(&body)?;
        let result = parsed.into_result()?;

        info!(
            location = %result.location_name,
            temp = result.temperature_c,
            "weather data fetched"
        );
        Ok(result)
    }
}

#[derive(Debug, Deserialize)]
struct OwErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// The `message` field of an error body, if it has a non-empty one.
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<OwErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    #[serde(default)]
    visibility: Option<u32>,
    sys: OwSys,
    #[serde(default)]
    timezone: i32,
}

impl OwCurrentResponse {
    fn into_result(self) -> Result<WeatherResult, ProviderError> {
        let condition = self.weather.into_iter().next().ok_or_else(|| {
            ProviderError::Malformed("response contained no weather conditions".into())
        })?;

        Ok(WeatherResult {
            location_name: self.name,
            condition: condition.main,
            description: condition.description,
            icon: condition.icon,
            temperature_c: self.main.temp,
            feels_like_c: self.main.feels_like,
            humidity_pct: self.main.humidity,
            pressure_hpa: self.main.pressure,
            wind_speed_mps: self.wind.speed,
            wind_deg: self.wind.deg,
            visibility_m: self.visibility,
            sunrise: self.sys.sunrise,
            sunset: self.sys.sunset,
            timezone_offset_secs: self.timezone,
        })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
