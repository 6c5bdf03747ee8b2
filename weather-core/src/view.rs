//! Composition of session state into ready-to-print panels.

use chrono::{DateTime, Local, Utc};

use crate::{
    format,
    model::{ClockZone, Unit, WeatherResult},
    scene::Backdrop,
    session::Session,
};

const UNKNOWN_TIME: &str = "--:--";

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub icon_base_url: String,
    pub clock: ClockZone,
}

impl From<&crate::Config> for ViewOptions {
    fn from(config: &crate::Config) -> Self {
        Self {
            icon_base_url: config.icon_base_url.clone(),
            clock: config.clock,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct View {
    /// Overlay flag; orthogonal to the screen below it.
    pub loading: bool,
    pub screen: Screen,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Searching(SearchPanel),
    Displaying(Box<ResultPanel>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchPanel {
    pub query: String,
    pub suggestions: Vec<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultPanel {
    pub location: String,
    /// Label of the unit toggle, e.g. "°C".
    pub unit: String,
    pub icon_url: String,
    pub icon_alt: String,
    pub temperature: String,
    pub description: String,
    pub humidity: String,
    pub wind: String,
    pub visibility: String,
    pub sunrise: String,
    pub sunset: String,
    pub feels_like: String,
    pub pressure: String,
    pub backdrop: Backdrop,
}

impl View {
    pub fn build(session: &Session, now: DateTime<Utc>, options: &ViewOptions) -> Self {
        let screen = match session.result() {
            Some(result) => Screen::Displaying(Box::new(ResultPanel::new(
                result,
                session.unit(),
                now,
                options,
            ))),
            None => Screen::Searching(SearchPanel {
                query: session.query().to_string(),
                suggestions: session.suggestions().iter().map(|s| s.label()).collect(),
                error: session.error().map(str::to_string),
            }),
        };

        Self {
            loading: session.is_loading(),
            screen,
        }
    }
}

impl ResultPanel {
    pub fn new(result: &WeatherResult, unit: Unit, now: DateTime<Utc>, options: &ViewOptions) -> Self {
        let wind = match result.wind_deg {
            Some(deg) => format!(
                "{} m/s ({})",
                result.wind_speed_mps,
                format::compass_point(deg)
            ),
            None => format!("{} m/s", result.wind_speed_mps),
        };

        let visibility = result
            .visibility_m
            .map(|m| format::visibility_rating(m).to_string())
            .unwrap_or_else(|| "Unavailable".to_string());

        Self {
            location: result.location_name.clone(),
            unit: unit.to_string(),
            icon_url: format::icon_url(&options.icon_base_url, &result.icon),
            icon_alt: result.description.clone(),
            temperature: format::temperature(result.temperature_c, unit),
            description: format::title_case(&result.description),
            humidity: format!(
                "{}% ({})",
                result.humidity_pct,
                format::humidity_level(result.humidity_pct)
            ),
            wind,
            visibility,
            sunrise: clock(result.sunrise, result, options.clock),
            sunset: clock(result.sunset, result, options.clock),
            feels_like: format::temperature(result.feels_like_c, unit),
            pressure: format!("{} hPa", result.pressure_hpa),
            backdrop: Backdrop::for_result(result, now.timestamp()),
        }
    }
}

fn clock(epoch: i64, result: &WeatherResult, zone: ClockZone) -> String {
    let formatted = match zone {
        ClockZone::Device => format::clock_time(epoch, &Local),
        ClockZone::Location => format::location_offset(result.timezone_offset_secs)
            .and_then(|offset| format::clock_time(epoch, &offset)),
    };
    formatted.unwrap_or_else(|| UNKNOWN_TIME.to_string())
}
