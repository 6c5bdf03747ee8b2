use serde::{Deserialize, Serialize};

/// Temperature unit used for display. Payloads are always fetched in metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl Unit {
    pub fn toggle(self) -> Self {
        match self {
            Unit::Celsius => Unit::Fahrenheit,
            Unit::Fahrenheit => Unit::Celsius,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "C",
            Unit::Fahrenheit => "F",
        }
    }
}

impl std::fmt::Display for Unit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "°{}", self.symbol())
    }
}

/// Which clock sunrise/sunset times are rendered against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockZone {
    /// The machine's local clock.
    #[default]
    Device,
    /// The queried location's UTC offset, as reported by the provider.
    Location,
}

/// A geocoding candidate for partial place-name input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub country: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl Suggestion {
    /// "name, country[, state]"
    pub fn label(&self) -> String {
        match self.state.as_deref().filter(|s| !s.is_empty()) {
            Some(state) => format!("{}, {}, {}", self.name, self.country, state),
            None => format!("{}, {}", self.name, self.country),
        }
    }
}

/// What a primary weather fetch is keyed by.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    ByName(String),
    ByCoordinates { latitude: f64, longitude: f64 },
}

impl From<&Suggestion> for WeatherQuery {
    fn from(s: &Suggestion) -> Self {
        WeatherQuery::ByCoordinates {
            latitude: s.latitude,
            longitude: s.longitude,
        }
    }
}

/// Normalized snapshot of current conditions for one location at fetch time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    pub location_name: String,
    /// Condition group, e.g. "Clear", "Rain".
    pub condition: String,
    pub description: String,
    pub icon: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u32,
    pub wind_speed_mps: f64,
    pub wind_deg: Option<f64>,
    pub visibility_m: Option<u32>,
    /// Epoch seconds.
    pub sunrise: i64,
    /// Epoch seconds.
    pub sunset: i64,
    /// Shift from UTC in seconds for the queried location.
    pub timezone_offset_secs: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paris() -> Suggestion {
        Suggestion {
            name: "Paris".into(),
            country: "FR".into(),
            state: None,
            latitude: 48.85,
            longitude: 2.35,
        }
    }

    #[test]
    fn label_without_state() {
        assert_eq!(paris().label(), "Paris, FR");
    }

    #[test]
    fn label_with_state() {
        let s = Suggestion {
            name: "Paris".into(),
            country: "US".into(),
            state: Some("Texas".into()),
            latitude: 33.66,
            longitude: -95.55,
        };
        assert_eq!(s.label(), "Paris, US, Texas");
    }

    #[test]
    fn empty_state_is_ignored() {
        let mut s = paris();
        s.state = Some(String::new());
        assert_eq!(s.label(), "Paris, FR");
    }

    #[test]
    fn unit_toggles_both_ways() {
        assert_eq!(Unit::default(), Unit::Celsius);
        assert_eq!(Unit::Celsius.toggle(), Unit::Fahrenheit);
        assert_eq!(Unit::Fahrenheit.toggle(), Unit::Celsius);
        assert_eq!(Unit::Fahrenheit.to_string(), "°F");
    }

    #[test]
    fn suggestion_query_uses_coordinates() {
        let q = WeatherQuery::from(&paris());
        assert_eq!(
            q,
            WeatherQuery::ByCoordinates {
                latitude: 48.85,
                longitude: 2.35
            }
        );
    }

    #[test]
    fn suggestion_deserializes_geocoding_entry() {
        let s: Suggestion = serde_json::from_str(
            r#"{"name":"London","lat":51.5073,"lon":-0.1276,"country":"GB","state":"England"}"#,
        )
        .unwrap();
        assert_eq!(s.label(), "London, GB, England");
        assert_eq!(s.longitude, -0.1276);
    }
}
