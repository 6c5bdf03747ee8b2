use crate::{format::is_daytime, model::WeatherResult};

/// Broad condition family a backdrop is drawn for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scene {
    Clear,
    Clouds,
    Rain,
    Thunderstorm,
    Snow,
    Atmosphere,
    Unknown,
}

impl Scene {
    /// Map an OpenWeather condition group ("Clear", "Drizzle", "Haze", ...).
    pub fn from_condition(main: &str) -> Self {
        match main.to_ascii_lowercase().as_str() {
            "clear" => Scene::Clear,
            "clouds" => Scene::Clouds,
            "rain" | "drizzle" => Scene::Rain,
            "thunderstorm" => Scene::Thunderstorm,
            "snow" => Scene::Snow,
            "mist" | "smoke" | "haze" | "dust" | "fog" | "sand" | "ash" | "squall" | "tornado" => {
                Scene::Atmosphere
            }
            _ => Scene::Unknown,
        }
    }
}

/// Background keyed by condition and day/night.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backdrop {
    pub scene: Scene,
    pub is_day: bool,
}

impl Backdrop {
    /// Day/night is judged against `now`; it goes stale if the result is kept across sunrise/sunset.
    pub fn for_result(result: &WeatherResult, now: i64) -> Self {
        Self {
            scene: Scene::from_condition(&result.condition),
            is_day: is_daytime(now, result.sunrise, result.sunset),
        }
    }

    pub fn glyph(&self) -> &'static str {
        match (self.scene, self.is_day) {
            (Scene::Clear, true) => "☀",
            (Scene::Clear, false) => "☾",
            (Scene::Clouds, _) => "☁",
            (Scene::Rain, _) => "☂",
            (Scene::Thunderstorm, _) => "⚡",
            (Scene::Snow, _) => "❄",
            (Scene::Atmosphere, _) => "≋",
            (Scene::Unknown, true) => "·",
            (Scene::Unknown, false) => "∙",
        }
    }
}
