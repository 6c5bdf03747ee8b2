//! Pure mappings from raw payload values to display strings.
//!
//! Everything here is deterministic given its inputs; the caller supplies
//! the clock and timezone.

use chrono::{DateTime, FixedOffset, TimeZone};

use crate::model::Unit;

/// Rounds halves toward positive infinity, so `-2.5` becomes `-2`.
fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

/// Whole degrees with unit suffix, e.g. `"68°F"`.
pub fn temperature(celsius: f64, unit: Unit) -> String {
    let degrees = match unit {
        Unit::Celsius => round_half_up(celsius),
        Unit::Fahrenheit => round_half_up(celsius_to_fahrenheit(celsius)),
    };
    format!("{degrees}{unit}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HumidityLevel {
    Low,
    Moderate,
    High,
}

impl HumidityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            HumidityLevel::Low => "Low",
            HumidityLevel::Moderate => "Moderate",
            HumidityLevel::High => "High",
        }
    }
}

impl std::fmt::Display for HumidityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn humidity_level(pct: u8) -> HumidityLevel {
    if pct >= 70 {
        HumidityLevel::High
    } else if pct >= 40 {
        HumidityLevel::Moderate
    } else {
        HumidityLevel::Low
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompassPoint {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

const COMPASS: [CompassPoint; 8] = [
    CompassPoint::N,
    CompassPoint::NE,
    CompassPoint::E,
    CompassPoint::SE,
    CompassPoint::S,
    CompassPoint::SW,
    CompassPoint::W,
    CompassPoint::NW,
];

impl CompassPoint {
    pub fn as_str(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NE => "NE",
            CompassPoint::E => "E",
            CompassPoint::SE => "SE",
            CompassPoint::S => "S",
            CompassPoint::SW => "SW",
            CompassPoint::W => "W",
            CompassPoint::NW => "NW",
        }
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Nearest of the eight compass points; 360° wraps to N.
pub fn compass_point(degrees: f64) -> CompassPoint {
    let index = round_half_up(degrees / 45.0).rem_euclid(8) as usize;
    COMPASS[index]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisibilityRating {
    VeryPoor,
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl VisibilityRating {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisibilityRating::VeryPoor => "Very Poor",
            VisibilityRating::Poor => "Poor",
            VisibilityRating::Moderate => "Moderate",
            VisibilityRating::Good => "Good",
            VisibilityRating::Excellent => "Excellent",
        }
    }
}

impl std::fmt::Display for VisibilityRating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn visibility_rating(meters: u32) -> VisibilityRating {
    match meters {
        10_000.. => VisibilityRating::Excellent,
        4_000.. => VisibilityRating::Good,
        2_000.. => VisibilityRating::Moderate,
        1_000.. => VisibilityRating::Poor,
        _ => VisibilityRating::VeryPoor,
    }
}

/// Day is the half-open interval `[sunrise, sunset)`, all epoch seconds.
pub fn is_daytime(now: i64, sunrise: i64, sunset: i64) -> bool {
    now >= sunrise && now < sunset
}

/// `HH:MM` (24-hour) for an epoch timestamp on the given clock.
pub fn clock_time<Tz>(epoch_secs: i64, tz: &Tz) -> Option<String>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    let utc = DateTime::from_timestamp(epoch_secs, 0)?;
    Some(utc.with_timezone(tz).format("%H:%M").to_string())
}

/// Fixed offset for a provider-reported shift from UTC, if it is in range.
pub fn location_offset(offset_secs: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(offset_secs)
}

pub fn icon_url(base_url: &str, icon: &str) -> String {
    format!("{}/{}@2x.png", base_url.trim_end_matches('/'), icon)
}

/// Upper-cases the first letter of every word.
pub fn title_case(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn fahrenheit_known_values() {
        assert_eq!(temperature(20.0, Unit::Fahrenheit), "68°F");
        assert_eq!(temperature(0.0, Unit::Fahrenheit), "32°F");
        assert_eq!(temperature(-40.0, Unit::Fahrenheit), "-40°F");
        assert_eq!(temperature(21.3, Unit::Fahrenheit), "70°F");
    }

    #[test]
    fn celsius_rounds_directly() {
        assert_eq!(temperature(12.49, Unit::Celsius), "12°C");
        assert_eq!(temperature(12.5, Unit::Celsius), "13°C");
        assert_eq!(temperature(-2.5, Unit::Celsius), "-2°C");
        assert_eq!(temperature(-0.4, Unit::Celsius), "0°C");
    }

    #[test]
    fn humidity_band_boundaries() {
        assert_eq!(humidity_level(69).as_str(), "Moderate");
        assert_eq!(humidity_level(70).as_str(), "High");
        assert_eq!(humidity_level(39).as_str(), "Low");
        assert_eq!(humidity_level(40).as_str(), "Moderate");
        assert_eq!(humidity_level(0), HumidityLevel::Low);
        assert_eq!(humidity_level(100), HumidityLevel::High);
    }

    #[test]
    fn compass_cardinal_points() {
        assert_eq!(compass_point(0.0).as_str(), "N");
        assert_eq!(compass_point(90.0).as_str(), "E");
        assert_eq!(compass_point(225.0).as_str(), "SW");
        assert_eq!(compass_point(360.0).as_str(), "N");
    }

    #[test]
    fn compass_rounds_to_nearest() {
        assert_eq!(compass_point(22.4), CompassPoint::N);
        assert_eq!(compass_point(22.5), CompassPoint::NE);
        assert_eq!(compass_point(337.4), CompassPoint::NW);
        assert_eq!(compass_point(337.5), CompassPoint::N);
        assert_eq!(compass_point(180.0), CompassPoint::S);
    }

    #[test]
    fn visibility_band_boundaries() {
        let cases = [
            (999, "Very Poor"),
            (1000, "Poor"),
            (1999, "Poor"),
            (2000, "Moderate"),
            (3999, "Moderate"),
            (4000, "Good"),
            (9999, "Good"),
            (10000, "Excellent"),
        ];
        for (meters, expected) in cases {
            assert_eq!(visibility_rating(meters).as_str(), expected, "{meters}m");
        }
    }

    #[test]
    fn daytime_is_half_open() {
        assert!(!is_daytime(99, 100, 200));
        assert!(is_daytime(100, 100, 200));
        assert!(is_daytime(199, 100, 200));
        assert!(!is_daytime(200, 100, 200));
    }

    #[test]
    fn clock_time_in_utc_and_offset() {
        // 2024-06-21T04:43:00Z
        let epoch = 1_718_944_980;
        assert_eq!(clock_time(epoch, &Utc).as_deref(), Some("04:43"));

        let cest = location_offset(7200).unwrap();
        assert_eq!(clock_time(epoch, &cest).as_deref(), Some("06:43"));
    }

    #[test]
    fn out_of_range_offset_is_rejected() {
        assert!(location_offset(90_000).is_none());
    }

    #[test]
    fn icon_url_shape() {
        assert_eq!(
            icon_url("https://openweathermap.org/img/wn", "10d"),
            "https://openweathermap.org/img/wn/10d@2x.png"
        );
        assert_eq!(icon_url("http://x/", "01n"), "http://x/01n@2x.png");
    }

    #[test]
    fn title_case_words() {
        assert_eq!(title_case("light rain"), "Light Rain");
        assert_eq!(title_case("overcast clouds"), "Overcast Clouds");
        assert_eq!(title_case(""), "");
    }
}
