use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair, as supplied by the location provider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Temperature block shared by current-weather and forecast payloads.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Main {
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

/// One weather-condition entry (the API delivers a list per reading).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub description: String,
    pub icon: String,
}

impl Condition {
    /// URL of the condition icon on OpenWeather's image host.
    pub fn icon_url(&self) -> String {
        format!("https://openweathermap.org/img/wn/{}@2x.png", self.icon)
    }
}

/// Decoded current-weather reading for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub name: String,
    pub main: Main,
    pub weather: Vec<Condition>,
}

impl CurrentWeather {
    pub fn current_temp(&self) -> f64 {
        self.main.temp
    }

    pub fn min_temp(&self) -> f64 {
        self.main.temp_min
    }

    pub fn max_temp(&self) -> f64 {
        self.main.temp_max
    }

    /// Display condition: first entry's description, title-cased.
    pub fn condition(&self) -> String {
        condition_label(&self.weather)
    }

    pub fn icon_url(&self) -> Option<String> {
        self.weather.first().map(Condition::icon_url)
    }
}

/// Raw 5-day forecast payload: one entry roughly every 3 hours.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastEntry>,
}

/// A single timestamped forecast sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastEntry {
    /// Epoch seconds, UTC.
    pub dt: i64,
    pub main: Main,
    pub weather: Vec<Condition>,
}

impl ForecastEntry {
    pub(crate) fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.dt, 0).unwrap_or(DateTime::UNIX_EPOCH)
    }
}

/// One aggregated forecast entry per calendar day.
///
/// `temp` is the arithmetic mean of all same-day samples; `temp_min` /
/// `temp_max` are the group-wide extremes. `dt` and `weather` come from the
/// day's representative sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastDay {
    pub dt: i64,
    pub main: Main,
    pub weather: Vec<Condition>,
}

impl ForecastDay {
    pub fn temp(&self) -> f64 {
        self.main.temp
    }

    pub fn condition(&self) -> String {
        condition_label(&self.weather)
    }

    pub fn icon_url(&self) -> Option<String> {
        self.weather.first().map(Condition::icon_url)
    }

    /// Day-of-week label for display, e.g. "Monday".
    pub fn weekday(&self) -> String {
        let dt = DateTime::from_timestamp(self.dt, 0).unwrap_or(DateTime::UNIX_EPOCH);
        dt.format("%A").to_string()
    }
}

fn condition_label(weather: &[Condition]) -> String {
    weather
        .first()
        .map(|w| title_case(&w.description))
        .unwrap_or_else(|| "Unknown".to_string())
}

/// Capitalize the first letter of every whitespace-separated word, so the
/// API's lowercase descriptions ("scattered clouds") read as display text.
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
