use serde::{Deserialize, Serialize};

/// Geographic position returned by the current-weather lookup and fed into
/// the air-pollution lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Snapshot of the current weather for one city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReading {
    pub city: String,
    pub country: String,
    pub temperature_c: f64,
    pub feels_like_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    /// Unix seconds.
    pub sunrise: i64,
    /// Unix seconds.
    pub sunset: i64,
    /// Primary condition keyword, e.g. "Rain". Absent when the provider
    /// sends an empty condition list.
    pub condition: Option<String>,
    pub description: String,
    pub coordinates: Coordinates,
}

/// Air quality band as reported by the provider, nominally 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AirQualityIndex(pub u32);

impl AirQualityIndex {
    pub fn value(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for AirQualityIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Trim user input into a search term. `None` means nothing searchable was
/// entered.
pub fn normalize_query(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}
