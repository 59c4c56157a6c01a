use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use tracing::debug;

use crate::{
    error::LookupError,
    model::{AirQualityIndex, Coordinates, WeatherReading},
};

use super::WeatherProvider;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5";

const WEATHER_ENDPOINT: &str = "weather";
const AIR_POLLUTION_ENDPOINT: &str = "air_pollution";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    /// `base_url` is normally [`DEFAULT_BASE_URL`]; tests point it at a mock server.
    pub fn with_base_url(api_key: String, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            api_key,
            base_url,
            http: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, &str)],
    ) -> Result<T, LookupError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "sending OpenWeather request");

        let res = self
            .http
            .get(&url)
            .query(query)
            .query(&[("appid", self.api_key.as_str())])
            .send()
            .await
            .map_err(|source| LookupError::Request { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| LookupError::Request { endpoint, source })?;

        if !status.is_success() {
            return Err(LookupError::Status {
                endpoint,
                status,
                body: truncate_body(&body),
            });
        }

        serde_json::from_str(&body).map_err(|source| LookupError::Parse { endpoint, source })
    }
}

#[derive(Debug, Deserialize)]
struct OwCoord {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
    sunrise: i64,
    sunset: i64,
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
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    coord: OwCoord,
    sys: OwSys,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
}

#[derive(Debug, Deserialize)]
struct OwAqiMain {
    aqi: u32,
}

#[derive(Debug, Deserialize)]
struct OwPollutionEntry {
    main: OwAqiMain,
}

#[derive(Debug, Deserialize)]
struct OwPollutionResponse {
    list: Vec<OwPollutionEntry>,
}

impl From<OwCurrentResponse> for WeatherReading {
    fn from(parsed: OwCurrentResponse) -> Self {
        let (condition, description) = match parsed.weather.into_iter().next() {
            Some(w) => (Some(w.main), w.description),
            None => (None, String::new()),
        };

        WeatherReading {
            city: parsed.name,
            country: parsed.sys.country,
            temperature_c: parsed.main.temp,
            feels_like_c: parsed.main.feels_like,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
            pressure_hpa: parsed.main.pressure,
            sunrise: parsed.sys.sunrise,
            sunset: parsed.sys.sunset,
            condition,
            description,
            coordinates: Coordinates {
                lat: parsed.coord.lat,
                lon: parsed.coord.lon,
            },
        }
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading, LookupError> {
        let parsed: OwCurrentResponse = self
            .get_json(WEATHER_ENDPOINT, &[("q", city), ("units", "metric")])
            .await?;

        Ok(parsed.into())
    }

    async fn air_quality(&self, at: Coordinates) -> Result<AirQualityIndex, LookupError> {
        let lat = at.lat.to_string();
        let lon = at.lon.to_string();

        let parsed: OwPollutionResponse = self
            .get_json(AIR_POLLUTION_ENDPOINT, &[("lat", lat.as_str()), ("lon", lon.as_str())])
            .await?;

        parsed
            .list
            .first()
            .map(|entry| AirQualityIndex(entry.main.aqi))
            .ok_or(LookupError::Empty { endpoint: AIR_POLLUTION_ENDPOINT })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
