use crate::{
    AirQualityIndex, Config, Coordinates, WeatherReading, error::LookupError,
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// The two lookups the dashboard needs. The second takes the coordinates
/// produced by the first.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn current_weather(&self, city: &str) -> Result<WeatherReading, LookupError>;

    async fn air_quality(&self, at: Coordinates) -> Result<AirQualityIndex, LookupError>;
}

/// Construct the OpenWeather client from config.
pub fn provider_from_config(config: &Config) -> anyhow::Result<OpenWeatherProvider> {
    provider_with_key(config.effective_api_key(), config)
}

fn provider_with_key(
    api_key: Option<String>,
    config: &Config,
) -> anyhow::Result<OpenWeatherProvider> {
    let api_key = api_key.ok_or_else(|| {
        anyhow::anyhow!(
            "No OpenWeather API key configured.\n\
                 Hint: run `airwatch configure` or set {}.",
            crate::config::API_KEY_ENV
        )
    })?;

    Ok(OpenWeatherProvider::with_base_url(api_key, config.base_url.as_str()))
}
