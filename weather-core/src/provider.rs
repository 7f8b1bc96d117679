use crate::{Config, Failure, WeatherSnapshot, provider::openweather::OpenWeatherClient};
use async_trait::async_trait;
use std::fmt::Debug;

pub mod openweather;

/// Source of current weather for a city.
///
/// Implementations make exactly one outbound request per call and never retry.
#[async_trait]
pub trait WeatherClient: Send + Sync + Debug {
    /// `city` is already trimmed and validated by the caller.
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, Failure>;
}

/// Construct the OpenWeather client from config.
pub fn client_from_config(config: &Config) -> anyhow::Result<Box<dyn WeatherClient>> {
    let api_key = config.require_api_key()?;
    let client = OpenWeatherClient::new(api_key, &config.base_url, config.request_timeout())?;
    Ok(Box::new(client))
}
