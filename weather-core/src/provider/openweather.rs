use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{Failure, WeatherSnapshot};

use super::WeatherClient;

/// Client for the OpenWeather current-weather endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherClient {
    /// `base_url` is the API root, e.g. `https://api.openweathermap.org/data/2.5`.
    /// A `timeout` of `None` lets requests wait indefinitely.
    pub fn new(api_key: String, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn current_weather_url(&self) -> String {
        format!("{}/weather", self.base_url)
    }
}

#[async_trait]
impl WeatherClient for OpenWeatherClient {
    #[instrument(skip(self), level = "debug")]
    async fn fetch_weather(&self, city: &str) -> Result<WeatherSnapshot, Failure> {
        debug!("requesting current weather");

        let res = self
            .http
            .get(self.current_weather_url())
            .header(ACCEPT, "application/json")
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, timeout = e.is_timeout(), "OpenWeather request failed");
                Failure::NetworkError
            })?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            warn!(error = %e, "Failed to read OpenWeather response body");
            Failure::NetworkError
        })?;

        if let Some(failure) = Failure::from_status(status.as_u16()) {
            warn!(%status, body = %truncate_body(&body), "OpenWeather returned an error status");
            return Err(failure);
        }

        let snapshot = parse_current(&body).map_err(|e| {
            warn!(error = %e, body = %truncate_body(&body), "Unusable OpenWeather response");
            Failure::Unknown
        })?;

        info!(city = %snapshot.city, code = snapshot.condition_code, "fetched current weather");
        Ok(snapshot)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    id: u32,
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    sys: Option<OwSys>,
}

fn parse_current(body: &str) -> Result<WeatherSnapshot> {
    let parsed: OwCurrentResponse =
        serde_json::from_str(body).context("Failed to parse OpenWeather current JSON")?;

    let condition = parsed
        .weather
        .into_iter()
        .next()
        .context("OpenWeather response contained no weather conditions")?;

    Ok(WeatherSnapshot {
        city: parsed.name,
        country: parsed.sys.and_then(|sys| sys.country),
        temperature_c: parsed.main.temp,
        feels_like_c: parsed.main.feels_like,
        humidity_pct: parsed.main.humidity,
        description: condition.description,
        condition_code: condition.id,
        wind_speed_mps: parsed.wind.and_then(|wind| wind.speed),
    })
}

fn truncate_body(body: &str) -> &str {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARIS: &str = r#"{
        "coord": {"lon": 2.35, "lat": 48.85},
        "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01d"}],
        "main": {"temp": 20.0, "feels_like": 19.0, "pressure": 1012, "humidity": 60},
        "wind": {"speed": 3.6, "deg": 250},
        "sys": {"country": "FR", "sunrise": 1700000000, "sunset": 1700030000},
        "name": "Paris",
        "cod": 200
    }"#;

    #[test]
    fn parses_full_response() {
        let snapshot = parse_current(PARIS).expect("valid response");

        assert_eq!(snapshot.city, "Paris");
        assert_eq!(snapshot.country.as_deref(), Some("FR"));
        assert_eq!(snapshot.temperature_c, 20.0);
        assert_eq!(snapshot.feels_like_c, 19.0);
        assert_eq!(snapshot.humidity_pct, 60);
        assert_eq!(snapshot.description, "clear sky");
        assert_eq!(snapshot.condition_code, 800);
        assert_eq!(snapshot.wind_speed_mps, Some(3.6));
    }

    #[test]
    fn optional_sections_may_be_missing() {
        let body = r#"{
            "weather": [{"id": 500, "description": "light rain"}],
            "main": {"temp": 5.5, "feels_like": 2.0, "humidity": 90},
            "name": "Nowhere"
        }"#;
        let snapshot = parse_current(body).expect("valid response");

        assert_eq!(snapshot.country, None);
        assert_eq!(snapshot.wind_speed_mps, None);
        assert_eq!(snapshot.title(), "Nowhere");
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        assert!(parse_current(r#"{"name": "Paris"}"#).is_err());
        assert!(parse_current("not json").is_err());
    }

    #[test]
    fn empty_weather_array_is_rejected() {
        let body = r#"{
            "weather": [],
            "main": {"temp": 1.0, "feels_like": 1.0, "humidity": 1},
            "name": "Paris"
        }"#;
        let err = parse_current(body).unwrap_err();
        assert!(err.to_string().contains("no weather conditions"));
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        assert_eq!(truncate_body(&long).chars().count(), 200);
        assert_eq!(truncate_body("short"), "short");
    }

    #[test]
    fn base_url_trailing_slash_is_ignored() {
        let client = OpenWeatherClient::new("KEY".into(), "http://localhost:1234/", None)
            .expect("client builds");
        assert_eq!(client.current_weather_url(), "http://localhost:1234/weather");
    }
}
