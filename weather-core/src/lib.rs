//! Core library for the `weather-card` front end.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather client behind the [`WeatherClient`] trait
//! - Pure formatting helpers (temperature, icons, capitalization)
//! - The renderer and request orchestrator, written against the
//!   [`DisplaySurface`] and [`InputForm`] traits
//!
//! It does no terminal I/O; `weather-card` supplies the concrete surface.

pub mod config;
pub mod display;
pub mod error;
pub mod format;
pub mod model;
pub mod orchestrator;
pub mod provider;
pub mod render;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_support;

pub use config::Config;
pub use display::{Card, DisplaySurface, ErrorCard, InputForm, WeatherCard};
pub use error::{Failure, ValidationError, classify};
pub use format::{WeatherIcon, capitalize_words, format_temperature, icon_for};
pub use model::{RequestState, TemperatureUnit, WeatherSnapshot};
pub use orchestrator::{RequestOrchestrator, Shortcut, SubmitOutcome};
pub use provider::{WeatherClient, client_from_config, openweather::OpenWeatherClient};
pub use render::ViewRenderer;
pub use validate::validate_city;
