//! Seams between the core and whatever draws the card.
//!
//! The core only ever talks to [`DisplaySurface`] and [`InputForm`]; it never
//! formats output for a particular terminal or toolkit.

use std::fmt::Debug;

use crate::format::WeatherIcon;

pub const LOADING_MESSAGE: &str = "🌤️ Fetching weather data...";
pub const ERROR_ICON: &str = "⚠️";
pub const RETRY_LABEL: &str = "Try Again";

/// Structured content for the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum Card {
    Loading(String),
    Weather(WeatherCard),
    Error(ErrorCard),
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherCard {
    pub title: String,
    pub temperature: String,
    /// `"Feels like 66.2°F"`
    pub feels_like: String,
    /// `"Humidity: 60%"`
    pub humidity: String,
    pub description: String,
    pub icon: WeatherIcon,
    /// Label of the unit toggle, naming the unit it switches to.
    pub unit_toggle: String,
    /// `"Updated: 14:05:09"`, local wall-clock time of the render.
    pub updated: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ErrorCard {
    pub icon: &'static str,
    pub message: String,
    pub retry_label: &'static str,
}

impl ErrorCard {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            icon: ERROR_ICON,
            message: message.into(),
            retry_label: RETRY_LABEL,
        }
    }
}

/// The region cards are drawn into.
///
/// Called from the request path and from the error auto-hide task, so
/// implementations use interior mutability.
pub trait DisplaySurface: Send + Sync + Debug {
    fn clear(&self);
    fn show(&self, card: Card);
    fn set_visible(&self, visible: bool);
}

/// The city input and its submit control.
pub trait InputForm: Send + Sync + Debug {
    /// Busy disables the input and submit control.
    fn set_busy(&self, busy: bool);

    /// Moves focus to the city input, optionally selecting its text.
    fn focus(&self, select_all: bool);
}
