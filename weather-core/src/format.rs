//! Pure helpers that turn raw weather values into card text.

use crate::model::TemperatureUnit;

/// Formats the temperature and feels-like values (both Celsius) in `unit`
/// with one decimal place.
pub fn format_temperature(
    temp_c: f64,
    feels_like_c: f64,
    unit: TemperatureUnit,
) -> (String, String) {
    let convert = |c: f64| match unit {
        TemperatureUnit::Fahrenheit => c * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Celsius => c,
    };

    (
        format!("{:.1}{}", convert(temp_c), unit.symbol()),
        format!("{:.1}{}", convert(feels_like_c), unit.symbol()),
    )
}

/// Uppercases the first letter of every whitespace-delimited word.
pub fn capitalize_words(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut at_word_start = true;

    for ch in text.chars() {
        if ch.is_whitespace() {
            at_word_start = true;
            out.push(ch);
        } else if at_word_start {
            at_word_start = false;
            out.extend(ch.to_uppercase());
        } else {
            out.push(ch);
        }
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Thunderstorm,
    Drizzle,
    Rain,
    Snow,
    Atmosphere,
    Clear,
    Clouds,
    Unknown,
}

impl WeatherIcon {
    /// Looks up the icon for an OpenWeather condition code.
    ///
    /// Codes in `400..500` and `810..` are not assigned a group and fall
    /// through to [`WeatherIcon::Unknown`].
    pub fn for_code(code: u32) -> Self {
        match code {
            200..=299 => WeatherIcon::Thunderstorm,
            300..=399 => WeatherIcon::Drizzle,
            500..=599 => WeatherIcon::Rain,
            600..=699 => WeatherIcon::Snow,
            700..=799 => WeatherIcon::Atmosphere,
            800 => WeatherIcon::Clear,
            801..=809 => WeatherIcon::Clouds,
            _ => WeatherIcon::Unknown,
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            WeatherIcon::Thunderstorm => "⛈",
            WeatherIcon::Drizzle | WeatherIcon::Rain => "🌧",
            WeatherIcon::Snow => "❄",
            WeatherIcon::Atmosphere => "🌫",
            WeatherIcon::Clear => "☀",
            WeatherIcon::Clouds => "☁",
            WeatherIcon::Unknown => "❓",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::Drizzle => "drizzle",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Atmosphere => "fog",
            WeatherIcon::Clear => "clear",
            WeatherIcon::Clouds => "clouds",
            WeatherIcon::Unknown => "unknown",
        }
    }
}

pub fn icon_for(code: u32) -> WeatherIcon {
    WeatherIcon::for_code(code)
}
