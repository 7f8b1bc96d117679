use thiserror::Error;

/// Why a fetch did not produce a [`WeatherSnapshot`](crate::WeatherSnapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Failure {
    #[error("city not found (404)")]
    NotFound,

    #[error("API key rejected (401)")]
    Unauthorized,

    #[error("HTTP error {0}")]
    HttpError(u16),

    #[error("network error")]
    NetworkError,

    /// The service answered but the body was not a usable weather document.
    #[error("unexpected response")]
    Unknown,
}

impl Failure {
    /// Maps an HTTP status code to a failure. Returns `None` for success codes.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            404 => Some(Failure::NotFound),
            401 => Some(Failure::Unauthorized),
            other => Some(Failure::HttpError(other)),
        }
    }

    pub fn user_message(&self) -> &'static str {
        classify(self)
    }
}

/// User-facing message for a failed fetch.
pub fn classify(failure: &Failure) -> &'static str {
    match failure {
        Failure::NotFound => "City not found. Please check the spelling and try again.",
        Failure::Unauthorized => "Weather service unavailable. Please try again later.",
        Failure::NetworkError => "Network error. Please check your internet connection.",
        Failure::HttpError(_) | Failure::Unknown => {
            "Unable to fetch weather data. Please try again."
        }
    }
}

/// Rejected city input. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a city name")]
    Empty,

    #[error("City name must be at least 2 characters long")]
    TooShort,

    #[error("Please enter a valid city name")]
    InvalidCharacters,
}
