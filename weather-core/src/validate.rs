use crate::error::ValidationError;

const MIN_CITY_CHARS: usize = 2;

/// Trims `input` and checks that it looks like a city name: at least two
/// characters, only ASCII letters, whitespace and `-'.,`.
///
/// Returns the trimmed name on success.
pub fn validate_city(input: &str) -> Result<&str, ValidationError> {
    let city = input.trim();

    if city.is_empty() {
        return Err(ValidationError::Empty);
    }

    if city.chars().count() < MIN_CITY_CHARS {
        return Err(ValidationError::TooShort);
    }

    if !city.chars().all(is_city_char) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(city)
}

fn is_city_char(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch.is_whitespace() || matches!(ch, '-' | '\'' | '.' | ',')
}
