//! Property-based tests for city validation and temperature formatting.

use proptest::prelude::*;
use weather_card_core::{TemperatureUnit, ValidationError, format_temperature, validate_city};

/// Expected outcome for input built only from the accepted character class.
fn classify_allowed(input: &str) -> Result<&str, ValidationError> {
    let trimmed = input.trim();
    match trimmed.chars().count() {
        0 => Err(ValidationError::Empty),
        1 => Err(ValidationError::TooShort),
        _ => Ok(trimmed),
    }
}

fn any_unit() -> impl Strategy<Value = TemperatureUnit> {
    prop_oneof![Just(TemperatureUnit::Fahrenheit), Just(TemperatureUnit::Celsius)]
}

fn has_one_decimal(text: &str, symbol: &str) -> bool {
    let Some(number) = text.strip_suffix(symbol) else {
        return false;
    };
    let Some((whole, fraction)) = number.split_once('.') else {
        return false;
    };
    let whole = whole.strip_prefix('-').unwrap_or(whole);

    !whole.is_empty()
        && whole.chars().all(|c| c.is_ascii_digit())
        && fraction.len() == 1
        && fraction.chars().all(|c| c.is_ascii_digit())
}

proptest! {
    #[test]
    fn allowed_characters_validate_by_length(input in "[a-zA-Z \t\\-'.,]{0,40}") {
        prop_assert_eq!(validate_city(&input), classify_allowed(&input));
    }

    #[test]
    fn names_from_allowed_class_are_accepted(
        name in "[a-zA-Z][a-zA-Z \\-'.,]{0,30}[a-zA-Z]",
        padding in "[ \t]{0,3}",
    ) {
        let padded = format!("{padding}{name}{padding}");
        prop_assert_eq!(validate_city(&padded), Ok(name.as_str()));
    }

    #[test]
    fn any_character_outside_class_is_rejected(
        head in "[a-zA-Z]{1,10}",
        bad in "[0-9!@#$%^&*()_+=<>?/;:\\[\\]{}|~`\"]",
        tail in "[a-zA-Z]{1,10}",
    ) {
        let input = format!("{head}{bad}{tail}");
        prop_assert_eq!(validate_city(&input), Err(ValidationError::InvalidCharacters));
    }

    #[test]
    fn non_ascii_letters_are_rejected(
        head in "[a-zA-Z]{1,10}",
        letter in "[àéîõüßçñøÅÄÖ]",
    ) {
        let input = format!("{head}{letter}");
        prop_assert_eq!(validate_city(&input), Err(ValidationError::InvalidCharacters));
    }

    #[test]
    fn temperatures_have_one_decimal_and_unit_glyph(
        temp in -90.0f64..60.0,
        feels_like in -90.0f64..60.0,
        unit in any_unit(),
    ) {
        let (temp_text, feels_text) = format_temperature(temp, feels_like, unit);

        prop_assert!(has_one_decimal(&temp_text, unit.symbol()), "{}", temp_text);
        prop_assert!(has_one_decimal(&feels_text, unit.symbol()), "{}", feels_text);
    }

    #[test]
    fn fahrenheit_matches_conversion_formula(temp in -90.0f64..60.0) {
        let (text, _) = format_temperature(temp, temp, TemperatureUnit::Fahrenheit);
        prop_assert_eq!(text, format!("{:.1}°F", temp * 9.0 / 5.0 + 32.0));
    }
}
