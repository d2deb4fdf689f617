use phonenumber::Mode;

pub const INVALID_PHONE_MESSAGE: &str = "Please provide a valid mobile phone number";

/// Parses an international phone number (leading `+` and country code).
///
/// Returns the number normalized to international format, or `None` when it
/// cannot be parsed or is not a valid number for its region.
pub fn check_phone_number(value: &str) -> Option<String> {
    let number = phonenumber::parse(None, value.trim()).ok()?;
    if !phonenumber::is_valid(&number) {
        return None;
    }
    Some(number.format().mode(Mode::International).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_international_numbers() {
        let us = check_phone_number("+1 650-253-0000").unwrap();
        assert!(us.starts_with("+1"));

        assert!(check_phone_number("+33 1 42 68 53 00").is_some());
    }

    #[test]
    fn test_formatting_is_normalized() {
        assert_eq!(
            check_phone_number("+16502530000"),
            check_phone_number("+1 (650) 253-0000")
        );
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(check_phone_number("not a phone").is_none());
        assert!(check_phone_number("").is_none());
        assert!(check_phone_number("+1 123").is_none());
    }

    #[test]
    fn test_requires_country_code() {
        assert!(check_phone_number("650-253-0000").is_none());
    }
}
