//! Phone-number helpers for the add-sitter flow.

/// True when `body` contains exactly ten digits, the add-sitter trigger.
pub fn has_phone_number(body: &str) -> bool {
    body.chars().filter(|c| c.is_ascii_digit()).count() == 10
}

/// Collect the digits of `body` and normalize to `+{country}{ten digits}`.
/// Returns `None` unless exactly ten digits are present.
pub fn normalize(body: &str, country: &str) -> Option<String> {
    let digits: String = body.chars().filter(|c| c.is_ascii_digit()).collect();
    (digits.len() == 10).then(|| format!("+{country}{digits}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_ten_digits_with_punctuation() {
        assert!(has_phone_number("amy 612-555-0101"));
        assert!(has_phone_number("amy (612) 555 0101"));
        assert!(!has_phone_number("amy 555-0101"));
        assert!(!has_phone_number("tomorrow 5pm to 10pm"));
    }

    #[test]
    fn normalize_prefixes_the_country_code() {
        assert_eq!(
            normalize("amy 612-555-0101", "1"),
            Some("+16125550101".to_string())
        );
        assert_eq!(normalize("amy 555-0101", "1"), None);
    }
}
