//! Input validation functions
//!
//! This module provides validation utilities for user input. Limits mirror
//! the column sizes in the database schema.

use rust_decimal::Decimal;

/// Maximum length of names, titles and links
pub const MAX_TEXT_LEN: usize = 255;

/// Largest price that fits the `NUMERIC(5, 2)` column
pub const MAX_PRICE: Decimal = Decimal::from_parts(99999, 0, 0, false, 2);

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if !email.contains('@') || !email.contains('.') {
        return Err("Invalid email format".to_string());
    }
    if email.len() > MAX_TEXT_LEN {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Email pattern error: {}", e))?;
    if !email_regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Normalize an email address by lowercasing the domain part
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < 8 {
        return Err("Password must be at least 8 characters".to_string());
    }
    if password.len() > 128 {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a user's display name; blank is allowed
pub fn validate_user_name(name: &str) -> Result<(), String> {
    if name.trim().chars().count() > MAX_TEXT_LEN {
        return Err(format!("Name cannot exceed {} characters", MAX_TEXT_LEN));
    }
    Ok(())
}

/// Validate an ingredient or tag name
pub fn validate_attribute_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }
    if name.chars().count() > MAX_TEXT_LEN {
        return Err(format!("Name cannot exceed {} characters", MAX_TEXT_LEN));
    }
    Ok(())
}

/// Validate a recipe title
pub fn validate_title(title: &str) -> Result<(), String> {
    if title.trim().is_empty() {
        return Err("Title cannot be empty".to_string());
    }
    if title.chars().count() > MAX_TEXT_LEN {
        return Err(format!("Title cannot exceed {} characters", MAX_TEXT_LEN));
    }
    Ok(())
}

/// Validate preparation time in minutes
pub fn validate_time_minutes(minutes: i32) -> Result<(), String> {
    if minutes < 0 {
        return Err("Time cannot be negative".to_string());
    }
    Ok(())
}

/// Validate a recipe price
///
/// At most two decimal places and five digits in total.
pub fn validate_price(price: Decimal) -> Result<(), String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price cannot be negative".to_string());
    }
    if price.normalize().scale() > 2 {
        return Err("Price cannot have more than 2 decimal places".to_string());
    }
    if price > MAX_PRICE {
        return Err(format!("Price cannot exceed {}", MAX_PRICE));
    }
    Ok(())
}

/// Validate a recipe link
pub fn validate_link(link: &str) -> Result<(), String> {
    if link.chars().count() > MAX_TEXT_LEN {
        return Err(format!("Link cannot exceed {} characters", MAX_TEXT_LEN));
    }
    Ok(())
}

/// Parse a comma separated list of ids such as `"1,2,3"`
///
/// Blank segments are skipped, so `"1,,2,"` yields `[1, 2]`.
pub fn parse_id_list(raw: &str) -> Result<Vec<i64>, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| format!("Invalid id '{}' in list", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("test@example.com").is_ok());
        assert!(validate_email("user.name@domain.co.uk").is_ok());
        assert!(validate_email("").is_err());
        assert!(validate_email("invalid").is_err());
        assert!(validate_email("no@dot").is_err());
        assert!(validate_email("spaces in@email.com").is_err());
    }

    #[rstest]
    #[case("test1@EXAMPLE.com", "test1@example.com")]
    #[case("Test2@Example.com", "Test2@example.com")]
    #[case("TEST3@EXAMPLE.COM", "TEST3@example.com")]
    #[case("  test4@example.COM ", "test4@example.com")]
    fn test_normalize_email(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_email(input), expected);
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("password123").is_ok());
        assert!(validate_password("12345678").is_ok());
        assert!(validate_password("short").is_err());
        assert!(validate_password(&"a".repeat(129)).is_err());
    }

    #[rstest]
    #[case("", true)]
    #[case("Test User", true)]
    #[case(&"é".repeat(MAX_TEXT_LEN), true)]
    #[case(&format!("  {}  ", "a".repeat(MAX_TEXT_LEN)), true)]
    #[case(&"a".repeat(MAX_TEXT_LEN + 1), false)]
    #[case(&"a".repeat(300), false)]
    fn test_validate_user_name(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(validate_user_name(name).is_ok(), valid, "{} chars", name.len());
    }

    #[rstest]
    #[case("Kale", true)]
    #[case("Coriander", true)]
    #[case("", false)]
    #[case("   ", false)]
    fn test_validate_attribute_name(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(validate_attribute_name(name).is_ok(), valid);
    }

    #[test]
    fn test_attribute_name_length_limit() {
        assert!(validate_attribute_name(&"a".repeat(MAX_TEXT_LEN)).is_ok());
        assert!(validate_attribute_name(&"a".repeat(MAX_TEXT_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_title_and_time() {
        assert!(validate_title("Apple crumble").is_ok());
        assert!(validate_title(" ").is_err());
        assert!(validate_time_minutes(0).is_ok());
        assert!(validate_time_minutes(22).is_ok());
        assert!(validate_time_minutes(-1).is_err());
    }

    #[rstest]
    #[case(Decimal::new(440, 2), true)]
    #[case(Decimal::new(0, 0), true)]
    #[case(Decimal::new(99999, 2), true)]
    #[case(Decimal::new(100000, 2), false)]
    #[case(Decimal::new(-1, 2), false)]
    #[case(Decimal::new(1234, 3), false)]
    #[case(Decimal::new(1230, 3), true)]
    fn test_validate_price(#[case] price: Decimal, #[case] valid: bool) {
        assert_eq!(validate_price(price).is_ok(), valid, "price {}", price);
    }

    #[test]
    fn test_validate_link() {
        assert!(validate_link("").is_ok());
        assert!(validate_link("https://example.com/recipe.pdf").is_ok());
        assert!(validate_link(&"a".repeat(MAX_TEXT_LEN + 1)).is_err());
    }

    #[test]
    fn test_parse_id_list() {
        assert_eq!(parse_id_list("1,2,3").unwrap(), vec![1, 2, 3]);
        assert_eq!(parse_id_list(" 4 , 5 ").unwrap(), vec![4, 5]);
        assert_eq!(parse_id_list("1,,2,").unwrap(), vec![1, 2]);
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list("1,abc").is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_parse_id_list_roundtrips_joined_ids(ids in prop::collection::vec(any::<i64>(), 0..20)) {
            let raw = ids
                .iter()
                .map(|id| id.to_string())
                .collect::<Vec<_>>()
                .join(",");
            prop_assert_eq!(parse_id_list(&raw).unwrap(), ids);
        }
    }
}
