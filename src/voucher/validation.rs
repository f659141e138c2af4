use crate::error::{Result, UnilinkError};
use crate::voucher::types::{MAX_DAYS, MIN_DAYS};

/// Longest free-text value forwarded to the backend
pub const MAX_INPUT_LEN: usize = 100;

/// Trim, drop markup-significant characters and cap the length
pub fn sanitize_input(input: &str) -> String {
    input
        .trim()
        .chars()
        .filter(|c| !matches!(c, '<' | '>' | '\'' | '"'))
        .take(MAX_INPUT_LEN)
        .collect()
}

/// Phone number with all whitespace removed
pub fn normalize_phone(phone: &str) -> String {
    phone.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Validates a Nigerian mobile number: `0`, `234` or `+234`, then a
/// 7/8/9 network digit and nine more digits
pub fn validate_phone(phone: &str) -> Result<()> {
    let phone = normalize_phone(phone);
    let subscriber = phone
        .strip_prefix("+234")
        .or_else(|| phone.strip_prefix("234"))
        .or_else(|| phone.strip_prefix('0'));

    let valid = subscriber.is_some_and(|rest| {
        rest.len() == 10
            && rest.starts_with(['7', '8', '9'])
            && rest.chars().all(|c| c.is_ascii_digit())
    });

    if !valid {
        return Err(UnilinkError::invalid_purchase(
            "Please enter a valid Nigerian phone number (e.g., 08012345678)",
        ));
    }
    Ok(())
}

/// Validates the `local@domain.tld` shape; no whitespace, a single `@`
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let invalid = || UnilinkError::invalid_purchase("Please enter a valid email address");

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());
    if !has_inner_dot {
        return Err(invalid());
    }

    Ok(())
}

/// Validates the purchase duration
pub fn validate_days(days: u32) -> Result<()> {
    if !(MIN_DAYS..=MAX_DAYS).contains(&days) {
        return Err(UnilinkError::invalid_purchase(format!(
            "Please select between {} and {} days",
            MIN_DAYS, MAX_DAYS
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  Ada <b>Lovelace</b> "), "Ada bLovelace/b");
        assert_eq!(sanitize_input("O'Brien \"Jr\""), "OBrien Jr");
        assert_eq!(sanitize_input(&"x".repeat(150)).len(), MAX_INPUT_LEN);
    }

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("08012345678").is_ok());
        assert!(validate_phone("0701 234 5678").is_ok());
        assert!(validate_phone("+2349012345678").is_ok());
        assert!(validate_phone("2348112345678").is_ok());

        // Wrong network digit
        assert!(validate_phone("06012345678").is_err());
        // Too short / too long
        assert!(validate_phone("0801234567").is_err());
        assert!(validate_phone("080123456789").is_err());
        // Letters
        assert!(validate_phone("0801234567a").is_err());
        assert!(validate_phone("").is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("john@example.com").is_ok());
        assert!(validate_email("a.b@mail.example.ng").is_ok());

        assert!(validate_email("john@example").is_err());
        assert!(validate_email("john@.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("john@@example.com").is_err());
        assert!(validate_email("jo hn@example.com").is_err());
        assert!(validate_email("john.example.com").is_err());
    }

    #[test]
    fn test_validate_days() {
        assert!(validate_days(1).is_ok());
        assert!(validate_days(365).is_ok());
        assert!(validate_days(0).is_err());
        assert!(validate_days(366).is_err());
    }
}
