//! Field validation for donation entries.
//!
//! Validation runs before any write; failures are field-specific and block
//! the operation.

use rust_decimal::Decimal;
use thiserror::Error;

/// Field-specific validation failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The payer name is shorter than 2 characters after trimming.
    #[error("name must have at least 2 characters")]
    PayerNameTooShort,

    /// The amount is zero or negative.
    #[error("amount must be greater than zero")]
    AmountNotPositive,

    /// The email address is malformed.
    #[error("email address is invalid")]
    InvalidEmail,

    /// The phone number does not carry 11 digits (area code + 9-digit mobile).
    #[error("phone must contain 11 digits (area code + 9 digits)")]
    PhoneDigitCount,

    /// The phone number is not a mobile number.
    #[error("phone must be a mobile number (starting with 9)")]
    PhoneNotMobile,

    /// The area code / subscriber number pair is malformed.
    #[error("area code must have 2 digits and the number 8 or 9 digits")]
    InvalidPhoneParts,
}

fn digits_of(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a contributor name: at least 2 characters after trimming.
///
/// # Errors
///
/// Returns `ValidationError::PayerNameTooShort` otherwise.
pub fn validate_payer_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().chars().count() >= 2 {
        Ok(())
    } else {
        Err(ValidationError::PayerNameTooShort)
    }
}

/// Validates a contribution amount: strictly positive.
///
/// # Errors
///
/// Returns `ValidationError::AmountNotPositive` otherwise.
pub fn validate_amount(amount: Decimal) -> Result<(), ValidationError> {
    if amount > Decimal::ZERO {
        Ok(())
    } else {
        Err(ValidationError::AmountNotPositive)
    }
}

/// Validates an email address shape: must contain `@` and `.`.
///
/// # Errors
///
/// Returns `ValidationError::InvalidEmail` otherwise.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if !email.is_empty() && email.contains('@') && email.contains('.') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a formatted mobile phone: 11 digits after stripping formatting,
/// with the subscriber part starting with 9.
///
/// # Errors
///
/// Returns `ValidationError::PhoneDigitCount` or
/// `ValidationError::PhoneNotMobile`.
pub fn validate_mobile_phone(raw: &str) -> Result<(), ValidationError> {
    let digits = digits_of(raw);
    if digits.len() != 11 {
        return Err(ValidationError::PhoneDigitCount);
    }
    if digits.as_bytes()[2] != b'9' {
        return Err(ValidationError::PhoneNotMobile);
    }
    Ok(())
}

/// Validates a separate area code / subscriber number pair: 2-digit area
/// code, 8- or 9-digit number.
///
/// # Errors
///
/// Returns `ValidationError::InvalidPhoneParts` otherwise.
pub fn validate_phone_parts(area_code: &str, number: &str) -> Result<(), ValidationError> {
    let area = digits_of(area_code);
    let number = digits_of(number);

    if area.len() == 2 && matches!(number.len(), 8 | 9) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhoneParts)
    }
}

/// Splits a formatted phone string into `(area_code, subscriber_number)`.
///
/// Strips non-digits first; returns `None` when fewer than 11 digits remain.
/// Short inputs are a deliberate leniency: the caller keeps the phone fields
/// empty instead of erroring.
#[must_use]
pub fn split_phone(raw: &str) -> Option<(String, String)> {
    let digits = digits_of(raw);
    if digits.len() >= 11 {
        Some((digits[..2].to_string(), digits[2..].to_string()))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    #[rstest]
    #[case("Maria Silva", true)]
    #[case("Jo", true)]
    #[case("  Jo  ", true)]
    #[case("J", false)]
    #[case("   ", false)]
    #[case("", false)]
    fn test_validate_payer_name(#[case] name: &str, #[case] ok: bool) {
        assert_eq!(validate_payer_name(name).is_ok(), ok);
    }

    #[test]
    fn test_validate_amount() {
        assert!(validate_amount(dec!(0.01)).is_ok());
        assert!(validate_amount(dec!(100)).is_ok());
        assert_eq!(
            validate_amount(Decimal::ZERO),
            Err(ValidationError::AmountNotPositive)
        );
        assert_eq!(
            validate_amount(dec!(-5)),
            Err(ValidationError::AmountNotPositive)
        );
    }

    #[rstest]
    #[case("someone@example.com", true)]
    #[case("a@b.c", true)]
    #[case("missing-at.example.com", false)]
    #[case("missing-dot@example", false)]
    #[case("", false)]
    fn test_validate_email(#[case] email: &str, #[case] ok: bool) {
        assert_eq!(validate_email(email).is_ok(), ok);
    }

    #[test]
    fn test_validate_mobile_phone() {
        assert!(validate_mobile_phone("(11) 98765-4321").is_ok());
        assert!(validate_mobile_phone("11987654321").is_ok());
        assert_eq!(
            validate_mobile_phone("1187654321"),
            Err(ValidationError::PhoneDigitCount)
        );
        assert_eq!(
            validate_mobile_phone("(11) 88765-4321"),
            Err(ValidationError::PhoneNotMobile)
        );
    }

    #[test]
    fn test_validate_phone_parts() {
        assert!(validate_phone_parts("11", "987654321").is_ok());
        assert!(validate_phone_parts("11", "87654321").is_ok());
        assert_eq!(
            validate_phone_parts("1", "987654321"),
            Err(ValidationError::InvalidPhoneParts)
        );
        assert_eq!(
            validate_phone_parts("11", "4321"),
            Err(ValidationError::InvalidPhoneParts)
        );
    }

    #[test]
    fn test_split_phone_formatted() {
        assert_eq!(
            split_phone("(11) 98765-4321"),
            Some(("11".to_string(), "987654321".to_string()))
        );
    }

    #[test]
    fn test_split_phone_with_country_code_keeps_extra_digits() {
        // 13 digits still split at position 2; extra digits stay in the
        // subscriber part.
        assert_eq!(
            split_phone("5511987654321"),
            Some(("55".to_string(), "11987654321".to_string()))
        );
    }

    #[test]
    fn test_split_phone_short_input_is_none() {
        assert_eq!(split_phone("8765-4321"), None);
        assert_eq!(split_phone(""), None);
    }
}
