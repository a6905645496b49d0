//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers.

use rust_decimal::Decimal;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, customer, user, category
pub const MAX_NAME_LEN: usize = 200;

/// Notes on transactions and receivable updates
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone, SKU, unit
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MIN_PASSWORD_LEN: usize = 8;
pub const MAX_PASSWORD_LEN: usize = 128;

/// Addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Numeric limits ──────────────────────────────────────────────────

/// Largest accepted money amount (price, cost, receivables), in whole units
pub const MAX_AMOUNT: i64 = 1_000_000_000_000_000;

/// Largest accepted stock count or line quantity
pub const MAX_QUANTITY: i64 = 1_000_000_000;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            format!("{field} must not be empty"),
        )
        .with_detail("field", field));
    }
    let len = value.chars().count();
    if len > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {max_len})"
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.chars().count() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.chars().count()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Minimal email shape check: one `@`, non-empty local part, dotted domain.
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    };
    if !valid {
        return Err(
            AppError::with_message(ErrorCode::InvalidFormat, "email is not a valid address")
                .with_detail("field", "email"),
        );
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), AppError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LEN {
        return Err(AppError::with_message(
            ErrorCode::PasswordTooShort,
            format!("password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    if len > MAX_PASSWORD_LEN {
        return Err(AppError::validation(format!(
            "password is too long (max {MAX_PASSWORD_LEN})"
        )));
    }
    Ok(())
}

/// Money amounts: not negative, at most [`MAX_AMOUNT`]
pub fn validate_amount(value: Decimal, field: &str, code: ErrorCode) -> Result<(), AppError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AppError::with_message(code, format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    if value > Decimal::from(MAX_AMOUNT) {
        return Err(out_of_range(field).with_detail("max", MAX_AMOUNT));
    }
    Ok(())
}

/// Stock counts: not negative, at most [`MAX_QUANTITY`]
pub fn validate_count(value: i64, field: &str) -> Result<(), AppError> {
    if value < 0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            format!("{field} must not be negative"),
        )
        .with_detail("field", field));
    }
    if value > MAX_QUANTITY {
        return Err(out_of_range(field).with_detail("max", MAX_QUANTITY));
    }
    Ok(())
}

/// Error for a value, or a value derived from it, that exceeds its range
pub fn out_of_range(field: &str) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, format!("{field} is out of range"))
        .with_detail("field", field)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Beras", "name", MAX_NAME_LEN).is_ok());
        let err = validate_required_text("   ", "name", MAX_NAME_LEN).unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            validate_required_text(&long, "name", MAX_NAME_LEN)
                .unwrap_err()
                .code,
            ErrorCode::ValidationFailed
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(validate_email("kasir@toko.id").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
        assert!(validate_email("a@@b.com").is_err());
        assert!(validate_email("@b.com").is_err());
    }

    #[test]
    fn test_password_length() {
        assert_eq!(
            validate_password("short").unwrap_err().code,
            ErrorCode::PasswordTooShort
        );
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password(&"p".repeat(MAX_PASSWORD_LEN + 1)).is_err());
    }

    #[test]
    fn test_text_length_counts_chars() {
        let name = "é".repeat(MAX_NAME_LEN);
        assert!(name.len() > MAX_NAME_LEN);
        assert!(validate_required_text(&name, "name", MAX_NAME_LEN).is_ok());
        assert!(validate_optional_text(&Some(name), "name", MAX_NAME_LEN).is_ok());
        let over = Some("é".repeat(MAX_NAME_LEN + 1));
        assert!(validate_optional_text(&over, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_amount_bounds() {
        assert!(validate_amount(Decimal::ZERO, "price", ErrorCode::ProductInvalidPrice).is_ok());
        assert!(validate_amount(Decimal::from(MAX_AMOUNT), "price", ErrorCode::ProductInvalidPrice).is_ok());
        assert_eq!(
            validate_amount(Decimal::new(-1, 0), "price", ErrorCode::ProductInvalidPrice)
                .unwrap_err()
                .code,
            ErrorCode::ProductInvalidPrice
        );
        assert_eq!(
            validate_amount(Decimal::from(MAX_AMOUNT) + Decimal::ONE, "price", ErrorCode::ProductInvalidPrice)
                .unwrap_err()
                .code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_count_bounds() {
        assert!(validate_count(0, "stock").is_ok());
        assert!(validate_count(MAX_QUANTITY, "stock").is_ok());
        assert!(validate_count(-1, "stock").is_err());
        assert_eq!(
            validate_count(MAX_QUANTITY + 1, "stock").unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
    }
}
