//! Input checks shared by the services

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::models::Money;

/// Largest amount a single entry, budget or goal may carry (one billion)
pub const MAX_AMOUNT: Money = Money::from_cents(100_000_000_000);

/// Trimmed, non-empty text of at most `max_chars` characters
pub fn required_text(value: &str, field: &str, max_chars: usize) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::validation(format!("{} is required", field)));
    }
    if trimmed.chars().count() > max_chars {
        return Err(DomainError::validation(format!(
            "{} cannot exceed {} characters",
            field, max_chars
        )));
    }
    Ok(trimmed.to_string())
}

/// A finite amount strictly greater than zero and at most [`MAX_AMOUNT`]
pub fn positive_amount(value: f64, field: &str) -> DomainResult<Money> {
    match Money::from_decimal(value) {
        Some(money) if money.is_positive() => within_max(money, field),
        _ => Err(DomainError::validation(format!("{} must be greater than 0", field))),
    }
}

pub fn non_negative_amount(value: f64, field: &str) -> DomainResult<Money> {
    match Money::from_decimal(value) {
        Some(money) if !money.is_negative() => within_max(money, field),
        _ => Err(DomainError::validation(format!("{} cannot be negative", field))),
    }
}

fn within_max(money: Money, field: &str) -> DomainResult<Money> {
    if money > MAX_AMOUNT {
        return Err(DomainError::validation(format!("{} cannot exceed {}", field, MAX_AMOUNT)));
    }
    Ok(money)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_checks() {
        assert_eq!(positive_amount(12.5, "amount").unwrap().cents(), 1_250);
        assert!(positive_amount(0.0, "amount").is_err());
        assert!(positive_amount(0.004, "amount").is_err());
        assert!(positive_amount(-5.0, "amount").is_err());
        assert!(positive_amount(f64::NAN, "amount").is_err());

        assert_eq!(non_negative_amount(0.0, "currentAmount").unwrap(), Money::ZERO);
        assert!(non_negative_amount(-0.01, "currentAmount").is_err());
    }

    #[test]
    fn test_amount_upper_bound() {
        assert_eq!(positive_amount(1_000_000_000.0, "amount").unwrap(), MAX_AMOUNT);
        assert!(positive_amount(1_000_000_000.01, "amount").is_err());
        assert!(positive_amount(9.0e16, "amount").is_err());
        assert!(positive_amount(1.0e300, "amount").is_err());
        assert!(non_negative_amount(9.0e16, "currentAmount").is_err());

        let message = positive_amount(9.0e16, "amount").unwrap_err().to_string();
        assert!(message.contains("cannot exceed 1000000000.00"));
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("  Food ", "category", 10).unwrap(), "Food");
        assert!(required_text("   ", "category", 10).is_err());
        assert!(required_text("abcdefghijk", "category", 10).is_err());
    }
}
