use thiserror::Error;

use super::{Cents, parse_cents};

/// Rejected user input. Recovered at the prompt that produced it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty.")]
    EmptyField(&'static str),

    #[error("{0} must be greater than zero.")]
    NotPositive(&'static str),

    #[error("Invalid {field} '{input}'. Please enter a number.")]
    Malformed { field: &'static str, input: String },

    #[error("{0} would exceed the largest supported total.")]
    TotalOutOfRange(&'static str),
}

/// Trim a name and reject it when nothing is left.
pub fn require_name(field: &'static str, name: &str) -> Result<String, ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(trimmed.to_string())
}

/// Reject zero and negative money values.
pub fn require_positive(field: &'static str, cents: Cents) -> Result<Cents, ValidationError> {
    if cents <= 0 {
        return Err(ValidationError::NotPositive(field));
    }
    Ok(cents)
}

/// Add an amount to a running total, rejecting sums that leave the `Cents` range.
pub fn add_to_total(
    field: &'static str,
    total: Cents,
    amount: Cents,
) -> Result<Cents, ValidationError> {
    total
        .checked_add(amount)
        .ok_or(ValidationError::TotalOutOfRange(field))
}

/// Parse a money field typed by the user.
pub fn parse_money(field: &'static str, input: &str) -> Result<Cents, ValidationError> {
    parse_cents(input).map_err(|_| ValidationError::Malformed {
        field,
        input: input.trim().to_string(),
    })
}

/// Parse a whole-number quantity typed by the user. Sign is checked later.
pub fn parse_quantity(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::Malformed {
            field: "quantity",
            input: input.trim().to_string(),
        })
}
