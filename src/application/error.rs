use thiserror::Error;

use crate::domain::{AccountId, ProductId, SimulationError, ValidationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid choice: {0}")]
    InvalidSelection(String),

    #[error("Username already exists: {0}")]
    DuplicateUsername(String),

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("{0}")]
    Simulation(#[from] SimulationError),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),

    #[error("Console error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// User-input errors are reported and the menu continues. Anything else
    /// means the store, the credential backend or the console failed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            AppError::Database(_) | AppError::Credential(_) | AppError::Io(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_errors() {
        assert!(AppError::InvalidSelection("99".into()).is_recoverable());
        assert!(AppError::DuplicateUsername("alice".into()).is_recoverable());
        assert!(AppError::from(SimulationError::ZeroQuantity).is_recoverable());
        assert!(AppError::from(ValidationError::NotPositive("Price")).is_recoverable());
        assert!(!AppError::Database(anyhow::anyhow!("disk full")).is_recoverable());
    }

    #[test]
    fn test_messages_pass_through() {
        let err = AppError::from(SimulationError::NegativeQuantity);
        assert_eq!(err.to_string(), "Quantity cannot be negative.");
    }
}
