use serde::{Deserialize, Serialize};

use super::{AccountId, Cents, ValidationError, require_name, require_positive};

pub type ProductId = i64;

/// A sellable product owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub owner_id: AccountId,
    pub name: String,
    pub price_cents: Cents,
}

/// A validated product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub owner_id: AccountId,
    pub name: String,
    pub price_cents: Cents,
}

impl NewProduct {
    pub fn new(owner_id: AccountId, name: &str, price_cents: Cents) -> Result<Self, ValidationError> {
        let name = require_name("Product name", name)?;
        let price_cents = require_positive("Product price", price_cents)?;
        Ok(Self {
            owner_id,
            name,
            price_cents,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_product() {
        let product = NewProduct::new(1, " Notebook ", 5000).unwrap();
        assert_eq!(product.name, "Notebook");
        assert_eq!(product.price_cents, 5000);
        assert_eq!(product.owner_id, 1);
    }

    #[test]
    fn test_rejects_blank_name() {
        assert_eq!(
            NewProduct::new(1, "", 5000),
            Err(ValidationError::EmptyField("Product name"))
        );
    }

    #[test]
    fn test_rejects_zero_and_negative_price() {
        assert_eq!(
            NewProduct::new(1, "Notebook", 0),
            Err(ValidationError::NotPositive("Product price"))
        );
        assert!(NewProduct::new(1, "Notebook", -1).is_err());
    }
}
