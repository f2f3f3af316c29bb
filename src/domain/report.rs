use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Cents, Product, ProductId};

/// Per-unit economics of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductReport {
    pub product_id: ProductId,
    pub product_name: String,
    pub price: Cents,
    pub total_expenses: Cents,
    pub net_income_per_unit: Cents,
}

impl ProductReport {
    pub fn new(product: &Product, total_expenses: Cents) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            price: product.price_cents,
            total_expenses,
            net_income_per_unit: product.price_cents - total_expenses,
        }
    }
}

/// Projected profit for a hypothetical number of units sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitSimulation {
    pub product_id: ProductId,
    pub quantity: i64,
    pub net_income_per_unit: Cents,
    pub total_profit: Cents,
}

/// Whether a zero-unit simulation is an error or a zero-profit result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZeroQuantityPolicy {
    #[default]
    Reject,
    Allow,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("Quantity cannot be negative.")]
    NegativeQuantity,

    #[error("Quantity must be greater than zero.")]
    ZeroQuantity,

    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    #[error("Estimated profit for {quantity} units is too large to compute.")]
    Overflow { quantity: i64 },
}

impl ProductReport {
    /// Multiply the net income per unit by `quantity`.
    pub fn simulate(
        &self,
        quantity: i64,
        policy: ZeroQuantityPolicy,
    ) -> Result<ProfitSimulation, SimulationError> {
        if quantity < 0 {
            return Err(SimulationError::NegativeQuantity);
        }
        if quantity == 0 && policy == ZeroQuantityPolicy::Reject {
            return Err(SimulationError::ZeroQuantity);
        }

        let total_profit = self
            .net_income_per_unit
            .checked_mul(quantity)
            .ok_or(SimulationError::Overflow { quantity })?;

        Ok(ProfitSimulation {
            product_id: self.product_id,
            quantity,
            net_income_per_unit: self.net_income_per_unit,
            total_profit,
        })
    }
}
