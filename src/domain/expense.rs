use serde::{Deserialize, Serialize};

use super::{Cents, ProductId, ValidationError, require_name, require_positive};

pub type ExpenseId = i64;

/// A cost incurred producing one unit of a product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub product_id: ProductId,
    pub name: String,
    pub amount_cents: Cents,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    pub product_id: ProductId,
    pub name: String,
    pub amount_cents: Cents,
}

impl NewExpense {
    pub fn new(
        product_id: ProductId,
        name: &str,
        amount_cents: Cents,
    ) -> Result<Self, ValidationError> {
        let name = require_name("Expense name", name)?;
        let amount_cents = require_positive("Expense amount", amount_cents)?;
        Ok(Self {
            product_id,
            name,
            amount_cents,
        })
    }
}

/// Sum of expense amounts; zero for an empty ledger. `None` when the sum
/// does not fit in `Cents`.
pub fn total_expenses<'a>(expenses: impl IntoIterator<Item = &'a Expense>) -> Option<Cents> {
    expenses
        .into_iter()
        .try_fold(0, |total: Cents, e| total.checked_add(e.amount_cents))
}
