use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::Category;

/// Aggregate totals over a transaction collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Summary {
    /// Sum of all income amounts
    pub total_income: Decimal,

    /// Sum of all expense amounts
    pub total_expense: Decimal,

    /// total_income - total_expense (may be negative)
    pub balance: Decimal,
}

/// Total spent in one expense category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: Decimal,
}
