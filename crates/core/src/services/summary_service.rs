use rust_decimal::Decimal;

use crate::models::summary::{CategoryTotal, Summary};
use crate::models::transaction::{Transaction, TransactionType};

/// Aggregates transaction collections into totals and per-category breakdowns.
///
/// Pure business logic: no I/O, all sums in `Decimal`. Sums saturate at
/// `Decimal::MAX` instead of overflowing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    /// Income total, expense total and balance. An empty slice gives all zeros.
    pub fn summarize(&self, transactions: &[Transaction]) -> Summary {
        let total_income = self.total_for(transactions, TransactionType::Income);
        let total_expense = self.total_for(transactions, TransactionType::Expense);
        Summary {
            total_income,
            total_expense,
            balance: total_income.saturating_sub(total_expense),
        }
    }

    /// Sum of amounts for one transaction type.
    pub fn total_for(&self, transactions: &[Transaction], transaction_type: TransactionType) -> Decimal {
        transactions
            .iter()
            .filter(|t| t.transaction_type == transaction_type)
            .fold(Decimal::ZERO, |acc, t| acc.saturating_add(t.amount))
    }

    /// Expense totals per category, in the order each category first appears.
    pub fn category_breakdown(&self, transactions: &[Transaction]) -> Vec<CategoryTotal> {
        let mut breakdown: Vec<CategoryTotal> = Vec::new();

        for t in transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
        {
            // Linear scan: there are at most seven expense categories.
            match breakdown.iter_mut().find(|c| c.category == t.category) {
                Some(entry) => entry.total = entry.total.saturating_add(t.amount),
                None => breakdown.push(CategoryTotal {
                    category: t.category,
                    total: t.amount,
                }),
            }
        }

        breakdown
    }
}
