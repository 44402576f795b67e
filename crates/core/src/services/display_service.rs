use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::transaction::{Transaction, TransactionType};

/// Formats amounts and dates for the records screen.
///
/// Amounts use Indian digit grouping (last three digits, then pairs):
/// `100000` → `₹1,00,000`.
#[derive(Debug, Clone)]
pub struct DisplayService {
    currency_symbol: String,
}

impl DisplayService {
    pub fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Symbol plus grouped amount, rounded to two decimals. Trailing zero
    /// decimals are dropped (`₹2,000`, `₹1,234.5`).
    pub fn format_currency(&self, amount: Decimal) -> String {
        let sign = if amount.is_sign_negative() && !amount.is_zero() {
            "-"
        } else {
            ""
        };
        let plain = amount.abs().round_dp(2).normalize().to_string();
        let (int_part, frac_part) = match plain.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (plain.as_str(), None),
        };

        let mut out = format!("{sign}{}{}", self.currency_symbol, group_indian(int_part));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    /// Amount with a leading `- ` for expenses and `+ ` for income.
    pub fn format_signed(&self, transaction: &Transaction) -> String {
        format!(
            "{}{}",
            amount_sign(transaction.transaction_type),
            self.format_currency(transaction.amount)
        )
    }

    /// Short date, e.g. `1 May 2025`.
    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format("%-d %b %Y").to_string()
    }
}

impl Default for DisplayService {
    fn default() -> Self {
        Self::new("₹")
    }
}

pub fn amount_sign(transaction_type: TransactionType) -> &'static str {
    match transaction_type {
        TransactionType::Expense => "- ",
        TransactionType::Income => "+ ",
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, last_three) = digits.split_at(digits.len() - 3);

    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{last_three}", groups.join(","))
}
