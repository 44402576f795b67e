use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::models::transaction::{Category, Transaction, TransactionType};

const MAY_1: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
const MAY_2: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 2).unwrap();
const MAY_3: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 3).unwrap();
const MAY_4: NaiveDate = NaiveDate::from_ymd_opt(2025, 5, 4).unwrap();

/// Sample data written on the very first read of an empty store.
pub fn seed_transactions() -> Vec<Transaction> {
    vec![
        seed("1", TransactionType::Expense, 2000, Category::Seeds, "Winter wheat seeds", MAY_1),
        seed("2", TransactionType::Expense, 3500, Category::Fertilizer, "Organic fertilizer", MAY_2),
        seed("3", TransactionType::Income, 10000, Category::CropSale, "Sold rice harvest", MAY_3),
        seed("4", TransactionType::Expense, 1500, Category::Labor, "Hired help for planting", MAY_4),
    ]
}

fn seed(
    id: &str,
    transaction_type: TransactionType,
    amount: i64,
    category: Category,
    description: &str,
    date: NaiveDate,
) -> Transaction {
    Transaction {
        id: id.to_string(),
        transaction_type,
        amount: Decimal::from(amount),
        category,
        description: description.to_string(),
        date,
    }
}
