use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Direction of money flow for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money spent on the farm
    Expense,
    /// Money received by the farm
    Income,
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionType::Expense => write!(f, "expense"),
            TransactionType::Income => write!(f, "income"),
        }
    }
}

/// Spending or earning category.
///
/// Which categories are allowed depends on the [`TransactionType`]:
/// see [`Category::for_type`]. `Other` is valid for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Seeds,
    Fertilizer,
    Pesticides,
    Equipment,
    Labor,
    Irrigation,
    CropSale,
    Subsidy,
    RentalIncome,
    Other,
}

/// Expense categories in picker order.
pub const EXPENSE_CATEGORIES: [Category; 7] = [
    Category::Seeds,
    Category::Fertilizer,
    Category::Pesticides,
    Category::Equipment,
    Category::Labor,
    Category::Irrigation,
    Category::Other,
];

/// Income categories in picker order.
pub const INCOME_CATEGORIES: [Category; 4] = [
    Category::CropSale,
    Category::Subsidy,
    Category::RentalIncome,
    Category::Other,
];

impl Category {
    /// The categories a transaction of `transaction_type` may use.
    pub fn for_type(transaction_type: TransactionType) -> &'static [Category] {
        match transaction_type {
            TransactionType::Expense => &EXPENSE_CATEGORIES,
            TransactionType::Income => &INCOME_CATEGORIES,
        }
    }

    /// Default picker selection when the form switches type.
    pub fn default_for(transaction_type: TransactionType) -> Self {
        Self::for_type(transaction_type)[0]
    }

    pub fn belongs_to(self, transaction_type: TransactionType) -> bool {
        Self::for_type(transaction_type).contains(&self)
    }

    /// Stable snake_case key, identical to the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Seeds => "seeds",
            Category::Fertilizer => "fertilizer",
            Category::Pesticides => "pesticides",
            Category::Equipment => "equipment",
            Category::Labor => "labor",
            Category::Irrigation => "irrigation",
            Category::CropSale => "crop_sale",
            Category::Subsidy => "subsidy",
            Category::RentalIncome => "rental_income",
            Category::Other => "other",
        }
    }

    /// Human-readable label: first letter capitalised, first underscore
    /// replaced by a space (`crop_sale` → `Crop sale`).
    pub fn label(self) -> String {
        let key = self.as_str().replacen('_', " ", 1);
        let mut chars = key.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EXPENSE_CATEGORIES
            .iter()
            .chain(INCOME_CATEGORIES.iter())
            .copied()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown category: {s}")))
    }
}

/// Largest amount a single transaction may carry (one trillion).
///
/// Keeps any realistic collection far away from `Decimal`'s range, so sums
/// over stored transactions cannot overflow.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// A single recorded income or expense event.
///
/// Serialized as one element of the JSON array kept under the
/// transactions storage key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier, immutable once assigned. Entries written without
    /// one decode with an empty id and are given one when loaded.
    #[serde(default)]
    pub id: String,

    /// Expense or Income
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    /// Always positive; the sign comes from `transaction_type`
    pub amount: Decimal,

    pub category: Category,

    #[serde(default)]
    pub description: String,

    /// Calendar date (no time component)
    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

/// Candidate transaction submitted by the caller.
///
/// `id` may be omitted, in which case the store generates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(rename = "type")]
    pub transaction_type: TransactionType,

    pub amount: Decimal,

    pub category: Category,

    #[serde(default)]
    pub description: String,

    #[serde(with = "date_format")]
    pub date: NaiveDate,
}

impl TransactionInput {
    pub fn new(
        transaction_type: TransactionType,
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: None,
            transaction_type,
            amount,
            category,
            description: description.into(),
            date,
        }
    }

    pub fn expense(
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Expense, amount, category, description, date)
    }

    pub fn income(
        amount: Decimal,
        category: Category,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self::new(TransactionType::Income, amount, category, description, date)
    }

    /// Attach a caller-chosen id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Check the input without touching storage.
    ///
    /// Rules:
    /// - Amount must be positive and at most [`MAX_AMOUNT`]
    /// - Description must not be blank
    /// - Category must belong to the transaction type
    pub fn validate(&self) -> Result<(), CoreError> {
        check_amount(self.amount)?;
        if self.description.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Please enter a description".into(),
            ));
        }
        if !self.category.belongs_to(self.transaction_type) {
            return Err(CoreError::ValidationError(format!(
                "Category '{}' is not valid for {} transactions",
                self.category, self.transaction_type
            )));
        }
        Ok(())
    }

    /// Turn the input into a stored transaction, generating an id when
    /// none (or a blank one) was supplied.
    pub fn into_transaction(self) -> Transaction {
        let id = match self.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => new_id(),
        };
        Transaction {
            id,
            transaction_type: self.transaction_type,
            amount: self.amount,
            category: self.category,
            description: self.description,
            date: self.date,
        }
    }
}

/// Fresh transaction id.
pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Parse a free-text amount field (as typed into a form).
pub fn parse_amount(raw: &str) -> Result<Decimal, CoreError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(CoreError::ValidationError(
            "Please enter a valid amount".into(),
        ));
    }
    let amount = Decimal::from_str(trimmed)?;
    check_amount(amount)?;
    Ok(amount)
}

fn check_amount(amount: Decimal) -> Result<(), CoreError> {
    if amount <= Decimal::ZERO {
        return Err(CoreError::ValidationError(
            "Please enter a valid amount".into(),
        ));
    }
    if amount > MAX_AMOUNT {
        return Err(CoreError::ValidationError(format!(
            "Amount must not exceed {MAX_AMOUNT}"
        )));
    }
    Ok(())
}

/// Parse a stored date: either `YYYY-MM-DD` or a full RFC 3339 timestamp,
/// in which case the calendar date in the timestamp's own offset is kept.
pub fn parse_date(raw: &str) -> Result<NaiveDate, CoreError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, date_format::FORMAT) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|e| CoreError::Deserialization(format!("Invalid date '{trimmed}': {e}")))
}

/// Tabs on the records screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecordsTab {
    /// Everything
    #[default]
    Overview,
    Expenses,
    Income,
}

impl RecordsTab {
    pub fn matches(self, transaction: &Transaction) -> bool {
        match self {
            RecordsTab::Overview => true,
            RecordsTab::Expenses => transaction.transaction_type == TransactionType::Expense,
            RecordsTab::Income => transaction.transaction_type == TransactionType::Income,
        }
    }
}

pub(crate) mod date_format {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}
