use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single slice for pie/bar chart rendering.
///
/// The core computes name, value and color; the frontend just draws them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    /// Legend label (e.g., "Income", "seeds")
    pub name: String,

    /// Slice size in currency units
    pub value: Decimal,

    /// CSS color string (e.g., "#4CAF50")
    pub color: String,
}

impl ChartSlice {
    pub fn new(name: impl Into<String>, value: Decimal, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            color: color.into(),
        }
    }
}
