use crate::models::chart::ChartSlice;
use crate::models::summary::{CategoryTotal, Summary};
use crate::models::transaction::Category;

pub const INCOME_COLOR: &str = "#4CAF50";
pub const EXPENSE_COLOR: &str = "#F44336";

/// Generates chart-ready slices from summaries.
///
/// The core computes all the numbers and colors; the frontend only renders.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChartService;

impl ChartService {
    pub fn new() -> Self {
        Self
    }

    /// Two-slice income vs. expense pie.
    pub fn pie_chart(&self, summary: &Summary) -> Vec<ChartSlice> {
        vec![
            ChartSlice::new("Income", summary.total_income, INCOME_COLOR),
            ChartSlice::new("Expense", summary.total_expense, EXPENSE_COLOR),
        ]
    }

    /// One slice per expense category, keeping the breakdown's order.
    pub fn category_chart(&self, breakdown: &[CategoryTotal]) -> Vec<ChartSlice> {
        breakdown
            .iter()
            .map(|c| ChartSlice::new(c.category.as_str(), c.total, Self::color_for(c.category)))
            .collect()
    }

    /// Fixed palette color for a category.
    pub fn color_for(category: Category) -> &'static str {
        match category {
            Category::Seeds => "#8BC34A",
            Category::Fertilizer => "#009688",
            Category::Pesticides => "#FF5722",
            Category::Equipment => "#3F51B5",
            Category::Labor => "#9C27B0",
            Category::Irrigation => "#03A9F4",
            Category::CropSale => "#4CAF50",
            Category::Subsidy => "#2196F3",
            Category::RentalIncome => "#FFEB3B",
            Category::Other => "#607D8B",
        }
    }
}
