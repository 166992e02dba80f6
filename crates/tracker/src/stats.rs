//! Spending aggregation over an expense list.

use std::collections::HashMap;

use api_types::expense::{Category, ExpenseRecord};

#[derive(Debug, Default, PartialEq)]
pub struct SpendingSummary {
    pub total: f64,
    pub count: usize,
    pub by_category: HashMap<Category, f64>,
}

impl SpendingSummary {
    /// Category with the highest total, if any expenses exist.
    pub fn top_category(&self) -> Option<(Category, f64)> {
        self.by_category
            .iter()
            .map(|(&category, &total)| (category, total))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

pub fn summarize(expenses: &[ExpenseRecord]) -> SpendingSummary {
    expenses.iter().fold(SpendingSummary::default(), |mut acc, record| {
        acc.total += record.amount;
        acc.count += 1;
        *acc.by_category.entry(record.category).or_insert(0.0) += record.amount;
        acc
    })
}
