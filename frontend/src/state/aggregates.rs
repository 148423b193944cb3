//! Figures derived from the in-memory expense list.
//!
//! Nothing here is cached: callers recompute on every render. Sums are
//! accumulated left to right starting from zero, so results match a plain
//! fold over the list in its current order.

use std::collections::HashSet;

use shared::Expense;

pub fn total_expenses(expenses: &[Expense]) -> f64 {
    expenses.iter().fold(0.0, |sum, expense| sum + expense.amount)
}

/// May be negative when spending exceeds salary
pub fn remaining_budget(salary: f64, expenses: &[Expense]) -> f64 {
    salary - total_expenses(expenses)
}

/// Distinct categories in the order they first appear
pub fn categories(expenses: &[Expense]) -> Vec<&str> {
    let mut seen = HashSet::new();
    expenses
        .iter()
        .map(|expense| expense.category.as_str())
        .filter(|category| seen.insert(*category))
        .collect()
}

/// Per-category sums, ordered like [`categories`]
pub fn category_totals(expenses: &[Expense]) -> Vec<(String, f64)> {
    categories(expenses)
        .into_iter()
        .map(|category| {
            let total = expenses
                .iter()
                .filter(|expense| expense.category == category)
                .fold(0.0, |sum, expense| sum + expense.amount);
            (category.to_string(), total)
        })
        .collect()
}
