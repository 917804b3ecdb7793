//! Budget aggregation business logic.
//!
//! This module turns a month's budget comparison rows into the figures shown on
//! the budget page: overall totals, the average utilization, and a severity band
//! per row. It can also build those rows locally from raw budgets and receipts,
//! and merge rows that share a (category, month, year) slot so totals are never
//! double-counted. Inputs are only ever borrowed.

use crate::{
    core::{category::CategoryDirectory, round_half_up},
    entities::{Budget, BudgetWithSpent, Receipt},
};
use chrono::Datelike;
use std::{collections::HashMap, fmt};
use tracing::{debug, warn};

/// Percentage at which a budget leaves the `Low` band.
pub const MEDIUM_FROM: i64 = 60;
/// Percentage at which a budget enters the `High` band.
pub const HIGH_FROM: i64 = 80;

/// Utilization band of a single budget, driving its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    /// Below 60%
    Low,
    /// 60% up to but excluding 80%
    Medium,
    /// 80% and above
    High,
}

impl Severity {
    /// Lowercase label of the band.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies a utilization percentage into its severity band.
///
/// `< 60` is low, `60..80` is medium, `>= 80` is high.
#[must_use]
pub const fn classify(percentage: i64) -> Severity {
    if percentage < MEDIUM_FROM {
        Severity::Low
    } else if percentage < HIGH_FROM {
        Severity::Medium
    } else {
        Severity::High
    }
}

/// Totals across a set of budget rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetSummary {
    /// Sum of budget amounts
    pub total_budget: f64,
    /// Sum of amounts spent
    pub total_spent: f64,
    /// `total_budget - total_spent`; negative when over budget overall
    pub total_remaining: f64,
    /// Rounded mean of the rows' percentages, 0 for no rows
    pub average_percentage: i64,
}

impl BudgetSummary {
    /// True when spending has not exceeded the combined budget.
    #[must_use]
    pub fn is_within_budget(&self) -> bool {
        self.total_remaining >= 0.0
    }

    /// `round(total_spent / total_budget * 100)`, 0 when nothing is budgeted.
    ///
    /// This weighs each row by its amount and can differ from
    /// `average_percentage`, which weighs every row equally. The summary keeps
    /// the average as its headline figure; this is offered alongside it.
    #[must_use]
    pub fn spent_ratio_percentage(&self) -> i64 {
        BudgetWithSpent::percentage_of(self.total_spent, self.total_budget)
    }
}

/// Computes totals and the average utilization of `items`.
///
/// Negative amounts or spends are summed as given.
///
/// # Arguments
/// * `items` - Budget rows for one month
///
/// # Returns
/// A `BudgetSummary`; all zero for an empty slice
#[must_use]
pub fn summarize(items: &[BudgetWithSpent]) -> BudgetSummary {
    let total_budget: f64 = items.iter().map(|item| item.amount).sum();
    let total_spent: f64 = items.iter().map(|item| item.spent).sum();

    let average_percentage = if items.is_empty() {
        0
    } else {
        // Percentages may be saturated at the i64 bounds.
        #[allow(clippy::cast_precision_loss)]
        let sum: f64 = items.iter().map(|item| item.percentage as f64).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / items.len() as f64;
        round_half_up(mean)
    };

    BudgetSummary {
        total_budget,
        total_spent,
        total_remaining: total_budget - total_spent,
        average_percentage,
    }
}

/// Keeps the rows belonging to `month`/`year`, in their original order.
#[must_use]
pub fn in_period(items: &[BudgetWithSpent], month: u32, year: i32) -> Vec<BudgetWithSpent> {
    items
        .iter()
        .filter(|item| item.month == month && item.year == year)
        .cloned()
        .collect()
}

/// Merges rows that occupy the same (category, month, year) slot.
///
/// Each merged row keeps the first row's id and name, sums the amounts and
/// spends, and recomputes its percentage. Rows without duplicates pass through
/// unchanged. Order follows each slot's first appearance.
#[must_use]
pub fn consolidate(items: &[BudgetWithSpent]) -> Vec<BudgetWithSpent> {
    let mut merged: Vec<BudgetWithSpent> = Vec::with_capacity(items.len());
    let mut index_by_slot: HashMap<(i64, u32, i32), usize> = HashMap::new();

    for item in items {
        if let Some(&idx) = index_by_slot.get(&item.slot()) {
            let existing = &mut merged[idx];
            warn!(
                "Duplicate budget {} for category '{}' in {}/{} merged into budget {}",
                item.id, item.category_name, item.month, item.year, existing.id
            );
            existing.amount += item.amount;
            existing.spent += item.spent;
            existing.percentage = BudgetWithSpent::percentage_of(existing.spent, existing.amount);
        } else {
            index_by_slot.insert(item.slot(), merged.len());
            merged.push(item.clone());
        }
    }

    merged
}

/// Joins raw budgets with the receipts of their category and month.
///
/// Stands in for the backend's comparison endpoint when a payload carries only
/// raw budgets. Category names come from `directory`.
#[must_use]
pub fn project_spending(
    budgets: &[Budget],
    directory: &CategoryDirectory,
    receipts: &[Receipt],
) -> Vec<BudgetWithSpent> {
    let projected: Vec<BudgetWithSpent> = budgets
        .iter()
        .map(|budget| {
            let spent: f64 = receipts
                .iter()
                .filter(|r| {
                    r.category_id == Some(budget.category_id)
                        && r.receipt_date.month() == budget.month
                        && r.receipt_date.year() == budget.year
                })
                .map(|r| r.amount)
                .sum();
            let name = directory.display_name(Some(budget.category_id));
            BudgetWithSpent::new(budget, name, spent)
        })
        .collect();

    debug!(
        "Projected spending for {} budgets from {} receipts",
        projected.len(),
        receipts.len()
    );
    projected
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{
        budget, budget_item, food_and_shopping, sample_categories, sample_receipts,
    };

    #[test]
    fn test_summarize_empty() {
        let summary = summarize(&[]);
        assert_eq!(summary, BudgetSummary::default());
        assert_eq!(summary.total_budget, 0.0);
        assert_eq!(summary.total_spent, 0.0);
        assert_eq!(summary.total_remaining, 0.0);
        assert_eq!(summary.average_percentage, 0);
    }

    #[test]
    fn test_summarize_food_and_shopping() {
        let summary = summarize(&food_and_shopping());
        assert_eq!(summary.total_budget, 7000.0);
        assert_eq!(summary.total_spent, 5150.0);
        assert_eq!(summary.total_remaining, 1850.0);
        assert_eq!(summary.average_percentage, 80);
        assert!(summary.is_within_budget());
    }

    #[test]
    fn test_summarize_over_budget_overall() {
        let items = vec![budget_item(107, "Travel", 1000.0, 1500.0, 150)];
        let summary = summarize(&items);
        assert_eq!(summary.total_remaining, -500.0);
        assert!(!summary.is_within_budget());
    }

    #[test]
    fn test_summarize_average_rounds_half_up() {
        let items = vec![
            budget_item(108, "A", 100.0, 10.0, 10),
            budget_item(109, "B", 100.0, 11.0, 11),
        ];
        // mean 10.5
        assert_eq!(summarize(&items).average_percentage, 11);
    }

    #[test]
    fn test_summarize_saturated_percentages() {
        let huge = BudgetWithSpent::percentage_of(1e6, 1e-300);
        assert_eq!(huge, i64::MAX);
        let items = vec![
            budget_item(121, "Tiny", 1e-300, 1e6, huge),
            budget_item(122, "Tinier", 1e-300, 1e6, huge),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.average_percentage, i64::MAX);
        assert_eq!(classify(summary.average_percentage), Severity::High);
    }

    #[test]
    fn test_summarize_passes_negative_values_through() {
        let items = vec![
            budget_item(110, "Refunds", -100.0, -20.0, 20),
            budget_item(111, "Food", 300.0, 120.0, 40),
        ];
        let summary = summarize(&items);
        assert_eq!(summary.total_budget, 200.0);
        assert_eq!(summary.total_spent, 100.0);
        assert_eq!(summary.average_percentage, 30);
    }

    #[test]
    fn test_summarize_does_not_mutate_input() {
        let items = food_and_shopping();
        let before = items.clone();
        let _ = summarize(&items);
        assert_eq!(items, before);
    }

    #[test]
    fn test_spent_ratio_differs_from_average() {
        let summary = summarize(&food_and_shopping());
        // 5150 / 7000 = 73.57%
        assert_eq!(summary.spent_ratio_percentage(), 74);
        assert_eq!(summary.average_percentage, 80);
        assert_eq!(BudgetSummary::default().spent_ratio_percentage(), 0);
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(59), Severity::Low);
        assert_eq!(classify(60), Severity::Medium);
        assert_eq!(classify(79), Severity::Medium);
        assert_eq!(classify(80), Severity::High);
    }

    #[test]
    fn test_classify_extremes() {
        assert_eq!(classify(-10), Severity::Low);
        assert_eq!(classify(0), Severity::Low);
        assert_eq!(classify(250), Severity::High);
    }

    #[test]
    fn test_in_period() {
        let mut feb = budget_item(112, "Food", 100.0, 50.0, 50);
        feb.month = 2;
        let items = vec![budget_item(113, "Food", 100.0, 10.0, 10), feb];
        let jan = in_period(&items, 1, 2024);
        assert_eq!(jan.len(), 1);
        assert_eq!(jan[0].percentage, 10);
    }

    #[test]
    fn test_consolidate_merges_duplicate_slots() {
        let mut first = budget_item(114, "Food", 1000.0, 300.0, 30);
        first.id = 1;
        first.category_id = 5;
        let mut second = budget_item(115, "Food", 1000.0, 500.0, 50);
        second.id = 2;
        second.category_id = 5;
        let mut other = budget_item(116, "Transport", 400.0, 100.0, 25);
        other.id = 3;
        other.category_id = 6;

        let merged = consolidate(&[first, other, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, 1);
        assert_eq!(merged[0].amount, 2000.0);
        assert_eq!(merged[0].spent, 800.0);
        assert_eq!(merged[0].percentage, 40);
        assert_eq!(merged[1].id, 3);
    }

    #[test]
    fn test_consolidate_keeps_unique_rows_verbatim() {
        let items = food_and_shopping();
        let merged = consolidate(&items);
        assert_eq!(merged, items);
    }

    #[test]
    fn test_project_spending_sums_matching_receipts() {
        let directory = CategoryDirectory::new(&sample_categories());
        let budgets = vec![
            budget(1, 2, 3100.0, 1, 2024),
            budget(2, 1, 1000.0, 1, 2024),
            budget(3, 1, 1000.0, 12, 2023),
            budget(4, 9, 300.0, 1, 2024),
        ];

        let rows = project_spending(&budgets, &directory, &sample_receipts());
        assert_eq!(rows.len(), 4);

        // Lazada 1200 + Shopee 350
        assert_eq!(rows[0].category_name, "Shopping");
        assert_eq!(rows[0].spent, 1550.0);
        assert_eq!(rows[0].percentage, 50);

        // January Netflix only; the December one belongs to budget 3
        assert_eq!(rows[1].spent, 500.0);
        assert_eq!(rows[1].percentage, 50);
        assert_eq!(rows[2].spent, 500.0);

        assert_eq!(rows[3].spent, 0.0);
        assert_eq!(rows[3].category_name, crate::core::category::UNKNOWN_CATEGORY);
    }
}
