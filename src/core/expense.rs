//! Expense overview business logic.
//!
//! Figures for the dashboard landing page: how spending splits across
//! categories, what was spent on a given day, the average receipt size and the
//! most recent expenses.

use crate::{
    core::{
        category::{CategoryDirectory, CategoryRef, UNCATEGORIZED},
        round_half_up,
    },
    entities::Receipt,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Total spent in one category, as the category expense endpoint reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    /// Category display name; None when the backend could not name it
    #[serde(default)]
    pub category_name: Option<String>,
    /// Sum of receipt amounts in the category
    #[serde(default)]
    pub total: f64,
}

/// A category's share of all spending.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryShare {
    /// Category display name
    pub category_name: String,
    /// Sum of receipt amounts in the category
    pub total: f64,
    /// Rounded share of the grand total, in percent
    pub percentage: i64,
}

/// One row of the recent expenses list.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpenseLine {
    /// Receipt the row was built from
    pub receipt_id: i64,
    /// Vendor, then subject, then "unspecified"
    pub description: String,
    /// Receipt amount
    pub amount: f64,
    /// Receipt date
    pub date: NaiveDate,
    /// Resolved category name
    pub category: String,
}

/// Sums receipt amounts per category name, in order of first appearance.
///
/// Uncategorized receipts and receipts pointing at unknown categories share
/// one [`UNCATEGORIZED`] bucket.
#[must_use]
pub fn totals_by_category(receipts: &[Receipt], directory: &CategoryDirectory) -> Vec<CategoryExpense> {
    let mut totals: Vec<CategoryExpense> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for receipt in receipts {
        let name = match directory.resolve(receipt.category_id) {
            CategoryRef::Known(category) => category.name.as_str(),
            CategoryRef::Unknown(_) | CategoryRef::Uncategorized => UNCATEGORIZED,
        };
        match index.get(name) {
            Some(&i) => totals[i].total += receipt.amount,
            None => {
                index.insert(name, totals.len());
                totals.push(CategoryExpense {
                    category_name: Some(name.to_string()),
                    total: receipt.amount,
                });
            }
        }
    }

    totals
}

/// Converts category totals into percentage shares.
///
/// Entries with a zero or negative total are dropped; a missing name becomes
/// `fallback_name`. Each share is `round(total / grand_total * 100)`, so shares
/// need not add up to exactly 100.
#[must_use]
pub fn category_shares(expenses: &[CategoryExpense], fallback_name: &str) -> Vec<CategoryShare> {
    let kept: Vec<(&str, f64)> = expenses
        .iter()
        .filter(|e| e.total > 0.0)
        .map(|e| {
            let name = e
                .category_name
                .as_deref()
                .filter(|n| !n.trim().is_empty())
                .unwrap_or(fallback_name);
            (name, e.total)
        })
        .collect();

    let grand_total: f64 = kept.iter().map(|(_, total)| total).sum();

    kept.into_iter()
        .map(|(name, total)| CategoryShare {
            category_name: name.to_string(),
            total,
            percentage: if grand_total > 0.0 {
                round_half_up(total / grand_total * 100.0)
            } else {
                0
            },
        })
        .collect()
}

/// Sum of the receipts dated `day`.
#[must_use]
pub fn spent_on(receipts: &[Receipt], day: NaiveDate) -> f64 {
    receipts
        .iter()
        .filter(|r| r.receipt_date == day)
        .map(|r| r.amount)
        .sum()
}

/// Rounded average receipt amount; 0 when there are no receipts.
#[must_use]
pub fn average_per_receipt(total: f64, count: usize) -> i64 {
    if count == 0 {
        return 0;
    }
    // Cast safety: receipt counts are far below 2^52.
    #[allow(clippy::cast_precision_loss)]
    let mean = total / count as f64;
    round_half_up(mean)
}

/// The `limit` newest receipts as expense rows.
///
/// Receipts sharing a date keep their input order.
#[must_use]
pub fn recent_expenses(
    receipts: &[Receipt],
    directory: &CategoryDirectory,
    limit: usize,
) -> Vec<ExpenseLine> {
    let mut newest: Vec<&Receipt> = receipts.iter().collect();
    newest.sort_by(|a, b| b.receipt_date.cmp(&a.receipt_date));

    newest
        .into_iter()
        .take(limit)
        .map(|r| ExpenseLine {
            receipt_id: r.id,
            description: r.description().to_string(),
            amount: r.amount,
            date: r.receipt_date,
            category: directory.display_name(r.category_id).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::entities::receipt::UNSPECIFIED;
    use crate::test_utils::{date, receipt, sample_categories, sample_receipts};

    fn expense(name: Option<&str>, total: f64) -> CategoryExpense {
        CategoryExpense {
            category_name: name.map(str::to_string),
            total,
        }
    }

    #[test]
    fn test_totals_by_category() {
        let directory = CategoryDirectory::new(&sample_categories());
        let totals = totals_by_category(&sample_receipts(), &directory);

        assert_eq!(totals.len(), 4);
        assert_eq!(totals[0].category_name.as_deref(), Some("Entertainment"));
        assert_eq!(totals[0].total, 1000.0);
        assert_eq!(totals[1].category_name.as_deref(), Some("Shopping"));
        assert_eq!(totals[1].total, 1550.0);
        assert_eq!(totals[2].category_name.as_deref(), Some(UNCATEGORIZED));
        assert_eq!(totals[2].total, 89.0);
    }

    #[test]
    fn test_totals_fold_unknown_into_uncategorized() {
        let directory = CategoryDirectory::new(&sample_categories());
        let mut loose = receipt(1, 10.0, "2024-01-03");
        loose.category_id = None;
        let mut dangling = receipt(2, 20.0, "2024-01-04");
        dangling.category_id = Some(42);

        let totals = totals_by_category(&[loose, dangling], &directory);
        assert_eq!(totals, vec![expense(Some(UNCATEGORIZED), 30.0)]);
    }

    #[test]
    fn test_category_shares() {
        let shares = category_shares(
            &[
                expense(Some("Food"), 300.0),
                expense(None, 100.0),
                expense(Some("Empty"), 0.0),
                expense(Some("Refund"), -50.0),
            ],
            UNCATEGORIZED,
        );

        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].category_name, "Food");
        assert_eq!(shares[0].percentage, 75);
        assert_eq!(shares[1].category_name, UNCATEGORIZED);
        assert_eq!(shares[1].percentage, 25);
    }

    #[test]
    fn test_category_shares_nothing_positive() {
        let shares = category_shares(&[expense(Some("Food"), 0.0)], UNCATEGORIZED);
        assert!(shares.is_empty());
        assert!(category_shares(&[], UNCATEGORIZED).is_empty());
    }

    #[test]
    fn test_category_expense_deserializes_missing_fields() {
        let parsed: Vec<CategoryExpense> =
            serde_json::from_str(r#"[{"category_name": null, "total": 12.5}, {}]"#)
                .unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].category_name, None);
        assert_eq!(parsed[1].total, 0.0);
    }

    #[test]
    fn test_spent_on() {
        let receipts = sample_receipts();
        assert_eq!(spent_on(&receipts, date("2024-01-10")), 1550.0);
        assert_eq!(spent_on(&receipts, date("2024-01-11")), 0.0);
    }

    #[test]
    fn test_average_per_receipt() {
        assert_eq!(average_per_receipt(1000.0, 3), 333);
        assert_eq!(average_per_receipt(1000.0, 0), 0);
        assert_eq!(average_per_receipt(0.0, 5), 0);
    }

    #[test]
    fn test_recent_expenses() {
        let directory = CategoryDirectory::new(&sample_categories());
        let rows = recent_expenses(&sample_receipts(), &directory, 3);

        let ids: Vec<i64> = rows.iter().map(|r| r.receipt_id).collect();
        assert_eq!(ids, vec![2, 4, 3]);
        assert_eq!(rows[0].description, "Lazada");
        assert_eq!(rows[0].category, "Shopping");
        assert_eq!(rows[2].description, "Receipt from 7-Eleven");
        assert_eq!(rows[2].category, UNCATEGORIZED);
    }

    #[test]
    fn test_recent_expenses_unspecified_description() {
        let mut r = receipt(1, 10.0, "2024-01-01");
        r.email_subject = None;
        let rows = recent_expenses(&[r], &CategoryDirectory::default(), 5);
        assert_eq!(rows[0].description, UNSPECIFIED);
    }
}
