//! Shared test utilities for `receipt-buddy`.
//!
//! Builders for receipts, categories and budgets with sensible defaults, plus a
//! small fixed data set used across the core tests.
#![allow(clippy::unwrap_used)]

use crate::entities::{Budget, BudgetWithSpent, Category, Receipt};
use chrono::NaiveDate;

/// Parses a `YYYY-MM-DD` literal.
pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

/// Creates a test receipt with sensible defaults.
///
/// # Defaults
/// * `email_subject`: `"Receipt #<id>"`
/// * `email_from`: `"receipts@example.com"`
/// * `vendor_name`: None
/// * `category_id`: None
/// * `currency`: `"THB"`
/// * `created_at`: midnight of `receipt_date`
pub fn receipt(id: i64, amount: f64, receipt_date: &str) -> Receipt {
    let day = date(receipt_date);
    Receipt {
        id,
        email_subject: Some(format!("Receipt #{id}")),
        email_from: Some("receipts@example.com".to_string()),
        vendor_name: None,
        category_id: None,
        receipt_date: day,
        amount,
        currency: "THB".to_string(),
        receipt_number: None,
        payment_method: None,
        notes: None,
        created_at: day.and_hms_opt(0, 0, 0).unwrap(),
    }
}

/// Creates a test receipt from a vendor, filed under `category_id`.
pub fn vendor_receipt(
    id: i64,
    vendor: &str,
    category_id: Option<i64>,
    amount: f64,
    receipt_date: &str,
) -> Receipt {
    let mut r = receipt(id, amount, receipt_date);
    r.vendor_name = Some(vendor.to_string());
    r.email_subject = Some(format!("Your {vendor} receipt"));
    r.email_from = Some(format!("noreply@{}.example", vendor.to_lowercase()));
    r.category_id = category_id;
    r
}

/// Creates a test category with a neutral color and no icon.
pub fn category(id: i64, name: &str) -> Category {
    Category {
        id,
        name: name.to_string(),
        color: "#2F584F".to_string(),
        icon: None,
    }
}

/// Categories 1-3 used by [`sample_receipts`].
pub fn sample_categories() -> Vec<Category> {
    vec![
        category(1, "Entertainment"),
        category(2, "Shopping"),
        category(3, "Transport"),
    ]
}

/// Six receipts spanning December 2023 and January 2024.
///
/// Receipt 3 is uncategorized and has no vendor name.
pub fn sample_receipts() -> Vec<Receipt> {
    let mut seven_eleven = receipt(3, 89.0, "2024-01-08");
    seven_eleven.email_subject = Some("Receipt from 7-Eleven".to_string());
    seven_eleven.email_from = Some("noreply@7eleven.example".to_string());

    vec![
        vendor_receipt(1, "Netflix", Some(1), 500.0, "2024-01-05"),
        vendor_receipt(2, "Lazada", Some(2), 1200.0, "2024-01-10"),
        seven_eleven,
        vendor_receipt(4, "Shopee", Some(2), 350.0, "2024-01-10"),
        vendor_receipt(5, "Grab", Some(3), 150.0, "2024-01-02"),
        vendor_receipt(6, "Netflix", Some(1), 500.0, "2023-12-05"),
    ]
}

/// Creates a raw budget.
pub fn budget(id: i64, category_id: i64, amount: f64, month: u32, year: i32) -> Budget {
    Budget {
        id,
        category_id,
        amount,
        month,
        year,
    }
}

/// Creates a budget comparison row for January 2024 with an explicit percentage.
///
/// The row's id equals its category id.
pub fn budget_item(
    category_id: i64,
    name: &str,
    amount: f64,
    spent: f64,
    percentage: i64,
) -> BudgetWithSpent {
    BudgetWithSpent {
        id: category_id,
        category_id,
        category_name: name.to_string(),
        amount,
        spent,
        percentage,
        month: 1,
        year: 2024,
    }
}

/// The Food/Shopping pair: 7000 budgeted, 5150 spent, average 80%.
pub fn food_and_shopping() -> Vec<BudgetWithSpent> {
    vec![
        budget_item(1, "Food", 5000.0, 3250.0, 65),
        budget_item(2, "Shopping", 2000.0, 1900.0, 95),
    ]
}
