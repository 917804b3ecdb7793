//! Environment variable lookups.
//!
//! The binary loads `.env` first, so every variable here may come from either
//! the process environment or that file. Parsing is split from lookup so it can
//! be tested without touching the environment.

use crate::core::receipt_query::{CategoryFilter, ReceiptQuery, SortKey};
use crate::errors::{Error, Result};
use chrono::{Datelike, NaiveDate};

/// Path of the settings file.
pub const CONFIG_VAR: &str = "RECEIPT_BUDDY_CONFIG";
/// Overrides the snapshot path from the settings file.
pub const SNAPSHOT_VAR: &str = "RECEIPT_BUDDY_SNAPSHOT";
/// Reporting month as `YYYY-MM`.
pub const PERIOD_VAR: &str = "RECEIPT_BUDDY_PERIOD";
/// Free-text receipt search.
pub const SEARCH_VAR: &str = "RECEIPT_BUDDY_SEARCH";
/// Receipt category filter, `all` or an id.
pub const CATEGORY_VAR: &str = "RECEIPT_BUDDY_CATEGORY";
/// Receipt sort key, `date-desc` or `amount-desc`.
pub const SORT_VAR: &str = "RECEIPT_BUDDY_SORT";

/// Reads an optional variable; unset and empty are both None.
#[must_use]
pub fn optional_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses a `YYYY-MM` period into (month, year).
///
/// # Errors
/// `Error::InvalidPeriod` when the text is not a real month.
pub fn parse_period(text: &str) -> Result<(u32, i32)> {
    let trimmed = text.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .map(|first| (first.month(), first.year()))
        .map_err(|_| {
            let mut parts = trimmed.splitn(2, '-');
            let year = parts.next().and_then(|y| y.parse().ok()).unwrap_or(0);
            let month = parts.next().and_then(|m| m.parse().ok()).unwrap_or(0);
            Error::InvalidPeriod { month, year }
        })
}

/// Reporting period from [`PERIOD_VAR`], or the month containing `today`.
///
/// # Errors
/// `Error::InvalidPeriod` when the variable is set but malformed.
pub fn report_period(today: NaiveDate) -> Result<(u32, i32)> {
    optional_var(PERIOD_VAR).map_or_else(
        || Ok((today.month(), today.year())),
        |raw| parse_period(&raw),
    )
}

/// Builds receipt criteria from raw search, category and sort values.
///
/// # Errors
/// `Error::InvalidFilter` for an unknown category or sort value.
pub fn parse_receipt_query(
    search: Option<&str>,
    category: Option<&str>,
    sort: Option<&str>,
) -> Result<ReceiptQuery> {
    let mut query = ReceiptQuery::default();
    if let Some(search) = search {
        query = query.with_search(search);
    }
    if let Some(category) = category {
        query = query.with_category(category.parse::<CategoryFilter>()?);
    }
    if let Some(sort) = sort {
        query = query.sorted_by(sort.parse::<SortKey>()?);
    }
    Ok(query)
}

/// Receipt criteria from [`SEARCH_VAR`], [`CATEGORY_VAR`] and [`SORT_VAR`].
///
/// # Errors
/// `Error::InvalidFilter` for an unknown category or sort value.
pub fn receipt_query() -> Result<ReceiptQuery> {
    parse_receipt_query(
        optional_var(SEARCH_VAR).as_deref(),
        optional_var(CATEGORY_VAR).as_deref(),
        optional_var(SORT_VAR).as_deref(),
    )
}
