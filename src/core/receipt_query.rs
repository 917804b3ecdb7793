//! Receipt query business logic.
//!
//! This module holds the filter criteria behind the receipt list (free-text
//! search, category, date range and sort order) and recomputes the visible list
//! from an already-fetched receipt collection. It also models the list endpoint's
//! query parameters so the same constraints can be sent to the backend or
//! evaluated locally against a snapshot.

use crate::{
    entities::Receipt,
    errors::{Error, Result},
};
use chrono::NaiveDate;
use serde::Serialize;
use std::{fmt, str::FromStr};
use tracing::debug;

/// Category criterion: everything, or receipts filed under one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// No category filtering (`"all"`)
    #[default]
    All,
    /// Only receipts whose `category_id` equals this id
    Category(i64),
}

impl CategoryFilter {
    /// Whether a receipt with `category_id` passes this filter.
    ///
    /// Uncategorized receipts never match a concrete category.
    #[must_use]
    pub fn admits(self, category_id: Option<i64>) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => category_id == Some(id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        trimmed
            .parse::<i64>()
            .map(Self::Category)
            .map_err(|_| Error::InvalidFilter {
                value: s.to_string(),
            })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(id) => write!(f, "{id}"),
        }
    }
}

/// Sort order of the receipt list. Both keys sort descending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SortKey {
    /// Newest `receipt_date` first
    #[default]
    DateDesc,
    /// Largest `amount` first
    AmountDesc,
}

impl SortKey {
    /// Wire name of the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DateDesc => "date-desc",
            Self::AmountDesc => "amount-desc",
        }
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "date-desc" => Ok(Self::DateDesc),
            "amount-desc" => Ok(Self::AmountDesc),
            _ => Err(Error::InvalidFilter {
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclusive date bounds; an unset side imposes no constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Earliest admitted `receipt_date`
    pub start: Option<NaiveDate>,
    /// Latest admitted `receipt_date`
    pub end: Option<NaiveDate>,
}

impl DateRange {
    /// Range with both bounds given.
    #[must_use]
    pub const fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// True when neither bound is set.
    #[must_use]
    pub const fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }

    /// Whether `date` lies within the bounds, both ends inclusive.
    #[must_use]
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start.is_none_or(|start| date >= start) && self.end.is_none_or(|end| date <= end)
    }
}

/// Filter criteria for the receipt list.
///
/// The default value is the unfiltered, newest-first view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReceiptQuery {
    /// Case-insensitive text matched against subject, vendor and sender
    pub search_query: String,
    /// Category criterion
    pub selected_category: CategoryFilter,
    /// Sort order
    pub sort_by: SortKey,
    /// Date bounds, applied first
    pub date_range: DateRange,
}

impl ReceiptQuery {
    /// Sets the free-text search.
    #[must_use]
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search_query = query.into();
        self
    }

    /// Sets the category criterion.
    #[must_use]
    pub const fn with_category(mut self, category: CategoryFilter) -> Self {
        self.selected_category = category;
        self
    }

    /// Sets the sort order.
    #[must_use]
    pub const fn sorted_by(mut self, sort_by: SortKey) -> Self {
        self.sort_by = sort_by;
        self
    }

    /// Sets the date bounds.
    #[must_use]
    pub const fn within(mut self, date_range: DateRange) -> Self {
        self.date_range = date_range;
        self
    }

    /// Criteria restored to their defaults: empty search, all categories,
    /// newest first, no date bounds. The receipt list itself is untouched.
    #[must_use]
    #[allow(clippy::unused_self)]
    pub fn reset(&self) -> Self {
        Self::default()
    }

    /// True when no criterion differs from the defaults.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Lowercased search needle, or None when the query is empty or whitespace.
    #[must_use]
    pub fn search_needle(&self) -> Option<String> {
        if self.search_query.trim().is_empty() {
            None
        } else {
            Some(self.search_query.to_lowercase())
        }
    }

    /// Whether `receipt` passes the date, category and text criteria.
    #[must_use]
    pub fn matches(&self, receipt: &Receipt) -> bool {
        let needle = self.search_needle();
        self.matches_with(receipt, needle.as_deref())
    }

    fn matches_with(&self, receipt: &Receipt, needle: Option<&str>) -> bool {
        self.date_range.contains(receipt.receipt_date)
            && self.selected_category.admits(receipt.category_id)
            && needle.is_none_or(|n| receipt.mentions(n))
    }

    /// Produces the filtered, sorted view of `source`.
    ///
    /// Filters are independent predicates, so only their placement before the
    /// sort matters. The sort is stable: receipts with equal keys keep their
    /// order from `source`.
    ///
    /// # Arguments
    /// * `source` - Receipts as fetched from the backend
    ///
    /// # Returns
    /// A new list; `source` is never modified
    #[must_use]
    pub fn apply(&self, source: &[Receipt]) -> Vec<Receipt> {
        let needle = self.search_needle();
        let mut view: Vec<Receipt> = source
            .iter()
            .filter(|r| self.matches_with(r, needle.as_deref()))
            .cloned()
            .collect();

        match self.sort_by {
            SortKey::DateDesc => view.sort_by(|a, b| b.receipt_date.cmp(&a.receipt_date)),
            SortKey::AmountDesc => view.sort_by(|a, b| b.amount.total_cmp(&a.amount)),
        }

        debug!(
            "Receipt view recomputed: {} of {} receipts match (sort: {})",
            view.len(),
            source.len(),
            self.sort_by
        );
        view
    }
}

/// Query parameters accepted by the receipt list endpoint.
///
/// Serializes to the endpoint's parameter names, omitting unset fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReceiptListParams {
    /// Number of receipts to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<usize>,
    /// Maximum number of receipts to return
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
    /// Case-insensitive vendor substring
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vendor: Option<String>,
    /// Exact category id
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    /// Earliest receipt date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// Latest receipt date, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Smallest amount, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_amount: Option<f64>,
    /// Largest amount, inclusive
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_amount: Option<f64>,
}

impl ReceiptListParams {
    /// The fetch issued for the receipt page: a page limit plus the query's date range.
    ///
    /// Category and text criteria stay client-side and are applied by
    /// [`ReceiptQuery::apply`] after the fetch.
    #[must_use]
    pub const fn for_query(query: &ReceiptQuery, limit: usize) -> Self {
        Self {
            skip: None,
            limit: Some(limit),
            vendor: None,
            category_id: None,
            start_date: query.date_range.start,
            end_date: query.date_range.end,
            min_amount: None,
            max_amount: None,
        }
    }

    /// Whether `receipt` satisfies every set constraint. Paging is ignored.
    #[must_use]
    pub fn matches(&self, receipt: &Receipt) -> bool {
        let vendor_ok = self.vendor.as_deref().is_none_or(|v| {
            receipt
                .vendor_name
                .as_deref()
                .is_some_and(|name| name.to_lowercase().contains(&v.to_lowercase()))
        });
        let dates = DateRange {
            start: self.start_date,
            end: self.end_date,
        };

        vendor_ok
            && self.category_id.is_none_or(|id| receipt.category_id == Some(id))
            && dates.contains(receipt.receipt_date)
            && self.min_amount.is_none_or(|min| receipt.amount >= min)
            && self.max_amount.is_none_or(|max| receipt.amount <= max)
    }

    /// Evaluates the parameters against a local collection, paging included.
    #[must_use]
    pub fn select(&self, source: &[Receipt]) -> Vec<Receipt> {
        source
            .iter()
            .filter(|r| self.matches(r))
            .skip(self.skip.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect()
    }
}

/// Returns a copy of `source` with one receipt moved to `category_id`.
///
/// Used to refresh the list once the backend has accepted a category update.
///
/// # Errors
/// Returns `Error::ReceiptNotFound` when no receipt has `receipt_id`.
pub fn reassign_category(
    source: &[Receipt],
    receipt_id: i64,
    category_id: Option<i64>,
) -> Result<Vec<Receipt>> {
    if !source.iter().any(|r| r.id == receipt_id) {
        return Err(Error::ReceiptNotFound { id: receipt_id });
    }

    Ok(source
        .iter()
        .map(|r| {
            let mut r = r.clone();
            if r.id == receipt_id {
                r.category_id = category_id;
            }
            r
        })
        .collect())
}
