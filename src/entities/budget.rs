//! Budget entities - Monthly spending caps and their spend-to-date projection.
//!
//! A [`Budget`] caps spending for one category in one calendar month. The
//! budget comparison endpoint joins each budget with the receipts of that
//! category and month and returns a [`BudgetWithSpent`]. Both are read-only
//! for the core.

use crate::core::round_half_up;
use serde::{Deserialize, Deserializer, Serialize};

/// Budget record as returned by the budgets endpoint
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier for the budget
    pub id: i64,
    /// Category this budget caps
    pub category_id: i64,
    /// Spending cap for the month
    pub amount: f64,
    /// Calendar month (1-12)
    pub month: u32,
    /// Four-digit year
    pub year: i32,
}

impl Budget {
    /// The (category, month, year) triple at most one budget may occupy.
    #[must_use]
    pub const fn slot(&self) -> (i64, u32, i32) {
        (self.category_id, self.month, self.year)
    }
}

/// A budget joined with the amount spent against it
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BudgetWithSpent {
    /// Budget identifier
    pub id: i64,
    /// Category this budget caps
    pub category_id: i64,
    /// Resolved category name
    pub category_name: String,
    /// Spending cap for the month
    pub amount: f64,
    /// Sum of matching receipt amounts
    pub spent: f64,
    /// `round(spent / amount * 100)`, 0 when `amount` is 0
    #[serde(deserialize_with = "deserialize_percentage")]
    pub percentage: i64,
    /// Calendar month (1-12)
    pub month: u32,
    /// Four-digit year
    pub year: i32,
}

impl BudgetWithSpent {
    /// Builds the projection for `budget`, deriving the percentage from `spent`.
    #[must_use]
    pub fn new(budget: &Budget, category_name: impl Into<String>, spent: f64) -> Self {
        Self {
            id: budget.id,
            category_id: budget.category_id,
            category_name: category_name.into(),
            amount: budget.amount,
            spent,
            percentage: Self::percentage_of(spent, budget.amount),
            month: budget.month,
            year: budget.year,
        }
    }

    /// Share of `amount` consumed by `spent`, as a rounded whole percentage.
    ///
    /// Returns 0 for a zero or non-finite budget amount so no `NaN` or infinity
    /// reaches the display.
    #[must_use]
    pub fn percentage_of(spent: f64, amount: f64) -> i64 {
        if amount == 0.0 || !amount.is_finite() {
            return 0;
        }
        round_half_up(spent / amount * 100.0)
    }

    /// The (category, month, year) triple this entry occupies.
    #[must_use]
    pub const fn slot(&self) -> (i64, u32, i32) {
        (self.category_id, self.month, self.year)
    }
}

// The comparison endpoint has been seen sending `65.0` as well as `65`.
fn deserialize_percentage<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = f64::deserialize(deserializer)?;
    Ok(round_half_up(value))
}
