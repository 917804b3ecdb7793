//! Budget form validation.
//!
//! Checks what a user typed into the create/edit budget form before it is sent
//! to the backend. Creating, updating and deleting budgets is the backend's job;
//! afterwards the caller refetches and re-runs the aggregation.

use crate::{
    entities::Budget,
    errors::{Error, Result},
};
use tracing::debug;

/// Earliest accepted budget year.
pub const MIN_YEAR: i32 = 1000;
/// Latest accepted budget year.
pub const MAX_YEAR: i32 = 9999;

/// Fields of the create/edit budget form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetDraft {
    /// Category the budget will cap
    pub category_id: i64,
    /// Spending cap
    pub amount: f64,
    /// Calendar month (1-12)
    pub month: u32,
    /// Four-digit year
    pub year: i32,
}

impl BudgetDraft {
    /// Draft pre-filled from an existing budget, for the edit form.
    #[must_use]
    pub const fn from_budget(budget: &Budget) -> Self {
        Self {
            category_id: budget.category_id,
            amount: budget.amount,
            month: budget.month,
            year: budget.year,
        }
    }

    /// Parses the raw form fields, then validates them.
    ///
    /// # Errors
    /// `Error::InvalidFilter` for an unparseable category, `Error::InvalidAmount`
    /// for an unparseable or non-positive amount, `Error::InvalidPeriod` for a
    /// bad month or year.
    pub fn parse(category_id: &str, amount: &str, month: &str, year: &str) -> Result<Self> {
        let category_id = category_id
            .trim()
            .parse::<i64>()
            .map_err(|_| Error::InvalidFilter {
                value: category_id.to_string(),
            })?;
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidAmount { amount: f64::NAN })?;
        let month_raw = month.trim().parse::<i64>().unwrap_or(0);
        let year_raw = year.trim().parse::<i64>().unwrap_or(0);

        let (Ok(month), Ok(year)) = (u32::try_from(month_raw), i32::try_from(year_raw)) else {
            return Err(Error::InvalidPeriod {
                month: month_raw,
                year: year_raw,
            });
        };

        let draft = Self {
            category_id,
            amount,
            month,
            year,
        };
        draft.validate()?;
        Ok(draft)
    }

    /// Checks the amount is a positive finite number and the period is real.
    ///
    /// # Errors
    /// `Error::InvalidAmount` or `Error::InvalidPeriod`.
    pub fn validate(&self) -> Result<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(Error::InvalidAmount {
                amount: self.amount,
            });
        }

        if !(1..=12).contains(&self.month) || !(MIN_YEAR..=MAX_YEAR).contains(&self.year) {
            return Err(Error::InvalidPeriod {
                month: i64::from(self.month),
                year: i64::from(self.year),
            });
        }

        Ok(())
    }

    /// Rejects a draft that would share a (category, month, year) slot with
    /// another budget.
    ///
    /// # Arguments
    /// * `existing` - Budgets currently known for the user
    /// * `editing_id` - Id of the budget being edited, which may keep its own slot
    ///
    /// # Errors
    /// `Error::DuplicateBudget` naming the occupied slot.
    pub fn ensure_unique(&self, existing: &[Budget], editing_id: Option<i64>) -> Result<()> {
        let slot = (self.category_id, self.month, self.year);
        let clash = existing
            .iter()
            .filter(|b| Some(b.id) != editing_id)
            .find(|b| b.slot() == slot);

        if let Some(other) = clash {
            debug!("Budget draft collides with budget {}", other.id);
            return Err(Error::DuplicateBudget {
                category_id: self.category_id,
                month: self.month,
                year: self.year,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::budget;

    fn draft() -> BudgetDraft {
        BudgetDraft {
            category_id: 2,
            amount: 2000.0,
            month: 1,
            year: 2024,
        }
    }

    #[test]
    fn test_parse_valid_form() {
        let parsed = BudgetDraft::parse("2", " 2000.50 ", "1", "2024").unwrap();
        assert_eq!(parsed.category_id, 2);
        assert_eq!(parsed.amount, 2000.5);
        assert_eq!(parsed.month, 1);
        assert_eq!(parsed.year, 2024);
    }

    #[test]
    fn test_parse_rejects_bad_amount() {
        assert!(matches!(
            BudgetDraft::parse("2", "abc", "1", "2024"),
            Err(Error::InvalidAmount { .. })
        ));
        assert!(matches!(
            BudgetDraft::parse("2", "0", "1", "2024"),
            Err(Error::InvalidAmount { amount }) if amount == 0.0
        ));
        assert!(matches!(
            BudgetDraft::parse("2", "-5", "1", "2024"),
            Err(Error::InvalidAmount { .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_period() {
        assert!(matches!(
            BudgetDraft::parse("2", "100", "13", "2024"),
            Err(Error::InvalidPeriod { month: 13, year: 2024 })
        ));
        assert!(matches!(
            BudgetDraft::parse("2", "100", "-1", "2024"),
            Err(Error::InvalidPeriod { month: -1, .. })
        ));
        assert!(matches!(
            BudgetDraft::parse("2", "100", "6", "24"),
            Err(Error::InvalidPeriod { year: 24, .. })
        ));
    }

    #[test]
    fn test_parse_rejects_bad_category() {
        assert!(matches!(
            BudgetDraft::parse("", "100", "1", "2024"),
            Err(Error::InvalidFilter { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_infinite_amount() {
        let mut d = draft();
        d.amount = f64::INFINITY;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_ensure_unique_detects_clash() {
        let existing = vec![budget(7, 2, 500.0, 1, 2024), budget(8, 3, 500.0, 1, 2024)];
        let err = draft().ensure_unique(&existing, None).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateBudget {
                category_id: 2,
                month: 1,
                year: 2024
            }
        ));
    }

    #[test]
    fn test_ensure_unique_allows_editing_own_slot() {
        let existing = vec![budget(7, 2, 500.0, 1, 2024)];
        assert!(draft().ensure_unique(&existing, Some(7)).is_ok());
    }

    #[test]
    fn test_ensure_unique_other_period_is_fine() {
        let existing = vec![budget(7, 2, 500.0, 2, 2024)];
        assert!(draft().ensure_unique(&existing, None).is_ok());
    }

    #[test]
    fn test_from_budget_round_trips_fields() {
        let b = budget(7, 2, 500.0, 2, 2024);
        let d = BudgetDraft::from_budget(&b);
        assert_eq!(d.amount, 500.0);
        assert_eq!((d.category_id, d.month, d.year), b.slot());
    }
}
