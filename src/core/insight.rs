//! Budget insight business logic.
//!
//! Derives the facts behind the budget page's recommendations: which categories
//! are close to or past their cap, which are barely used, and which of three
//! canned narratives fits the month's overall utilization. The facts are
//! structured values; wording and localization belong to the presentation layer.

use crate::{core::budget::BudgetSummary, core::round_half_up, entities::BudgetWithSpent};
use serde::Deserialize;

/// Cut-offs used when deriving insights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct InsightThresholds {
    /// Rows at or above this percentage are reported as over budget
    pub over_budget: i64,
    /// Rows at or below this percentage are reported as underutilized
    pub underutilized: i64,
    /// Average strictly above this is high usage
    pub high_usage_above: i64,
    /// Average strictly below this is low usage
    pub low_usage_below: i64,
}

impl Default for InsightThresholds {
    fn default() -> Self {
        Self {
            over_budget: 90,
            underutilized: 30,
            high_usage_above: 80,
            low_usage_below: 50,
        }
    }
}

/// Categories using little of their budget, with their mean utilization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Underutilized {
    /// Names of the qualifying categories, in input order
    pub categories: Vec<String>,
    /// Rounded mean percentage of exactly those rows; None when there are none
    pub mean_percentage: Option<i64>,
}

impl Underutilized {
    /// True when no category qualified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Which overall narrative the month's average utilization calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NarrativeBand {
    /// Spending is high; advise caution for the rest of the month
    HighUsage,
    /// Spending is well under budget
    LowUsage,
    /// Spending is on track
    Normal,
}

/// Names of categories whose percentage is at least `threshold`.
#[must_use]
pub fn over_budget_categories(items: &[BudgetWithSpent], threshold: i64) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.percentage >= threshold)
        .map(|item| item.category_name.clone())
        .collect()
}

/// Categories whose percentage is at most `threshold`, plus their mean.
#[must_use]
pub fn underutilized_categories(items: &[BudgetWithSpent], threshold: i64) -> Underutilized {
    let low: Vec<&BudgetWithSpent> = items
        .iter()
        .filter(|item| item.percentage <= threshold)
        .collect();

    let mean_percentage = if low.is_empty() {
        None
    } else {
        #[allow(clippy::cast_precision_loss)]
        let sum: f64 = low.iter().map(|item| item.percentage as f64).sum();
        #[allow(clippy::cast_precision_loss)]
        let mean = sum / low.len() as f64;
        Some(round_half_up(mean))
    };

    Underutilized {
        categories: low.iter().map(|item| item.category_name.clone()).collect(),
        mean_percentage,
    }
}

/// Maps the average utilization onto a narrative band using the default cut-offs.
///
/// `> 80` is high usage, `< 50` is low usage, anything else is normal.
#[must_use]
pub fn overall_narrative_band(average_percentage: i64) -> NarrativeBand {
    narrative_band_with(average_percentage, &InsightThresholds::default())
}

/// Maps the average utilization onto a narrative band with explicit cut-offs.
#[must_use]
pub const fn narrative_band_with(
    average_percentage: i64,
    thresholds: &InsightThresholds,
) -> NarrativeBand {
    if average_percentage > thresholds.high_usage_above {
        NarrativeBand::HighUsage
    } else if average_percentage < thresholds.low_usage_below {
        NarrativeBand::LowUsage
    } else {
        NarrativeBand::Normal
    }
}

/// All insight facts for one month's budget rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insights {
    /// Categories at or past the over-budget threshold
    pub over_budget: Vec<String>,
    /// Categories at or under the underutilized threshold
    pub underutilized: Underutilized,
    /// The month's average utilization
    pub average_percentage: i64,
    /// Narrative band of that average
    pub band: NarrativeBand,
}

impl Insights {
    /// Derives every insight from the same snapshot of rows.
    ///
    /// `summary` must come from [`crate::core::budget::summarize`] over `items`.
    #[must_use]
    pub fn derive(
        items: &[BudgetWithSpent],
        summary: &BudgetSummary,
        thresholds: &InsightThresholds,
    ) -> Self {
        Self {
            over_budget: over_budget_categories(items, thresholds.over_budget),
            underutilized: underutilized_categories(items, thresholds.underutilized),
            average_percentage: summary.average_percentage,
            band: narrative_band_with(summary.average_percentage, thresholds),
        }
    }
}
