//! Core business logic - framework-agnostic filtering, aggregation and insights.
//!
//! Every function here is synchronous and pure: inputs are borrowed, outputs are
//! new values, and nothing is cached between calls.

/// Budget-vs-spend totals, severity bands and duplicate consolidation
pub mod budget;
/// Budget create/edit form validation
pub mod budget_form;
/// Category lookup and display-name resolution
pub mod category;
/// Dashboard expense figures derived from receipts
pub mod expense;
/// Recommendation facts derived from budget utilization
pub mod insight;
/// Receipt filtering, sorting and list query parameters
pub mod receipt_query;
/// Plain-text rendering of reports and receipt tables
pub mod report;

/// Rounds to the nearest integer with halves going towards positive infinity.
///
/// Percentages coming from the backend are rounded this way, so local
/// recomputation uses the same rule. Non-finite input yields 0.
#[must_use]
pub fn round_half_up(value: f64) -> i64 {
    if !value.is_finite() {
        return 0;
    }
    // Cast safety: saturating float-to-int conversion, values are percentages or currency units.
    #[allow(clippy::cast_possible_truncation)]
    let rounded = (value + 0.5).floor() as i64;
    rounded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(79.5), 80);
        assert_eq!(round_half_up(79.49), 79);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
        assert_eq!(round_half_up(0.0), 0);
    }

    #[test]
    fn test_round_half_up_non_finite() {
        assert_eq!(round_half_up(f64::NAN), 0);
        assert_eq!(round_half_up(f64::INFINITY), 0);
    }
}
