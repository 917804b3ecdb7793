//! Report generation business logic.
//!
//! This module assembles a month's budget figures into a structured report and
//! renders reports and receipt lists as plain text. Assembly is pure; the
//! rendering functions only build strings.

use crate::{
    core::{
        budget::{self, BudgetSummary, Severity},
        category::CategoryDirectory,
        insight::{InsightThresholds, Insights, NarrativeBand},
    },
    entities::{BudgetWithSpent, Receipt},
};
use std::fmt::Write;

/// One budget row of a report with its severity band.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetLine {
    /// The budget row
    pub item: BudgetWithSpent,
    /// Band of `item.percentage`
    pub severity: Severity,
}

/// A month's budget figures, ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetReport {
    /// Calendar month (1-12)
    pub month: u32,
    /// Four-digit year
    pub year: i32,
    /// Rows after duplicate consolidation
    pub lines: Vec<BudgetLine>,
    /// Totals over `lines`
    pub summary: BudgetSummary,
    /// Recommendation facts over `lines`
    pub insights: Insights,
}

impl BudgetReport {
    /// Builds the report for `month`/`year` from comparison rows.
    ///
    /// Rows outside the period are ignored and duplicate slots are merged before
    /// any totals are taken.
    #[must_use]
    pub fn build(
        items: &[BudgetWithSpent],
        month: u32,
        year: i32,
        thresholds: &InsightThresholds,
    ) -> Self {
        let rows = budget::consolidate(&budget::in_period(items, month, year));
        let summary = budget::summarize(&rows);
        let insights = Insights::derive(&rows, &summary, thresholds);
        let lines = rows
            .into_iter()
            .map(|item| BudgetLine {
                severity: budget::classify(item.percentage),
                item,
            })
            .collect();

        Self {
            month,
            year,
            lines,
            summary,
            insights,
        }
    }
}

/// Formats an amount with thousands separators and two decimals, e.g. `"1,234.50 THB"`.
#[must_use]
pub fn format_amount(amount: f64, currency: &str) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{sign}{grouped}.{fraction} {currency}")
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
///
/// # Arguments
/// * `percentage` - Utilization percentage; the bar is clamped to 0-100
/// * `bar_length` - Length of the progress bar in characters (default 10)
#[must_use]
pub fn format_progress_bar(percentage: i64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = percentage.clamp(0, 100);

    // Cast safety: clamped ∈ [0, 100] and length is small, so the product fits.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((clamped as usize) * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percentage}%", "█".repeat(filled), "░".repeat(empty))
}

/// Canned recommendation text for a narrative band.
#[must_use]
pub const fn narrative_text(band: NarrativeBand) -> &'static str {
    match band {
        NarrativeBand::HighUsage => {
            "which is fairly high; be careful with spending for the rest of the month"
        }
        NarrativeBand::LowUsage => "which is healthy; there is room left for necessary spending",
        NarrativeBand::Normal => "which is within the normal range",
    }
}

/// Renders a budget report as plain text.
#[must_use]
pub fn format_budget_report(report: &BudgetReport, currency: &str) -> String {
    let mut out = format!("Budget report - {:02}/{}\n", report.month, report.year);

    if report.lines.is_empty() {
        out.push_str("  No budgets set for this month.\n");
        return out;
    }

    for line in &report.lines {
        let item = &line.item;
        let _ = writeln!(
            out,
            "  {:<16} {} spent {} of {} ({})",
            item.category_name,
            format_progress_bar(item.percentage, None),
            format_amount(item.spent, currency),
            format_amount(item.amount, currency),
            line.severity
        );
    }

    let summary = &report.summary;
    let _ = writeln!(
        out,
        "\n  Total budget:    {}",
        format_amount(summary.total_budget, currency)
    );
    let _ = writeln!(
        out,
        "  Total spent:     {}",
        format_amount(summary.total_spent, currency)
    );
    let _ = writeln!(
        out,
        "  {}  {}",
        if summary.is_within_budget() {
            "Remaining:     "
        } else {
            "Over budget by:"
        },
        format_amount(summary.total_remaining.abs(), currency)
    );

    let insights = &report.insights;
    out.push_str("\nInsights\n");
    if !insights.over_budget.is_empty() {
        let _ = writeln!(
            out,
            "  ! Nearly or over budget: {}",
            insights.over_budget.join(", ")
        );
    }
    if let Some(mean) = insights.underutilized.mean_percentage {
        let _ = writeln!(
            out,
            "  - Barely used: {} (only {mean}% on average)",
            insights.underutilized.categories.join(", ")
        );
    }
    let _ = writeln!(
        out,
        "  * Overall {}% of the budget is used, {}",
        insights.average_percentage,
        narrative_text(insights.band)
    );

    out
}

/// Renders receipts as a plain-text table, one line per receipt.
#[must_use]
pub fn format_receipt_table(receipts: &[Receipt], directory: &CategoryDirectory) -> String {
    if receipts.is_empty() {
        return "  No receipts match the current filters.\n".to_string();
    }

    let mut out = String::new();
    for r in receipts {
        let _ = writeln!(
            out,
            "  {} {:>16}  {:<20} {:<16} {}",
            r.receipt_date.format("%Y-%m-%d"),
            format_amount(r.amount, &r.currency),
            r.display_vendor(),
            directory.display_name(r.category_id),
            r.headline().unwrap_or("-")
        );
    }
    out
}
