use chrono::{Datelike, Local};
use dotenvy::dotenv;
use receipt_buddy::{
    config::{self, environment},
    core::{
        category::UNCATEGORIZED,
        expense,
        receipt_query::ReceiptListParams,
        report::{self, BudgetReport},
    },
    errors::Result,
    snapshot::Snapshot,
};
use std::fmt::Write;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {}", e))?;
    info!("Successfully processed application configuration.");

    // 4. Load the exported backend payload
    let snapshot = Snapshot::load(&app_config.snapshot.path)
        .inspect_err(|e| error!("Failed to load snapshot {:?}: {}", app_config.snapshot.path, e))?;
    let directory = snapshot.directory();

    // 5. Resolve the reporting month and receipt criteria
    let today = Local::now().date_naive();
    let (month, year) = environment::report_period(today)?;
    let query = environment::receipt_query()?;
    info!("Reporting on {:02}/{} with {:?}", month, year, query);

    let currency = &app_config.receipts.currency;
    let mut out = String::new();

    // 6. Budget report
    let rows = snapshot.budget_rows(&directory);
    let budget_report = BudgetReport::build(&rows, month, year, &app_config.insights);
    out.push_str(&report::format_budget_report(&budget_report, currency));

    // 7. Spending breakdown for the month
    let month_receipts: Vec<_> = snapshot
        .receipts
        .iter()
        .filter(|r| r.receipt_date.month() == month && r.receipt_date.year() == year)
        .cloned()
        .collect();
    let month_total: f64 = month_receipts.iter().map(|r| r.amount).sum();
    let totals = expense::totals_by_category(&month_receipts, &directory);

    let _ = writeln!(
        out,
        "\nSpent today: {}",
        report::format_amount(expense::spent_on(&snapshot.receipts, today), currency)
    );
    let _ = writeln!(
        out,
        "Spending by category ({} receipts, average {} {currency})",
        month_receipts.len(),
        expense::average_per_receipt(month_total, month_receipts.len())
    );
    for share in expense::category_shares(&totals, UNCATEGORIZED) {
        let _ = writeln!(
            out,
            "  {:<16} {:>16} {:>4}%",
            share.category_name,
            report::format_amount(share.total, currency),
            share.percentage
        );
    }

    // 8. Recent expenses
    out.push_str("\nRecent expenses\n");
    for line in expense::recent_expenses(
        &snapshot.receipts,
        &directory,
        app_config.receipts.recent_limit,
    ) {
        let _ = writeln!(
            out,
            "  {} {:>16}  {:<24} {}",
            line.date.format("%Y-%m-%d"),
            report::format_amount(line.amount, currency),
            line.description,
            line.category
        );
    }

    // 9. Receipt list: page fetch, then client-side criteria
    let fetched = ReceiptListParams::for_query(&query, app_config.receipts.fetch_limit)
        .select(&snapshot.receipts);
    let shown = query.apply(&fetched);
    let _ = writeln!(out, "\nReceipts ({} of {})", shown.len(), fetched.len());
    out.push_str(&report::format_receipt_table(&shown, &directory));

    print!("{out}");
    Ok(())
}
