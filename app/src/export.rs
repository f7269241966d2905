//! FILENAME: app/src/export.rs
//! PURPOSE: Excel export of the pricing results and the sales overview.
//! CONTEXT: Exports what is currently on screen; nothing is refetched.

use std::path::{Path, PathBuf};

use persistence::{save_report, Report, ReportCell, ReportSheet};
use pricing::{MarginBand, PricingResult, PricingSummary};

use crate::toasts::notify;
use crate::widgets::{lock_widget, SalesOverview};
use crate::{log_info, AppState};

const PRICING_HEADERS: &[&str] = &[
    "Product",
    "Cost",
    "Current Price",
    "Monthly Sales",
    "Sales Share",
    "Allocated Expense / Unit",
    "Inflation",
    "Tax",
    "Recommended Price",
    "Profit / Unit",
    "Profit Margin",
    "Margin Band",
    "Monthly Revenue",
    "Monthly Profit",
];

/// Add the `.xlsx` extension when the chosen path has none.
fn xlsx_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(_) => path.to_path_buf(),
        None => path.with_extension("xlsx"),
    }
}

fn currency_symbol(state: &AppState) -> Result<String, String> {
    let settings = state.settings.lock().map_err(|e| e.to_string())?;
    Ok(settings.currency_symbol.clone())
}

fn band_label(band: MarginBand) -> &'static str {
    match band {
        MarginBand::Healthy => "Healthy",
        MarginBand::Fair => "Fair",
        MarginBand::Low => "Low",
    }
}

fn summary_sheet(rows: Vec<(&str, ReportCell)>) -> ReportSheet {
    let mut sheet = ReportSheet::new("Summary", &["Metric", "Value"]);
    for (label, value) in rows {
        sheet.push_row(vec![ReportCell::from(label), value]);
    }
    sheet
}

// ============================================================================
// PRICING
// ============================================================================

pub fn build_pricing_report(
    results: &[PricingResult],
    summary: &PricingSummary,
    currency_symbol: &str,
) -> Report {
    let mut report = Report::new(currency_symbol);

    let mut sheet = ReportSheet::new("Pricing", PRICING_HEADERS);
    for r in results {
        sheet.push_row(vec![
            ReportCell::from(r.product_name.as_str()),
            ReportCell::Currency(r.cost),
            ReportCell::Currency(r.current_price),
            ReportCell::Number(r.monthly_sales as f64),
            ReportCell::Percent(r.sales_ratio * 100.0),
            ReportCell::Currency(r.allocated_expense_per_unit),
            ReportCell::Currency(r.inflation_amount),
            ReportCell::Currency(r.tax_amount),
            ReportCell::Currency(r.recommended_price),
            ReportCell::Currency(r.profit_per_unit),
            ReportCell::Percent(r.profit_margin),
            ReportCell::from(band_label(MarginBand::from_margin(r.profit_margin))),
            ReportCell::Currency(r.monthly_revenue),
            ReportCell::Currency(r.monthly_profit),
        ]);
    }
    report.add_sheet(sheet);

    report.add_sheet(summary_sheet(vec![
        ("Products", ReportCell::Number(summary.product_count as f64)),
        ("Units Sold", ReportCell::Number(summary.total_monthly_sales as f64)),
        ("Operating Expenses", ReportCell::Currency(summary.total_expenses)),
        ("Monthly Revenue", ReportCell::Currency(summary.total_monthly_revenue)),
        ("Monthly Profit", ReportCell::Currency(summary.total_monthly_profit)),
        ("Average Margin", ReportCell::Percent(summary.average_margin)),
    ]));
    report
}

fn write_pricing_report(state: &AppState, path: &Path) -> Result<PathBuf, String> {
    let symbol = currency_symbol(state)?;
    let report = {
        let pricing = state.pricing.lock().map_err(|e| e.to_string())?;
        if pricing.results.is_empty() {
            return Err("There are no pricing results to export".to_string());
        }
        let summary = pricing.summary.clone().unwrap_or_default();
        build_pricing_report(&pricing.results, &summary, &symbol)
    };

    let path = xlsx_path(path);
    save_report(&report, &path).map_err(|e| e.to_string())?;
    log_info!("EXPORT", "pricing report written to {:?}", path);
    Ok(path)
}

/// Write the last pricing run to `path`. Returns the file actually written.
pub fn export_pricing_report(state: &AppState, path: &Path) -> Result<PathBuf, String> {
    let result = write_pricing_report(state, path);
    notify(state, result, "Pricing report exported")
}

// ============================================================================
// SALES OVERVIEW
// ============================================================================

pub fn build_sales_report(overview: &SalesOverview, currency_symbol: &str) -> Report {
    let mut report = Report::new(currency_symbol);

    let mut daily = ReportSheet::new("Daily Sales", &["Date", "Revenue", "Transactions"]);
    for day in &overview.daily {
        daily.push_row(vec![
            ReportCell::from(day.date.format("%Y-%m-%d").to_string()),
            ReportCell::Currency(day.revenue),
            ReportCell::Number(day.transactions as f64),
        ]);
    }
    report.add_sheet(daily);

    let mut projection = ReportSheet::new("Projection", &["Date", "Projected Revenue"]);
    for point in &overview.projection.points {
        projection.push_row(vec![
            ReportCell::from(point.date.format("%Y-%m-%d").to_string()),
            ReportCell::Currency(point.revenue),
        ]);
    }
    report.add_sheet(projection);

    let current = &overview.comparison.current;
    let range_label = format!(
        "{} to {}",
        overview.range.start.format("%Y-%m-%d"),
        overview.range.end.format("%Y-%m-%d")
    );
    report.add_sheet(summary_sheet(vec![
        ("Period", ReportCell::from(range_label)),
        ("Revenue", ReportCell::Currency(current.revenue)),
        ("Transactions", ReportCell::Number(current.transactions as f64)),
        ("Units Sold", ReportCell::Number(current.units_sold as f64)),
        ("Average Ticket", ReportCell::Currency(current.average_ticket)),
        ("Revenue Growth", ReportCell::Percent(overview.comparison.revenue_growth)),
        ("Projected Revenue", ReportCell::Currency(overview.projection.total_projected)),
    ]));
    report
}

fn write_sales_overview(state: &AppState, path: &Path) -> Result<PathBuf, String> {
    let overview = lock_widget(&state.widgets.sales_overview).data().cloned();
    let overview = match overview {
        Some(o) if o.comparison.current.transactions > 0 => o,
        _ => return Err("There is no sales data to export".to_string()),
    };

    let report = build_sales_report(&overview, &currency_symbol(state)?);
    let path = xlsx_path(path);
    save_report(&report, &path).map_err(|e| e.to_string())?;
    log_info!("EXPORT", "sales overview written to {:?}", path);
    Ok(path)
}

/// Write the currently loaded sales overview to `path`.
pub fn export_sales_overview(state: &AppState, path: &Path) -> Result<PathBuf, String> {
    let result = write_sales_overview(state, path);
    notify(state, result, "Sales overview exported")
}
