//! FILENAME: core/analytics/src/aggregate.rs
//! PURPOSE: Period summaries and daily series over sales records.
//! CONTEXT: Everything here is a fold over the record list; records outside
//! the requested window are ignored.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::date_range::DateRange;
use crate::sale::SaleRecord;

// ============================================================================
// TYPES
// ============================================================================

/// Revenue and transaction count for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub revenue: f64,
    pub transactions: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub revenue: f64,
    pub transactions: u32,
    pub units_sold: u64,
    /// Revenue per transaction (0 with no transactions)
    pub average_ticket: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparison {
    pub current: PeriodSummary,
    pub previous: PeriodSummary,
    pub revenue_growth: f64,
    pub transaction_growth: f64,
}

// ============================================================================
// AGGREGATIONS
// ============================================================================

/// One entry per day of `range`, in order, including days without sales.
pub fn daily_totals(sales: &[SaleRecord], range: &DateRange) -> Vec<DailyTotal> {
    let mut by_day: HashMap<NaiveDate, (f64, u32)> = HashMap::new();
    for sale in sales.iter().filter(|s| range.contains(s.date)) {
        let entry = by_day.entry(sale.date).or_insert((0.0, 0));
        entry.0 += finite(sale.total);
        entry.1 += 1;
    }

    range
        .iter_days()
        .map(|date| {
            let (revenue, transactions) = by_day.get(&date).copied().unwrap_or((0.0, 0));
            DailyTotal {
                date,
                revenue,
                transactions,
            }
        })
        .collect()
}

pub fn summarize_period(sales: &[SaleRecord], range: &DateRange) -> PeriodSummary {
    let mut summary = PeriodSummary::default();
    for sale in sales.iter().filter(|s| range.contains(s.date)) {
        summary.revenue += finite(sale.total);
        summary.transactions += 1;
        summary.units_sold += sale.units();
    }
    if summary.transactions > 0 {
        summary.average_ticket = summary.revenue / summary.transactions as f64;
    }
    summary
}

/// Percentage change from `previous` to `current`.
///
/// A zero previous period yields 0 when nothing changed and 100 otherwise,
/// so the dashboard never shows an infinite growth figure.
pub fn growth_percent(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        if current == 0.0 {
            0.0
        } else {
            100.0 * current.signum()
        }
    } else {
        (current - previous) / previous.abs() * 100.0
    }
}

/// Summarise `range` and the equally long window before it.
pub fn compare_with_previous(sales: &[SaleRecord], range: &DateRange) -> PeriodComparison {
    let current = summarize_period(sales, range);
    let previous = summarize_period(sales, &range.previous());
    PeriodComparison {
        revenue_growth: growth_percent(current.revenue, previous.revenue),
        transaction_growth: growth_percent(current.transactions as f64, previous.transactions as f64),
        current,
        previous,
    }
}

/// Units sold per product id within `range`, saturating at `u32::MAX`.
pub fn units_by_product(sales: &[SaleRecord], range: &DateRange) -> BTreeMap<String, u32> {
    let mut units: BTreeMap<String, u32> = BTreeMap::new();
    for sale in sales.iter().filter(|s| range.contains(s.date)) {
        for line in &sale.lines {
            let count = units.entry(line.product_id.clone()).or_insert(0);
            *count = count.saturating_add(line.quantity);
        }
    }
    units
}

fn finite(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}
