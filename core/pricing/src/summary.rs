//! FILENAME: core/pricing/src/summary.rs
// PURPOSE: Portfolio-level totals over a set of pricing results.

use serde::{Deserialize, Serialize};

use crate::types::{OperatingExpenses, PricingParameters, PricingResult};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSummary {
    pub product_count: usize,
    pub total_monthly_sales: u64,
    /// Expenses actually allocated (0 when the expense toggle is off)
    pub total_expenses: f64,
    pub total_monthly_revenue: f64,
    pub total_monthly_profit: f64,
    /// Revenue-weighted profit margin in percent
    pub average_margin: f64,
}

pub fn summarize(
    results: &[PricingResult],
    expenses: &OperatingExpenses,
    params: &PricingParameters,
) -> PricingSummary {
    let total_monthly_revenue: f64 = results.iter().map(|r| r.monthly_revenue).sum();
    let total_monthly_profit: f64 = results.iter().map(|r| r.monthly_profit).sum();

    let weighted_margin: f64 = results
        .iter()
        .map(|r| r.profit_margin * r.monthly_revenue)
        .sum();
    let average_margin = if total_monthly_revenue > 0.0 {
        weighted_margin / total_monthly_revenue
    } else {
        0.0
    };

    PricingSummary {
        product_count: results.len(),
        total_monthly_sales: results.iter().map(|r| r.monthly_sales as u64).sum(),
        total_expenses: if params.include_expenses { expenses.total() } else { 0.0 },
        total_monthly_revenue,
        total_monthly_profit,
        average_margin,
    }
}
