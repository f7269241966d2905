//! FILENAME: app/src/widgets/dashboard.rs
//! PURPOSE: Dashboard widgets: revenue forecast, cash-flow projection,
//! sales overview and goal tracker.
//! CONTEXT: The forecast and cash-flow widgets display what the host
//! computes. The sales overview and goal tracker aggregate raw sales here.

use analytics::{
    compare_with_previous, daily_totals, evaluate_goal, moving_average, project_revenue,
    DailyTotal, DateRange, GoalProgress, PeriodComparison, RangePreset, SaleRecord,
    TrendDirection, TrendProjection,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::load_widget;
use crate::api_types::{CashflowProjection, RevenueForecast};
use crate::bridge::{Api, IpcBridge};
use crate::AppState;

/// Window of the moving average drawn over the daily series.
const SMOOTHING_WINDOW: usize = 7;

// ============================================================================
// REVENUE FORECAST
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueForecastView {
    pub available: bool,
    pub forecast: RevenueForecast,
    pub total_projected: f64,
    pub trend: Option<TrendDirection>,
    pub trend_color: String,
    /// Model confidence in percent
    pub confidence_percent: f64,
}

impl RevenueForecastView {
    pub fn from_data(data: Option<RevenueForecast>) -> Self {
        match data {
            Some(forecast) => {
                let trend = TrendDirection::from_growth_rate(forecast.growth_rate);
                RevenueForecastView {
                    available: true,
                    total_projected: forecast.forecast.iter().map(|p| p.predicted).sum(),
                    trend: Some(trend),
                    trend_color: trend.color().to_string(),
                    confidence_percent: (forecast.confidence * 100.0).clamp(0.0, 100.0),
                    forecast,
                }
            }
            None => RevenueForecastView::default(),
        }
    }
}

pub fn load_revenue_forecast(state: &AppState, bridge: &dyn IpcBridge, days: u32) -> RevenueForecastView {
    let data = load_widget(&state.widgets.revenue_forecast, "revenue forecast", || {
        Api::new(bridge).forecast_revenue(days).map_err(|e| e.to_string())
    });
    RevenueForecastView::from_data(data)
}

// ============================================================================
// CASH FLOW
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashflowView {
    pub available: bool,
    pub projection: CashflowProjection,
    /// Total inflow minus total outflow over the horizon
    pub net_flow: f64,
    pub lowest_balance: f64,
    /// First projected day with a negative balance
    pub first_negative_date: Option<String>,
    pub warning: bool,
}

impl CashflowView {
    pub fn from_data(data: Option<CashflowProjection>) -> Self {
        let projection = match data {
            Some(p) => p,
            None => return CashflowView::default(),
        };

        let net_flow: f64 = projection.days.iter().map(|d| d.inflow - d.outflow).sum();
        let lowest_balance = projection
            .days
            .iter()
            .map(|d| d.balance)
            .fold(projection.opening_balance, f64::min);
        let first_negative_date = projection
            .days
            .iter()
            .find(|d| d.balance < 0.0)
            .map(|d| d.date.clone());

        CashflowView {
            available: true,
            net_flow,
            lowest_balance,
            warning: first_negative_date.is_some(),
            first_negative_date,
            projection,
        }
    }
}

pub fn load_cashflow(state: &AppState, bridge: &dyn IpcBridge, days: u32) -> CashflowView {
    let data = load_widget(&state.widgets.cashflow, "cash flow", || {
        Api::new(bridge).forecast_cashflow(days).map_err(|e| e.to_string())
    });
    CashflowView::from_data(data)
}

// ============================================================================
// SALES OVERVIEW
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverviewParams {
    #[serde(default)]
    pub preset: RangePreset,
    /// Days to project past the end of the range
    #[serde(default = "default_horizon")]
    pub horizon_days: u32,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

fn default_horizon() -> u32 {
    14
}

impl Default for SalesOverviewParams {
    fn default() -> Self {
        SalesOverviewParams {
            preset: RangePreset::default(),
            horizon_days: default_horizon(),
            as_of: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOverview {
    pub range: DateRange,
    pub comparison: PeriodComparison,
    pub daily: Vec<DailyTotal>,
    pub smoothed: Vec<f64>,
    pub projection: TrendProjection,
    pub trend_color: String,
}

impl SalesOverview {
    pub fn compute(sales: &[SaleRecord], range: DateRange, horizon_days: u32) -> Self {
        let daily = daily_totals(sales, &range);
        let revenue: Vec<f64> = daily.iter().map(|d| d.revenue).collect();
        let projection = project_revenue(&daily, horizon_days);
        SalesOverview {
            range,
            comparison: compare_with_previous(sales, &range),
            smoothed: moving_average(&revenue, SMOOTHING_WINDOW),
            trend_color: projection.direction.color().to_string(),
            projection,
            daily,
        }
    }

    /// Shown when sales could not be loaded: the range with no activity.
    pub fn empty(range: DateRange) -> Self {
        SalesOverview::compute(&[], range, 0)
    }
}

pub fn load_sales_overview(
    state: &AppState,
    bridge: &dyn IpcBridge,
    params: &SalesOverviewParams,
) -> SalesOverview {
    let today = params.as_of.unwrap_or_else(crate::today);
    let range = DateRange::from_preset(params.preset, today);

    load_widget(&state.widgets.sales_overview, "sales overview", || {
        let sales = Api::new(bridge).sales_get_all().map_err(|e| e.to_string())?;
        let records: Vec<SaleRecord> = sales.iter().filter_map(|s| s.to_record()).collect();
        Ok(SalesOverview::compute(&records, range, params.horizon_days))
    })
    .unwrap_or_else(|| SalesOverview::empty(range))
}

// ============================================================================
// GOAL TRACKER
// ============================================================================

/// Progress of every saved goal against current sales.
pub fn load_goal_progress(
    state: &AppState,
    bridge: &dyn IpcBridge,
    as_of: Option<NaiveDate>,
) -> Vec<GoalProgress> {
    let goals = match state.goals.lock() {
        Ok(goals) => goals.clone(),
        Err(poisoned) => poisoned.into_inner().clone(),
    };
    if goals.is_empty() {
        return Vec::new();
    }
    let today = as_of.unwrap_or_else(crate::today);

    load_widget(&state.widgets.goal_tracker, "goal tracker", || {
        let sales = Api::new(bridge).sales_get_all().map_err(|e| e.to_string())?;
        let records: Vec<SaleRecord> = sales.iter().filter_map(|s| s.to_record()).collect();
        Ok(goals
            .iter()
            .map(|goal| evaluate_goal(goal, &records, today))
            .collect())
    })
    .unwrap_or_default()
}
