//! FILENAME: core/analytics/src/lib.rs
//! Bizdesk Analytics Module
//!
//! Client-side aggregation over sales records: date windows, period
//! summaries, dense daily series, linear trend projection, goal progress,
//! and the threshold bands used to colour dashboard figures.

pub mod aggregate;
pub mod bands;
pub mod date_range;
pub mod forecast;
pub mod goals;
pub mod sale;

pub use aggregate::{
    compare_with_previous, daily_totals, growth_percent, summarize_period, units_by_product,
    DailyTotal, PeriodComparison, PeriodSummary,
};
pub use bands::{HealthBand, StockUrgency};
pub use date_range::{DateRange, RangePreset, MAX_RANGE_DAYS};
pub use forecast::{fit_trend, moving_average, project_revenue, TrendDirection, TrendLine, TrendProjection, ProjectedDay};
pub use goals::{evaluate_goal, goal_window, Goal, GoalMetric, GoalPeriod, GoalProgress, GoalStatus};
pub use sale::{SaleLine, SaleRecord};
