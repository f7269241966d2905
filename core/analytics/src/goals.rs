//! FILENAME: core/analytics/src/goals.rs
//! PURPOSE: Dashboard goals and their progress against sales.
//! CONTEXT: A goal covers the current calendar period (today, the week
//! starting Monday, or the month to date). Cumulative metrics are judged
//! against a pro-rated pace; the average ticket is judged against the target.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::summarize_period;
use crate::date_range::DateRange;
use crate::sale::SaleRecord;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalMetric {
    Revenue,
    Transactions,
    AverageTicket,
    UnitsSold,
}

impl GoalMetric {
    fn is_cumulative(&self) -> bool {
        !matches!(self, GoalMetric::AverageTicket)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
}

/// A user-defined dashboard goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub metric: GoalMetric,
    pub target: f64,
    pub period: GoalPeriod,
    /// Creation timestamp (ISO 8601 format)
    pub created_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalStatus {
    Achieved,
    OnTrack,
    Behind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub goal_id: String,
    pub name: String,
    pub current: f64,
    pub target: f64,
    /// Value the goal should have reached by today to be on pace
    pub expected: f64,
    /// current / target * 100, uncapped
    pub percent: f64,
    /// percent capped to 0..=100 for progress bars
    pub display_percent: f64,
    pub remaining: f64,
    pub status: GoalStatus,
    pub window: DateRange,
}

// ============================================================================
// EVALUATION
// ============================================================================

/// The window of `period` containing `today`, truncated at `today`.
pub fn goal_window(period: GoalPeriod, today: NaiveDate) -> DateRange {
    let start = match period {
        GoalPeriod::Daily => today,
        GoalPeriod::Weekly => today - Duration::days(today.weekday().num_days_from_monday() as i64),
        GoalPeriod::Monthly => today.with_day(1).unwrap_or(today),
    };
    DateRange::new(start, today)
}

/// Full length of the period containing `today`, in days.
fn period_length(period: GoalPeriod, today: NaiveDate) -> i64 {
    match period {
        GoalPeriod::Daily => 1,
        GoalPeriod::Weekly => 7,
        GoalPeriod::Monthly => {
            let (year, month) = if today.month() == 12 {
                (today.year() + 1, 1)
            } else {
                (today.year(), today.month() + 1)
            };
            match (
                NaiveDate::from_ymd_opt(year, month, 1),
                today.with_day(1),
            ) {
                (Some(next), Some(first)) => (next - first).num_days(),
                _ => 30,
            }
        }
    }
}

pub fn evaluate_goal(goal: &Goal, sales: &[SaleRecord], today: NaiveDate) -> GoalProgress {
    let window = goal_window(goal.period, today);
    let summary = summarize_period(sales, &window);

    let current = match goal.metric {
        GoalMetric::Revenue => summary.revenue,
        GoalMetric::Transactions => summary.transactions as f64,
        GoalMetric::AverageTicket => summary.average_ticket,
        GoalMetric::UnitsSold => summary.units_sold as f64,
    };

    let target = if goal.target.is_finite() { goal.target.max(0.0) } else { 0.0 };
    let expected = if goal.metric.is_cumulative() {
        target * window.days() as f64 / period_length(goal.period, today) as f64
    } else {
        target
    };

    let percent = if target > 0.0 { current / target * 100.0 } else { 0.0 };
    let status = if target > 0.0 && current >= target {
        GoalStatus::Achieved
    } else if current >= expected {
        GoalStatus::OnTrack
    } else {
        GoalStatus::Behind
    };

    GoalProgress {
        goal_id: goal.id.clone(),
        name: goal.name.clone(),
        current,
        target,
        expected,
        percent,
        display_percent: percent.clamp(0.0, 100.0),
        remaining: (target - current).max(0.0),
        status,
        window,
    }
}
