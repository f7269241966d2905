//! FILENAME: core/analytics/src/forecast.rs
//! PURPOSE: Straight-line revenue projection from a daily series.
//! CONTEXT: Ordinary least squares over day offsets 0..n. Projected values are
//! clamped at zero; a shop cannot take in negative revenue.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::aggregate::DailyTotal;
use crate::date_range::MAX_RANGE_DAYS;

/// Relative slope (per day, against the daily average) under which a trend is flat.
const FLAT_THRESHOLD: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendLine {
    pub slope: f64,
    pub intercept: f64,
}

impl TrendLine {
    pub fn value_at(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

impl TrendDirection {
    pub fn from_slope(slope: f64, daily_average: f64) -> Self {
        let reference = daily_average.abs();
        let relative = if reference > 0.0 { slope / reference } else { slope };
        if relative > FLAT_THRESHOLD {
            TrendDirection::Up
        } else if relative < -FLAT_THRESHOLD {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }

    /// Trend from a growth rate in percent, as reported by the forecast service.
    pub fn from_growth_rate(growth_rate: f64) -> Self {
        if growth_rate > 0.0 {
            TrendDirection::Up
        } else if growth_rate < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            TrendDirection::Up => "green",
            TrendDirection::Down => "red",
            TrendDirection::Flat => "gray",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectedDay {
    pub date: NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendProjection {
    pub daily_average: f64,
    pub slope: f64,
    pub direction: TrendDirection,
    pub points: Vec<ProjectedDay>,
    pub total_projected: f64,
}

/// Least-squares line through `values` at x = 0, 1, 2, ...
pub fn fit_trend(values: &[f64]) -> TrendLine {
    match values.len() {
        0 => TrendLine { slope: 0.0, intercept: 0.0 },
        1 => TrendLine { slope: 0.0, intercept: values[0] },
        n => {
            let n_f = n as f64;
            let mean_x = (n_f - 1.0) / 2.0;
            let mean_y = values.iter().sum::<f64>() / n_f;

            let mut covariance = 0.0;
            let mut variance = 0.0;
            for (i, y) in values.iter().enumerate() {
                let dx = i as f64 - mean_x;
                covariance += dx * (y - mean_y);
                variance += dx * dx;
            }

            let slope = if variance > 0.0 { covariance / variance } else { 0.0 };
            TrendLine {
                slope,
                intercept: mean_y - slope * mean_x,
            }
        }
    }
}

/// Trailing moving average; the first `window - 1` entries average what is available.
pub fn moving_average(values: &[f64], window: usize) -> Vec<f64> {
    let window = window.max(1);
    let mut out = Vec::with_capacity(values.len());
    let mut running = 0.0;
    for (i, value) in values.iter().enumerate() {
        running += value;
        if i >= window {
            running -= values[i - window];
        }
        let count = (i + 1).min(window);
        out.push(running / count as f64);
    }
    out
}

/// Extend the fitted line `horizon_days` past the last day of `history`.
/// The horizon is capped at MAX_RANGE_DAYS and stops at the last
/// representable date.
pub fn project_revenue(history: &[DailyTotal], horizon_days: u32) -> TrendProjection {
    let values: Vec<f64> = history.iter().map(|d| d.revenue).collect();
    let line = fit_trend(&values);
    let daily_average = if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    };

    let points: Vec<ProjectedDay> = match history.last() {
        Some(last) => (1..=horizon_days.min(MAX_RANGE_DAYS) as i64)
            .map_while(|offset| {
                let date = last.date.checked_add_signed(Duration::days(offset))?;
                let x = (values.len() as i64 - 1 + offset) as f64;
                Some(ProjectedDay {
                    date,
                    revenue: line.value_at(x).max(0.0),
                })
            })
            .collect(),
        None => Vec::new(),
    };

    TrendProjection {
        daily_average,
        slope: line.slope,
        direction: TrendDirection::from_slope(line.slope, daily_average),
        total_projected: points.iter().map(|p| p.revenue).sum(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(values: &[f64]) -> Vec<DailyTotal> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| DailyTotal {
                date: start + Duration::days(i as i64),
                revenue: *v,
                transactions: 1,
            })
            .collect()
    }

    #[test]
    fn test_fit_exact_line() {
        let line = fit_trend(&[1.0, 3.0, 5.0, 7.0]);
        assert!((line.slope - 2.0).abs() < 1e-9);
        assert!((line.intercept - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_fit_degenerate_inputs() {
        assert_eq!(fit_trend(&[]), TrendLine { slope: 0.0, intercept: 0.0 });
        assert_eq!(fit_trend(&[42.0]), TrendLine { slope: 0.0, intercept: 42.0 });
    }

    #[test]
    fn test_projection_continues_trend() {
        let projection = project_revenue(&series(&[100.0, 110.0, 120.0, 130.0]), 2);
        assert_eq!(projection.direction, TrendDirection::Up);
        assert_eq!(projection.points.len(), 2);
        assert!((projection.points[0].revenue - 140.0).abs() < 1e-9);
        assert!((projection.points[1].revenue - 150.0).abs() < 1e-9);
        assert_eq!(projection.points[0].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!((projection.total_projected - 290.0).abs() < 1e-9);
    }

    #[test]
    fn test_projection_clamps_at_zero() {
        let projection = project_revenue(&series(&[30.0, 20.0, 10.0]), 5);
        assert_eq!(projection.direction, TrendDirection::Down);
        assert!(projection.points.iter().all(|p| p.revenue >= 0.0));
        assert_eq!(projection.points[4].revenue, 0.0);
    }

    #[test]
    fn test_flat_and_empty_history() {
        let flat = project_revenue(&series(&[50.0, 50.0, 50.0]), 3);
        assert_eq!(flat.direction, TrendDirection::Flat);
        assert!((flat.total_projected - 150.0).abs() < 1e-9);

        let empty = project_revenue(&[], 7);
        assert!(empty.points.is_empty());
        assert_eq!(empty.total_projected, 0.0);
        assert_eq!(empty.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_projection_horizon_is_bounded() {
        let long = project_revenue(&series(&[10.0, 12.0]), 200_000_000);
        assert_eq!(long.points.len(), MAX_RANGE_DAYS as usize);

        let history = vec![DailyTotal {
            date: NaiveDate::MAX - Duration::days(1),
            revenue: 5.0,
            transactions: 1,
        }];
        let at_edge = project_revenue(&history, 30);
        assert_eq!(at_edge.points.len(), 1);
        assert_eq!(at_edge.points[0].date, NaiveDate::MAX);
    }

    #[test]
    fn test_moving_average() {
        let avg = moving_average(&[2.0, 4.0, 6.0, 8.0], 2);
        assert_eq!(avg, vec![2.0, 3.0, 5.0, 7.0]);
        assert_eq!(moving_average(&[], 3), Vec::<f64>::new());
    }

    #[test]
    fn test_direction_from_growth_rate() {
        assert_eq!(TrendDirection::from_growth_rate(3.2), TrendDirection::Up);
        assert_eq!(TrendDirection::from_growth_rate(-0.1), TrendDirection::Down);
        assert_eq!(TrendDirection::from_growth_rate(0.0).color(), "gray");
    }
}
