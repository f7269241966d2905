//! FILENAME: core/analytics/src/bands.rs
// PURPOSE: Threshold bands for the financial-health scorecard and reorder alerts.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl HealthBand {
    /// Band a 0-100 health score.
    pub fn from_score(score: f64) -> Self {
        if score >= 80.0 {
            HealthBand::Excellent
        } else if score >= 60.0 {
            HealthBand::Good
        } else if score >= 40.0 {
            HealthBand::Fair
        } else {
            HealthBand::Poor
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            HealthBand::Excellent => "green",
            HealthBand::Good => "blue",
            HealthBand::Fair => "orange",
            HealthBand::Poor => "red",
        }
    }
}

/// How soon a product needs restocking. Ordered most urgent first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StockUrgency {
    Critical,
    Warning,
    Notice,
}

impl StockUrgency {
    pub fn classify(current_stock: f64, reorder_point: f64, days_until_stockout: Option<f64>) -> Self {
        let days = days_until_stockout.filter(|d| d.is_finite());
        if current_stock <= 0.0 || days.map_or(false, |d| d <= 3.0) {
            StockUrgency::Critical
        } else if current_stock <= reorder_point || days.map_or(false, |d| d <= 7.0) {
            StockUrgency::Warning
        } else {
            StockUrgency::Notice
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            StockUrgency::Critical => "red",
            StockUrgency::Warning => "orange",
            StockUrgency::Notice => "blue",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::from_score(92.0), HealthBand::Excellent);
        assert_eq!(HealthBand::from_score(80.0), HealthBand::Excellent);
        assert_eq!(HealthBand::from_score(60.0), HealthBand::Good);
        assert_eq!(HealthBand::from_score(59.9), HealthBand::Fair);
        assert_eq!(HealthBand::from_score(12.0), HealthBand::Poor);
        assert_eq!(HealthBand::Poor.color(), "red");
    }

    #[test]
    fn test_stock_urgency() {
        assert_eq!(StockUrgency::classify(0.0, 10.0, None), StockUrgency::Critical);
        assert_eq!(StockUrgency::classify(25.0, 10.0, Some(2.0)), StockUrgency::Critical);
        assert_eq!(StockUrgency::classify(8.0, 10.0, None), StockUrgency::Warning);
        assert_eq!(StockUrgency::classify(25.0, 10.0, Some(6.0)), StockUrgency::Warning);
        assert_eq!(StockUrgency::classify(25.0, 10.0, Some(30.0)), StockUrgency::Notice);
        assert_eq!(StockUrgency::classify(25.0, 10.0, Some(f64::INFINITY)), StockUrgency::Notice);
    }

    #[test]
    fn test_urgency_ordering() {
        let mut levels = vec![StockUrgency::Notice, StockUrgency::Critical, StockUrgency::Warning];
        levels.sort();
        assert_eq!(levels, vec![StockUrgency::Critical, StockUrgency::Warning, StockUrgency::Notice]);
    }
}
