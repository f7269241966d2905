//! FILENAME: core/pricing/src/band.rs
// PURPOSE: Threshold banding of profit margins for display.

use serde::{Deserialize, Serialize};

/// Margin at or above which a product is considered healthy.
pub const HEALTHY_MARGIN: f64 = 30.0;
/// Margin at or above which a product is considered fair.
pub const FAIR_MARGIN: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MarginBand {
    Healthy,
    Fair,
    Low,
}

impl MarginBand {
    /// Band a margin given in percent. NaN falls into `Low`.
    pub fn from_margin(margin: f64) -> Self {
        if margin >= HEALTHY_MARGIN {
            MarginBand::Healthy
        } else if margin >= FAIR_MARGIN {
            MarginBand::Fair
        } else {
            MarginBand::Low
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            MarginBand::Healthy => "green",
            MarginBand::Fair => "blue",
            MarginBand::Low => "orange",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_thresholds() {
        assert_eq!(MarginBand::from_margin(45.0), MarginBand::Healthy);
        assert_eq!(MarginBand::from_margin(30.0), MarginBand::Healthy);
        assert_eq!(MarginBand::from_margin(29.99), MarginBand::Fair);
        assert_eq!(MarginBand::from_margin(15.0), MarginBand::Fair);
        assert_eq!(MarginBand::from_margin(14.9), MarginBand::Low);
        assert_eq!(MarginBand::from_margin(-20.0), MarginBand::Low);
        assert_eq!(MarginBand::from_margin(f64::NAN), MarginBand::Low);
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(MarginBand::Healthy.color(), "green");
        assert_eq!(MarginBand::Fair.color(), "blue");
        assert_eq!(MarginBand::Low.color(), "orange");
    }
}
