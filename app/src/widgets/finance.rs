//! FILENAME: app/src/widgets/finance.rs
// PURPOSE: Finance page widgets: financial-health scorecard and finance search.

use analytics::{DateRange, HealthBand, RangePreset};
use chrono::NaiveDate;
use pricing::MarginBand;
use serde::{Deserialize, Serialize};

use super::load_widget;
use crate::api_types::{DateRangeParams, FinanceRecord, FinanceSearchParams, FinancialHealth, SearchPage};
use crate::bridge::{Api, IpcBridge};
use crate::AppState;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    #[serde(default)]
    pub preset: RangePreset,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

impl RangeParams {
    pub fn resolve(&self) -> DateRange {
        DateRange::from_preset(self.preset, self.as_of.unwrap_or_else(crate::today))
    }
}

pub(crate) fn empty_page<T>(page: u32, page_size: u32) -> SearchPage<T> {
    SearchPage {
        items: Vec::new(),
        total: 0,
        page,
        page_size,
    }
}

// ============================================================================
// HEALTH SCORECARD
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialHealthView {
    pub available: bool,
    pub health: FinancialHealth,
    pub band: Option<HealthBand>,
    pub band_color: String,
    pub margin_band: Option<MarginBand>,
    pub margin_color: String,
}

impl FinancialHealthView {
    pub fn from_data(data: Option<FinancialHealth>) -> Self {
        match data {
            Some(health) => {
                let band = HealthBand::from_score(health.score);
                let margin_band = MarginBand::from_margin(health.profit_margin);
                FinancialHealthView {
                    available: true,
                    band: Some(band),
                    band_color: band.color().to_string(),
                    margin_band: Some(margin_band),
                    margin_color: margin_band.color().to_string(),
                    health,
                }
            }
            None => FinancialHealthView::default(),
        }
    }
}

pub fn load_financial_health(
    state: &AppState,
    bridge: &dyn IpcBridge,
    range: &RangeParams,
) -> FinancialHealthView {
    let params = DateRangeParams::from(&range.resolve());
    let data = load_widget(&state.widgets.financial_health, "financial health", || {
        Api::new(bridge).health_financial(&params).map_err(|e| e.to_string())
    });
    FinancialHealthView::from_data(data)
}

// ============================================================================
// FINANCE SEARCH
// ============================================================================

/// Results are shown as received; an error yields an empty page.
pub fn search_finance(
    state: &AppState,
    bridge: &dyn IpcBridge,
    params: &FinanceSearchParams,
) -> SearchPage<FinanceRecord> {
    load_widget(&state.widgets.finance_search, "finance search", || {
        Api::new(bridge).search_finance(params).map_err(|e| e.to_string())
    })
    .unwrap_or_else(|| empty_page(params.page, params.page_size))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_view_bands() {
        let view = FinancialHealthView::from_data(Some(FinancialHealth {
            score: 64.0,
            profit_margin: 12.0,
            ..FinancialHealth::default()
        }));
        assert_eq!(view.band, Some(HealthBand::Good));
        assert_eq!(view.band_color, "blue");
        assert_eq!(view.margin_band, Some(MarginBand::Low));
        assert_eq!(view.margin_color, "orange");
    }

    #[test]
    fn test_health_view_without_data() {
        let view = FinancialHealthView::from_data(None);
        assert!(!view.available);
        assert!(view.band.is_none());
        assert!(view.health.recommendations.is_empty());
    }

    #[test]
    fn test_range_params_resolve() {
        let params = RangeParams {
            preset: RangePreset::Last7,
            as_of: NaiveDate::from_ymd_opt(2024, 3, 10),
        };
        let range = params.resolve();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2024, 3, 4).unwrap());
        assert_eq!(range.days(), 7);
    }
}
