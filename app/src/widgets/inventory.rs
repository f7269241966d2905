//! FILENAME: app/src/widgets/inventory.rs
//! PURPOSE: Inventory page widgets: reorder alerts, product insights and
//! inventory search.
//! CONTEXT: Alerts are ranked here by urgency; the host only reports stock
//! levels and days until stock-out.

use std::cmp::Ordering;

use analytics::StockUrgency;
use pricing::MarginBand;
use serde::{Deserialize, Serialize};

use super::finance::{empty_page, RangeParams};
use super::load_widget;
use crate::api_types::{
    DateRangeParams, InsightParams, InventoryItem, InventorySearchParams, ProductInsight,
    ReorderAlert, SearchPage,
};
use crate::bridge::{Api, IpcBridge};
use crate::AppState;

pub const DEFAULT_INSIGHT_LIMIT: u32 = 10;

// ============================================================================
// REORDER ALERTS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderAlertView {
    #[serde(flatten)]
    pub alert: ReorderAlert,
    pub urgency: StockUrgency,
    pub color: String,
}

impl From<ReorderAlert> for ReorderAlertView {
    fn from(alert: ReorderAlert) -> Self {
        let urgency = StockUrgency::classify(
            alert.current_stock,
            alert.reorder_point,
            alert.days_until_stockout,
        );
        ReorderAlertView {
            color: urgency.color().to_string(),
            urgency,
            alert,
        }
    }
}

/// Most urgent first; ties go to the sooner stock-out, then by name.
fn compare_alerts(a: &ReorderAlertView, b: &ReorderAlertView) -> Ordering {
    let days = |v: &ReorderAlertView| v.alert.days_until_stockout.filter(|d| d.is_finite()).unwrap_or(f64::MAX);
    a.urgency
        .cmp(&b.urgency)
        .then_with(|| days(a).total_cmp(&days(b)))
        .then_with(|| a.alert.product_name.cmp(&b.alert.product_name))
}

pub fn rank_alerts(alerts: Vec<ReorderAlert>) -> Vec<ReorderAlertView> {
    let mut views: Vec<ReorderAlertView> = alerts.into_iter().map(ReorderAlertView::from).collect();
    views.sort_by(compare_alerts);
    views
}

pub fn load_reorder_alerts(state: &AppState, bridge: &dyn IpcBridge) -> Vec<ReorderAlertView> {
    let alerts = load_widget(&state.widgets.reorder_alerts, "reorder alerts", || {
        Api::new(bridge)
            .reorder_get_alerts()
            .map_err(|e| e.to_string())
    });
    rank_alerts(alerts.unwrap_or_default())
}

// ============================================================================
// PRODUCT INSIGHTS
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightQuery {
    #[serde(flatten)]
    pub range: RangeParams,
    #[serde(default = "default_insight_limit")]
    pub limit: u32,
}

fn default_insight_limit() -> u32 {
    DEFAULT_INSIGHT_LIMIT
}

impl Default for InsightQuery {
    fn default() -> Self {
        InsightQuery {
            range: RangeParams::default(),
            limit: DEFAULT_INSIGHT_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInsightView {
    #[serde(flatten)]
    pub insight: ProductInsight,
    pub margin_band: MarginBand,
    pub color: String,
}

impl From<ProductInsight> for ProductInsightView {
    fn from(insight: ProductInsight) -> Self {
        let margin_band = MarginBand::from_margin(insight.profit_margin);
        ProductInsightView {
            color: margin_band.color().to_string(),
            margin_band,
            insight,
        }
    }
}

pub fn load_product_insights(
    state: &AppState,
    bridge: &dyn IpcBridge,
    query: &InsightQuery,
) -> Vec<ProductInsightView> {
    let params = InsightParams {
        range: DateRangeParams::from(&query.range.resolve()),
        limit: query.limit.max(1),
    };
    load_widget(&state.widgets.product_insights, "product insights", || {
        Api::new(bridge).insights_products(&params).map_err(|e| e.to_string())
    })
    .unwrap_or_default()
    .into_iter()
    .map(ProductInsightView::from)
    .collect()
}

// ============================================================================
// INVENTORY SEARCH
// ============================================================================

pub fn search_inventory(
    state: &AppState,
    bridge: &dyn IpcBridge,
    params: &InventorySearchParams,
) -> SearchPage<InventoryItem> {
    load_widget(&state.widgets.inventory_search, "inventory search", || {
        Api::new(bridge).search_inventory(params).map_err(|e| e.to_string())
    })
    .unwrap_or_else(|| empty_page(params.page, params.page_size))
}
