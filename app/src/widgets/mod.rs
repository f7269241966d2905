//! FILENAME: app/src/widgets/mod.rs
//! PURPOSE: Shared load/teardown lifecycle for dashboard, finance and inventory widgets.
//! CONTEXT: Each widget issues one bridge call, stores the decoded response,
//! and derives presentation values from it. Failures are logged and leave
//! the widget empty. A load that finishes after the widget was torn down,
//! or after a newer load began, is discarded.

pub mod dashboard;
pub mod finance;
pub mod inventory;

use std::sync::{Mutex, MutexGuard};

use serde::Serialize;

pub use dashboard::*;
pub use finance::*;
pub use inventory::*;

use crate::api_types::{
    CashflowProjection, FinanceRecord, FinancialHealth, InventoryItem, ProductInsight,
    ReorderAlert, RevenueForecast, SearchPage,
};
use crate::{log_debug, log_enter, log_error, log_exit};
use analytics::GoalProgress;

// ============================================================================
// WIDGET STATE
// ============================================================================

/// Proof that a load was started at a given generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// What happened to a finished load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed,
    Stale,
}

#[derive(Debug)]
pub struct WidgetState<T> {
    data: Option<T>,
    loading: bool,
    last_error: Option<String>,
    generation: u64,
}

impl<T> Default for WidgetState<T> {
    fn default() -> Self {
        WidgetState {
            data: None,
            loading: false,
            last_error: None,
            generation: 0,
        }
    }
}

impl<T> WidgetState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Start a load. Any load already in flight becomes stale.
    pub fn begin(&mut self) -> LoadTicket {
        self.generation += 1;
        self.loading = true;
        LoadTicket(self.generation)
    }

    /// Apply a finished load if its ticket is still current.
    pub fn finish(&mut self, ticket: LoadTicket, result: Result<T, String>) -> LoadOutcome {
        if ticket.0 != self.generation {
            return LoadOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.last_error = None;
                LoadOutcome::Applied
            }
            Err(message) => {
                self.data = None;
                self.last_error = Some(message);
                LoadOutcome::Failed
            }
        }
    }

    /// The widget went away: drop its data and ignore in-flight loads.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.data = None;
        self.loading = false;
        self.last_error = None;
    }
}

/// Lock a widget slot. A poisoned lock still holds valid state for display
/// purposes, so recover it rather than propagate.
pub(crate) fn lock_widget<T>(slot: &Mutex<WidgetState<T>>) -> MutexGuard<'_, WidgetState<T>> {
    slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Run `fetch` for the widget in `slot` and return the data now held.
/// No lock is held while `fetch` runs.
pub(crate) fn load_widget<T, F>(slot: &Mutex<WidgetState<T>>, name: &str, fetch: F) -> Option<T>
where
    T: Clone,
    F: FnOnce() -> Result<T, String>,
{
    let ticket = lock_widget(slot).begin();
    log_enter!("WIDGET", name, "generation={}", ticket.0);
    let result = fetch();

    let mut widget = lock_widget(slot);
    match widget.finish(ticket, result) {
        LoadOutcome::Applied => log_exit!("WIDGET", name, "applied"),
        LoadOutcome::Failed => log_error!(
            "WIDGET",
            "{} failed to load: {}",
            name,
            widget.last_error().unwrap_or("unknown error")
        ),
        LoadOutcome::Stale => log_debug!("WIDGET", "{} discarded a stale response", name),
    }
    widget.data().cloned()
}

// ============================================================================
// REGISTRY
// ============================================================================

/// Every widget's state, one lock each so widgets never block one another.
#[derive(Default)]
pub struct Widgets {
    pub revenue_forecast: Mutex<WidgetState<RevenueForecast>>,
    pub cashflow: Mutex<WidgetState<CashflowProjection>>,
    pub sales_overview: Mutex<WidgetState<SalesOverview>>,
    pub goal_tracker: Mutex<WidgetState<Vec<GoalProgress>>>,
    pub financial_health: Mutex<WidgetState<FinancialHealth>>,
    pub finance_search: Mutex<WidgetState<SearchPage<FinanceRecord>>>,
    pub reorder_alerts: Mutex<WidgetState<Vec<ReorderAlert>>>,
    pub product_insights: Mutex<WidgetState<Vec<ProductInsight>>>,
    pub inventory_search: Mutex<WidgetState<SearchPage<InventoryItem>>>,
}

/// Widget identifiers used by `unmount_widget`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WidgetKind {
    RevenueForecast,
    Cashflow,
    SalesOverview,
    GoalTracker,
    FinancialHealth,
    FinanceSearch,
    ReorderAlerts,
    ProductInsights,
    InventorySearch,
}

impl Widgets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn teardown(&self, kind: WidgetKind) {
        match kind {
            WidgetKind::RevenueForecast => lock_widget(&self.revenue_forecast).teardown(),
            WidgetKind::Cashflow => lock_widget(&self.cashflow).teardown(),
            WidgetKind::SalesOverview => lock_widget(&self.sales_overview).teardown(),
            WidgetKind::GoalTracker => lock_widget(&self.goal_tracker).teardown(),
            WidgetKind::FinancialHealth => lock_widget(&self.financial_health).teardown(),
            WidgetKind::FinanceSearch => lock_widget(&self.finance_search).teardown(),
            WidgetKind::ReorderAlerts => lock_widget(&self.reorder_alerts).teardown(),
            WidgetKind::ProductInsights => lock_widget(&self.product_insights).teardown(),
            WidgetKind::InventorySearch => lock_widget(&self.inventory_search).teardown(),
        }
    }
}

/// Called when a widget's page is navigated away from.
pub fn unmount_widget(state: &crate::AppState, kind: WidgetKind) {
    log_debug!("WIDGET", "unmount {:?}", kind);
    state.widgets.teardown(kind);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_applies_current_ticket() {
        let mut widget: WidgetState<u32> = WidgetState::new();
        let ticket = widget.begin();
        assert!(widget.is_loading());
        assert_eq!(widget.finish(ticket, Ok(5)), LoadOutcome::Applied);
        assert_eq!(widget.data(), Some(&5));
        assert!(!widget.is_loading());
    }

    #[test]
    fn test_failure_clears_data() {
        let mut widget: WidgetState<u32> = WidgetState::new();
        let t = widget.begin();
        widget.finish(t, Ok(1));
        let t = widget.begin();
        assert_eq!(widget.finish(t, Err("offline".to_string())), LoadOutcome::Failed);
        assert_eq!(widget.data(), None);
        assert_eq!(widget.last_error(), Some("offline"));
    }

    #[test]
    fn test_older_ticket_is_stale() {
        let mut widget: WidgetState<u32> = WidgetState::new();
        let first = widget.begin();
        let second = widget.begin();
        assert_eq!(widget.finish(second, Ok(2)), LoadOutcome::Applied);
        assert_eq!(widget.finish(first, Ok(1)), LoadOutcome::Stale);
        assert_eq!(widget.data(), Some(&2));
    }

    #[test]
    fn test_teardown_discards_in_flight() {
        let mut widget: WidgetState<u32> = WidgetState::new();
        let ticket = widget.begin();
        widget.teardown();
        assert_eq!(widget.finish(ticket, Ok(9)), LoadOutcome::Stale);
        assert_eq!(widget.data(), None);
        assert!(!widget.is_loading());
    }

    #[test]
    fn test_load_widget_returns_held_data() {
        let slot = Mutex::new(WidgetState::<String>::new());
        let data = load_widget(&slot, "test", || Ok("hello".to_string()));
        assert_eq!(data.as_deref(), Some("hello"));

        let data = load_widget(&slot, "test", || Err("boom".to_string()));
        assert!(data.is_none());
    }
}
