//! FILENAME: app/src/tour_commands.rs
//! PURPOSE: Onboarding tour commands over the shared `Tour` state machine.
//! CONTEXT: Every successful transition is persisted under
//! `onboarding_tour_progress` before it becomes visible in `AppState`.

use persistence::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use tour::{Tour, TourError, TourProgress, TourStatus, TourStep, Transition};

use crate::{log_debug, log_info, log_warn, AppState};

pub const KEY_TOUR_PROGRESS: &str = "onboarding_tour_progress";

/// The steps shown to a first-time user, in order.
pub fn default_steps() -> Vec<TourStep> {
    vec![
        TourStep::new(
            "welcome",
            "Welcome",
            "A quick look at where everything lives.",
        )
        .with_route("/dashboard"),
        TourStep::new(
            "dashboard",
            "Dashboard",
            "Sales at a glance, revenue forecasts and your goals.",
        )
        .with_route("/dashboard"),
        TourStep::new(
            "inventory",
            "Inventory",
            "Search stock and act on reorder alerts before you run out.",
        )
        .with_route("/inventory"),
        TourStep::new(
            "finance",
            "Finance",
            "Cash-flow projection and your financial health score.",
        )
        .with_route("/finance"),
        TourStep::new(
            "pricing",
            "Pricing",
            "Turn cost, expenses and margin into a recommended price.",
        )
        .with_route("/pricing"),
        TourStep::new(
            "settings",
            "Settings",
            "Store name, tax rate, currency and payment methods.",
        )
        .with_route("/settings"),
    ]
}

/// Restore the tour from local storage, starting fresh if nothing usable is stored.
pub fn load_tour(store: &dyn KeyValueStore) -> Tour {
    match load_json::<TourProgress>(store, KEY_TOUR_PROGRESS) {
        Ok(Some(progress)) => Tour::with_progress(default_steps(), progress),
        Ok(None) => Tour::new(default_steps()),
        Err(e) => {
            log_warn!("TOUR", "discarding unreadable tour progress: {}", e);
            Tour::new(default_steps())
        }
    }
}

/// Snapshot of the tour for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourView {
    pub status: TourStatus,
    pub step_index: usize,
    pub total_steps: usize,
    pub step: Option<TourStep>,
    pub is_last_step: bool,
    pub percent_complete: f64,
    pub completed_steps: Vec<String>,
    pub skipped_steps: Vec<String>,
}

impl TourView {
    fn from_tour(tour: &Tour) -> Self {
        let progress = tour.progress();
        TourView {
            status: tour.status(),
            step_index: progress.current_step,
            total_steps: tour.steps().len(),
            step: tour.current_step().cloned(),
            is_last_step: tour.is_last_step(),
            percent_complete: tour.percent_complete(),
            completed_steps: progress.completed_steps.clone(),
            skipped_steps: progress.skipped_steps.clone(),
        }
    }
}

/// Apply `op` to a copy of the tour, persist the new progress, then commit it.
fn apply<F>(state: &AppState, name: &str, op: F) -> Result<Transition, String>
where
    F: FnOnce(&mut Tour) -> Result<Transition, TourError>,
{
    let mut tour = state.tour.lock().map_err(|e| e.to_string())?;
    let mut next = tour.clone();

    let transition = op(&mut next).map_err(|e| {
        log_debug!("TOUR", "{} rejected: {}", name, e);
        e.to_string()
    })?;

    state.with_store(|store| save_json(store, KEY_TOUR_PROGRESS, next.progress()))?;
    *tour = next;

    log_info!(
        "TOUR",
        "{} -> {:?} at step {}",
        name,
        transition.status,
        tour.progress().current_step
    );
    Ok(transition)
}

// ============================================================================
// COMMANDS
// ============================================================================

pub fn get_tour(state: &AppState) -> Result<TourView, String> {
    let tour = state.tour.lock().map_err(|e| e.to_string())?;
    Ok(TourView::from_tour(&tour))
}

pub fn start_tour(state: &AppState) -> Result<Transition, String> {
    apply(state, "start", |tour| tour.start())
}

pub fn next_tour_step(state: &AppState) -> Result<Transition, String> {
    apply(state, "next", |tour| tour.next())
}

pub fn previous_tour_step(state: &AppState) -> Result<Transition, String> {
    apply(state, "back", |tour| tour.back())
}

pub fn skip_tour(state: &AppState) -> Result<Transition, String> {
    apply(state, "skip", |tour| tour.skip())
}

pub fn complete_tour(state: &AppState) -> Result<Transition, String> {
    apply(state, "complete", |tour| tour.complete())
}

pub fn reset_tour(state: &AppState) -> Result<TourView, String> {
    apply(state, "reset", |tour| {
        tour.reset();
        Ok(Transition {
            status: tour.status(),
            step: None,
            navigate_to: None,
        })
    })?;
    get_tour(state)
}

/// Whether the tour should be offered automatically (never started).
pub fn should_offer_tour(state: &AppState) -> Result<bool, String> {
    let tour = state.tour.lock().map_err(|e| e.to_string())?;
    Ok(tour.status() == TourStatus::NotStarted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_steps_have_unique_ids_and_routes() {
        let steps = default_steps();
        let mut ids: Vec<&str> = steps.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), steps.len());
        assert!(steps.iter().all(|s| s.route.is_some()));
    }
}
