//! FILENAME: app/src/goals.rs
//! PURPOSE: Dashboard goal CRUD, persisted as a JSON array under `dashboard_goals`.
//! CONTEXT: Progress against sales is computed by the goal tracker widget.

use analytics::{Goal, GoalMetric, GoalPeriod};
use chrono::Utc;
use persistence::{load_json, save_json, KeyValueStore};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{log_info, log_warn, AppState};

pub const KEY_DASHBOARD_GOALS: &str = "dashboard_goals";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub name: String,
    pub metric: GoalMetric,
    pub target: f64,
    pub period: GoalPeriod,
}

pub fn load_goals(store: &dyn KeyValueStore) -> Vec<Goal> {
    match load_json::<Vec<Goal>>(store, KEY_DASHBOARD_GOALS) {
        Ok(goals) => goals.unwrap_or_default(),
        Err(e) => {
            log_warn!("GOALS", "discarding unreadable goals: {}", e);
            Vec::new()
        }
    }
}

fn persist(state: &AppState, goals: &[Goal]) -> Result<(), String> {
    state.with_store(|store| save_json(store, KEY_DASHBOARD_GOALS, goals))
}

pub fn list_goals(state: &AppState) -> Result<Vec<Goal>, String> {
    let goals = state.goals.lock().map_err(|e| e.to_string())?;
    Ok(goals.clone())
}

pub fn add_goal(state: &AppState, input: GoalInput) -> Result<Goal, String> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err("Goal name cannot be empty".to_string());
    }
    if !input.target.is_finite() || input.target <= 0.0 {
        return Err(format!("Goal target must be a positive number, got {}", input.target));
    }

    let goal = Goal {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        metric: input.metric,
        target: input.target,
        period: input.period,
        created_at: Utc::now().to_rfc3339(),
    };

    let mut goals = state.goals.lock().map_err(|e| e.to_string())?;
    goals.push(goal.clone());
    if let Err(e) = persist(state, &goals) {
        goals.pop();
        return Err(e);
    }

    log_info!("GOALS", "added goal {} '{}'", goal.id, goal.name);
    Ok(goal)
}

/// Remove a goal by id. Returns the removed goal.
pub fn remove_goal(state: &AppState, goal_id: &str) -> Result<Goal, String> {
    let mut goals = state.goals.lock().map_err(|e| e.to_string())?;
    let index = goals
        .iter()
        .position(|g| g.id == goal_id)
        .ok_or_else(|| format!("Goal {} not found", goal_id))?;

    let removed = goals.remove(index);
    if let Err(e) = persist(state, &goals) {
        goals.insert(index, removed);
        return Err(e);
    }

    log_info!("GOALS", "removed goal {}", goal_id);
    Ok(removed)
}
