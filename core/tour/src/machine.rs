//! FILENAME: core/tour/src/machine.rs
//! PURPOSE: Onboarding tour state machine.
//! CONTEXT: Four states: not-started, in-progress, completed, skipped.
//! From in-progress the tour moves forward or back one step at a time and
//! leaves through `skip` (any step) or `complete` (last step only).

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::TourError;

// ============================================================================
// TYPES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TourStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

/// One stop on the tour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStep {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Page to navigate to when this step becomes current
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,
}

impl TourStep {
    pub fn new(id: impl Into<String>, title: impl Into<String>, description: impl Into<String>) -> Self {
        TourStep {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            route: None,
        }
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }
}

/// Persisted tour progress.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourProgress {
    #[serde(default)]
    pub status: TourStatus,
    #[serde(default)]
    pub current_step: usize,
    #[serde(default)]
    pub completed_steps: Vec<String>,
    #[serde(default)]
    pub skipped_steps: Vec<String>,
    /// When the tour was last started (ISO 8601 format)
    #[serde(default)]
    pub started_at: Option<String>,
    /// When the tour was completed or skipped (ISO 8601 format)
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// Outcome of a transition: the new status, the step now showing, and the
/// page the UI should move to (if the step names one).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub status: TourStatus,
    pub step: Option<TourStep>,
    pub navigate_to: Option<String>,
}

// ============================================================================
// MACHINE
// ============================================================================

#[derive(Debug, Clone)]
pub struct Tour {
    steps: Vec<TourStep>,
    progress: TourProgress,
}

impl Tour {
    pub fn new(steps: Vec<TourStep>) -> Self {
        Tour {
            steps,
            progress: TourProgress::default(),
        }
    }

    /// Resume from persisted progress. An out-of-range step index (e.g. the
    /// step list got shorter since it was saved) is clamped to the last step.
    pub fn with_progress(steps: Vec<TourStep>, mut progress: TourProgress) -> Self {
        if steps.is_empty() {
            progress.current_step = 0;
            if progress.status == TourStatus::InProgress {
                progress.status = TourStatus::NotStarted;
            }
        } else if progress.current_step >= steps.len() {
            progress.current_step = steps.len() - 1;
        }
        Tour { steps, progress }
    }

    pub fn steps(&self) -> &[TourStep] {
        &self.steps
    }

    pub fn progress(&self) -> &TourProgress {
        &self.progress
    }

    pub fn status(&self) -> TourStatus {
        self.progress.status
    }

    pub fn is_active(&self) -> bool {
        self.progress.status == TourStatus::InProgress
    }

    /// The step on screen; `None` unless the tour is in progress.
    pub fn current_step(&self) -> Option<&TourStep> {
        if self.is_active() {
            self.steps.get(self.progress.current_step)
        } else {
            None
        }
    }

    pub fn is_last_step(&self) -> bool {
        !self.steps.is_empty() && self.progress.current_step + 1 == self.steps.len()
    }

    pub fn percent_complete(&self) -> f64 {
        if self.progress.status == TourStatus::Completed {
            return 100.0;
        }
        if self.steps.is_empty() {
            return 0.0;
        }
        self.progress.completed_steps.len() as f64 / self.steps.len() as f64 * 100.0
    }

    pub fn start(&mut self) -> Result<Transition, TourError> {
        if self.steps.is_empty() {
            return Err(TourError::Empty);
        }
        if self.is_active() {
            return Err(TourError::AlreadyActive);
        }
        self.progress = TourProgress {
            status: TourStatus::InProgress,
            current_step: 0,
            completed_steps: Vec::new(),
            skipped_steps: Vec::new(),
            started_at: Some(Utc::now().to_rfc3339()),
            finished_at: None,
        };
        Ok(self.transition())
    }

    /// Mark the current step done and advance one step.
    pub fn next(&mut self) -> Result<Transition, TourError> {
        self.ensure_active()?;
        if self.is_last_step() {
            return Err(TourError::AtLastStep);
        }
        self.mark_completed();
        self.progress.current_step += 1;
        Ok(self.transition())
    }

    pub fn back(&mut self) -> Result<Transition, TourError> {
        self.ensure_active()?;
        if self.progress.current_step == 0 {
            return Err(TourError::AtFirstStep);
        }
        self.progress.current_step -= 1;
        Ok(self.transition())
    }

    /// Leave the tour early. The current step is recorded as skipped.
    pub fn skip(&mut self) -> Result<Transition, TourError> {
        self.ensure_active()?;
        if let Some(id) = self.steps.get(self.progress.current_step).map(|s| s.id.clone()) {
            if !self.progress.skipped_steps.contains(&id) {
                self.progress.skipped_steps.push(id);
            }
        }
        self.finish(TourStatus::Skipped);
        Ok(self.transition())
    }

    pub fn complete(&mut self) -> Result<Transition, TourError> {
        self.ensure_active()?;
        if !self.is_last_step() {
            return Err(TourError::NotAtLastStep);
        }
        self.mark_completed();
        self.finish(TourStatus::Completed);
        Ok(self.transition())
    }

    pub fn reset(&mut self) {
        self.progress = TourProgress::default();
    }

    fn ensure_active(&self) -> Result<(), TourError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TourError::NotActive(self.progress.status))
        }
    }

    fn mark_completed(&mut self) {
        if let Some(step) = self.steps.get(self.progress.current_step) {
            if !self.progress.completed_steps.contains(&step.id) {
                self.progress.completed_steps.push(step.id.clone());
            }
        }
    }

    fn finish(&mut self, status: TourStatus) {
        self.progress.status = status;
        self.progress.finished_at = Some(Utc::now().to_rfc3339());
    }

    fn transition(&self) -> Transition {
        let step = self.current_step().cloned();
        Transition {
            status: self.progress.status,
            navigate_to: step.as_ref().and_then(|s| s.route.clone()),
            step,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
