//! FILENAME: app/src/toasts.rs
// PURPOSE: Transient notifications raised by explicit user actions.

use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Toast {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }
}

pub fn push_toast(state: &AppState, toast: Toast) {
    let mut toasts = state.toasts.lock().unwrap_or_else(|p| p.into_inner());
    toasts.push(toast);
}

/// Report the outcome of a user action as a toast and pass the result through.
pub(crate) fn notify<T>(state: &AppState, result: Result<T, String>, success: &str) -> Result<T, String> {
    match &result {
        Ok(_) => push_toast(state, Toast::success(success)),
        Err(e) => push_toast(state, Toast::error(e.clone())),
    }
    result
}

/// Return all pending toasts, oldest first, and clear the queue.
pub fn drain_toasts(state: &AppState) -> Vec<Toast> {
    let mut toasts = state.toasts.lock().unwrap_or_else(|p| p.into_inner());
    std::mem::take(&mut *toasts)
}
