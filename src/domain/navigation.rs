//! Navigation values shared by the guard and its callers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a navigation request wants to go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    /// Relative move in the browser history (-1 is "back").
    HistoryOffset(i32),
    /// In-app path, optionally with a query string.
    Path(String),
}

impl NavigationTarget {
    pub fn back() -> Self {
        NavigationTarget::HistoryOffset(-1)
    }

    pub fn path(path: impl Into<String>) -> Self {
        NavigationTarget::Path(path.into())
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavigationTarget::HistoryOffset(offset) => write!(f, "history({:+})", offset),
            NavigationTarget::Path(path) => f.write_str(path),
        }
    }
}

/// Result of asking the guard to navigate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The navigation was performed right away.
    Navigated(NavigationTarget),
    /// Unsaved changes exist; the confirmation must be shown.
    ConfirmationRequired,
    /// A confirmation is already open; the pending target was replaced.
    ConfirmationPending,
}

/// Result of a native history move reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopOutcome {
    /// Not dirty; the native navigation stands.
    Allowed,
    /// Neutralized; the confirmation must be shown.
    ConfirmationRequired,
    /// Neutralized; a confirmation was already open.
    ConfirmationPending,
}

/// Answer to the platform's before-unload notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnloadDecision {
    Allow,
    /// Cancel the unload so the browser shows its own prompt.
    Prompt,
}

/// The user's choice in the unsaved-changes dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaveChoice {
    Stay,
    Leave,
}

/// Text shown in a confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfirmationPrompt {
    pub title: String,
    pub message: String,
    pub stay_label: String,
    pub leave_label: String,
}

impl ConfirmationPrompt {
    pub fn unsaved_changes() -> Self {
        Self {
            title: "Unsaved changes".into(),
            message: "You have unsaved changes. Leaving this page will discard them.".into(),
            stay_label: "Stay".into(),
            leave_label: "Leave".into(),
        }
    }

    pub fn identity_change(previous: &str, next: &str) -> Self {
        let previous = previous.trim();
        let message = if previous.is_empty() {
            format!(
                "Setting the identity value to {} clears every section after patient details.",
                next
            )
        } else {
            format!(
                "Changing the identity value from {} to {} clears every section after patient details.",
                previous, next
            )
        };
        Self {
            title: "Change patient?".into(),
            message,
            stay_label: "Keep current patient".into(),
            leave_label: "Change patient".into(),
        }
    }
}
