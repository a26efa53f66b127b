//! GuardedNavigator - drives the guard's confirmation through the dialog port.

use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::domain::navigation::{
    ConfirmationPrompt, LeaveChoice, NavigationOutcome, NavigationTarget, PopOutcome,
};
use crate::ports::ConfirmationDialog;

use super::NavigationGuardStore;

/// How a guarded navigation attempt ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "target")]
pub enum NavigationResolution {
    /// The navigation ran, either right away or after the user chose to leave.
    Navigated(NavigationTarget),
    /// The user chose to stay.
    Stayed,
    /// Another attempt already owns the open dialog; its answer decides.
    Superseded,
    /// A native history move that needed no interception.
    Allowed,
}

/// Asks the user before discarding unsaved changes.
pub struct GuardedNavigator {
    guard: Arc<NavigationGuardStore>,
    dialog: Arc<dyn ConfirmationDialog>,
}

impl GuardedNavigator {
    pub fn new(guard: Arc<NavigationGuardStore>, dialog: Arc<dyn ConfirmationDialog>) -> Self {
        Self { guard, dialog }
    }

    pub fn guard(&self) -> &Arc<NavigationGuardStore> {
        &self.guard
    }

    /// Navigates in-app, prompting first when there are unsaved changes.
    pub async fn navigate(&self, target: NavigationTarget) -> NavigationResolution {
        match self.guard.request_navigation(target) {
            NavigationOutcome::Navigated(target) => NavigationResolution::Navigated(target),
            NavigationOutcome::ConfirmationRequired => self.resolve().await,
            NavigationOutcome::ConfirmationPending => NavigationResolution::Superseded,
        }
    }

    /// Handles a native back/forward move reported by the platform.
    pub async fn history_popped(&self) -> NavigationResolution {
        match self.guard.on_history_pop() {
            PopOutcome::Allowed => NavigationResolution::Allowed,
            PopOutcome::ConfirmationRequired => self.resolve().await,
            PopOutcome::ConfirmationPending => NavigationResolution::Superseded,
        }
    }

    async fn resolve(&self) -> NavigationResolution {
        let choice = self
            .dialog
            .confirm(ConfirmationPrompt::unsaved_changes())
            .await;

        match choice {
            LeaveChoice::Leave => {
                info!("leaving with unsaved changes");
                match self.guard.confirm_leave().await {
                    Some(target) => NavigationResolution::Navigated(target),
                    None => NavigationResolution::Stayed,
                }
            }
            LeaveChoice::Stay => {
                self.guard.cancel_leave();
                NavigationResolution::Stayed
            }
        }
    }
}
