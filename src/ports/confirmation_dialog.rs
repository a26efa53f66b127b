//! ConfirmationDialog port - asks the user to stay or leave.

use async_trait::async_trait;

use crate::domain::navigation::{ConfirmationPrompt, LeaveChoice};

/// Port for presenting a two-choice confirmation.
///
/// The core does not care how it is rendered; it only waits for the
/// choice. `Leave` is the destructive choice in every prompt.
#[async_trait]
pub trait ConfirmationDialog: Send + Sync {
    async fn confirm(&self, prompt: ConfirmationPrompt) -> LeaveChoice;
}
