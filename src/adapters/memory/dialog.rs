//! Scripted Confirmation Dialog
//!
//! Answers prompts from a queue; an empty queue answers "stay".

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::navigation::{ConfirmationPrompt, LeaveChoice};
use crate::ports::ConfirmationDialog;

#[derive(Debug, Clone, Default)]
pub struct ScriptedDialog {
    answers: Arc<RwLock<VecDeque<LeaveChoice>>>,
    prompts: Arc<RwLock<Vec<ConfirmationPrompt>>>,
}

impl ScriptedDialog {
    pub fn new(answers: impl IntoIterator<Item = LeaveChoice>) -> Self {
        Self {
            answers: Arc::new(RwLock::new(answers.into_iter().collect())),
            prompts: Arc::default(),
        }
    }

    pub async fn answer_next(&self, choice: LeaveChoice) {
        self.answers.write().await.push_back(choice);
    }

    /// Prompts shown so far, oldest first.
    pub async fn prompts(&self) -> Vec<ConfirmationPrompt> {
        self.prompts.read().await.clone()
    }
}

#[async_trait]
impl ConfirmationDialog for ScriptedDialog {
    async fn confirm(&self, prompt: ConfirmationPrompt) -> LeaveChoice {
        self.prompts.write().await.push(prompt);
        self.answers
            .write()
            .await
            .pop_front()
            .unwrap_or(LeaveChoice::Stay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn answers_in_order_then_stays() {
        let dialog = ScriptedDialog::new([LeaveChoice::Leave]);

        let first = dialog.confirm(ConfirmationPrompt::unsaved_changes()).await;
        let second = dialog.confirm(ConfirmationPrompt::unsaved_changes()).await;

        assert_eq!(first, LeaveChoice::Leave);
        assert_eq!(second, LeaveChoice::Stay);
        assert_eq!(dialog.prompts().await.len(), 2);
    }
}
