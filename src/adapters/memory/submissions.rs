//! In-Memory Submission Store
//!
//! Stores submissions in memory and applies status transitions with the
//! same rules the backend enforces. Useful for testing and development.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::foundation::{DomainError, DraftId, ErrorCode};
use crate::domain::submission::{Draft, DraftPayload, StatusAction, SubmissionStatus};
use crate::ports::SubmissionApi;

/// Calls that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubmissionOperation {
    Create,
    Update,
    TransitionStatus,
    Get,
}

/// In-memory submission store
#[derive(Debug, Clone, Default)]
pub struct InMemorySubmissionApi {
    drafts: Arc<RwLock<HashMap<DraftId, Draft>>>,
    payloads: Arc<RwLock<Vec<DraftPayload>>>,
    failing: Arc<RwLock<HashSet<SubmissionOperation>>>,
}

impl InMemorySubmissionApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later call of this kind fail until [`Self::recover`].
    pub async fn fail(&self, operation: SubmissionOperation) {
        self.failing.write().await.insert(operation);
    }

    pub async fn recover(&self) {
        self.failing.write().await.clear();
    }

    /// Stores a submission as if it had been saved earlier.
    pub async fn insert(&self, draft: Draft) -> Option<DraftId> {
        let id = draft.id()?;
        self.drafts.write().await.insert(id, draft);
        Some(id)
    }

    pub async fn stored(&self, id: &DraftId) -> Option<Draft> {
        self.drafts.read().await.get(id).cloned()
    }

    /// Payloads received by create and update, oldest first.
    pub async fn payloads(&self) -> Vec<DraftPayload> {
        self.payloads.read().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.drafts.read().await.len()
    }

    async fn check(&self, operation: SubmissionOperation) -> Result<(), DomainError> {
        if self.failing.read().await.contains(&operation) {
            return Err(DomainError::persistence(format!(
                "{:?} rejected by the submission store",
                operation
            )));
        }
        Ok(())
    }

    async fn existing(&self, id: &DraftId) -> Result<Draft, DomainError> {
        self.stored(id).await.ok_or_else(|| {
            DomainError::new(ErrorCode::SubmissionNotFound, format!("Submission not found: {}", id))
        })
    }
}

#[async_trait]
impl SubmissionApi for InMemorySubmissionApi {
    async fn create(&self, payload: &DraftPayload) -> Result<DraftId, DomainError> {
        self.check(SubmissionOperation::Create).await?;
        let id = DraftId::new();
        let status = if payload.route_for_approval == Some(true) {
            SubmissionStatus::PendingApproval
        } else {
            SubmissionStatus::Draft
        };
        self.payloads.write().await.push(payload.clone());
        self.drafts
            .write()
            .await
            .insert(id, Draft::reconstitute(id, status, payload.fields.clone()));
        debug!(draft_id = %id, %status, "submission created");
        Ok(id)
    }

    async fn update(&self, id: &DraftId, payload: &DraftPayload) -> Result<Draft, DomainError> {
        self.check(SubmissionOperation::Update).await?;
        let existing = self.existing(id).await?;
        let status = existing.status().unwrap_or_default();
        if status.is_final() {
            return Err(DomainError::new(
                ErrorCode::SubmissionReadOnly,
                format!("Submission {} is {}", id, status),
            )
            .with_detail("status", status.to_string()));
        }
        let updated = Draft::reconstitute(*id, status, payload.fields.clone());
        self.payloads.write().await.push(payload.clone());
        self.drafts.write().await.insert(*id, updated.clone());
        Ok(updated)
    }

    async fn transition_status(
        &self,
        id: &DraftId,
        action: StatusAction,
    ) -> Result<Draft, DomainError> {
        self.check(SubmissionOperation::TransitionStatus).await?;
        let existing = self.existing(id).await?;
        let status = action.apply(existing.status())?;
        let moved = Draft::reconstitute(*id, status, existing.fields().clone());
        self.drafts.write().await.insert(*id, moved.clone());
        debug!(draft_id = %id, %status, "submission status changed");
        Ok(moved)
    }

    async fn get(&self, id: &DraftId) -> Result<Option<Draft>, DomainError> {
        self.check(SubmissionOperation::Get).await?;
        Ok(self.stored(id).await)
    }
}
