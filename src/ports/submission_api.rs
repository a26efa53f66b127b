//! SubmissionApi port - the persistence collaborator.
//!
//! The workflow core only looks at success or failure and the returned
//! draft's status; the wire format belongs to the adapter.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, DraftId};
use crate::domain::submission::{Draft, DraftPayload, StatusAction};

/// Port for creating, updating and transitioning submissions.
///
/// Implementations must ensure:
/// - `create` honours `payload.route_for_approval` when present
/// - `update` never changes the submission's status
/// - Failures are reported as `DomainError` with `PersistenceError` or
///   `SubmissionNotFound` codes
#[async_trait]
pub trait SubmissionApi: Send + Sync {
    /// Creates a new submission and returns its identifier.
    async fn create(&self, payload: &DraftPayload) -> Result<DraftId, DomainError>;

    /// Replaces the fields of an existing submission.
    ///
    /// Returns the submission as stored after the update.
    async fn update(&self, id: &DraftId, payload: &DraftPayload) -> Result<Draft, DomainError>;

    /// Moves a submission to a new status.
    async fn transition_status(
        &self,
        id: &DraftId,
        action: StatusAction,
    ) -> Result<Draft, DomainError>;

    /// Fetches a submission. Returns `None` if not found.
    async fn get(&self, id: &DraftId) -> Result<Option<Draft>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn submission_api_is_object_safe() {
        fn _accepts_dyn(_api: &dyn SubmissionApi) {}
    }
}
