//! Submission lifecycle status and the actions that move it.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{StateMachine, ValidationError};

/// Lifecycle status of a submission.
///
/// A draft that has never been saved has no status at all; callers hold
/// `Option<SubmissionStatus>` and treat `None` like `Draft` for transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    #[default]
    Draft,
    PendingApproval,
    Submitted,
    Rejected,
    RevisionRequested,
}

impl SubmissionStatus {
    /// Returns true if the submission can no longer be edited by anyone.
    pub fn is_final(&self) -> bool {
        matches!(self, SubmissionStatus::Submitted | SubmissionStatus::Rejected)
    }

    /// Returns true if the submission is back in its author's hands.
    pub fn is_editable_draft(&self) -> bool {
        matches!(
            self,
            SubmissionStatus::Draft | SubmissionStatus::RevisionRequested
        )
    }
}

impl StateMachine for SubmissionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SubmissionStatus::*;
        matches!(
            (self, target),
            (Draft, PendingApproval)
                | (Draft, Submitted)
                | (PendingApproval, Submitted)
                | (PendingApproval, Rejected)
                | (PendingApproval, RevisionRequested)
                | (RevisionRequested, PendingApproval)
                | (RevisionRequested, Submitted)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SubmissionStatus::*;
        match self {
            Draft => vec![PendingApproval, Submitted],
            PendingApproval => vec![Submitted, Rejected, RevisionRequested],
            RevisionRequested => vec![PendingApproval, Submitted],
            Submitted | Rejected => vec![],
        }
    }
}

impl fmt::Display for SubmissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SubmissionStatus::Draft => "draft",
            SubmissionStatus::PendingApproval => "pending_approval",
            SubmissionStatus::Submitted => "submitted",
            SubmissionStatus::Rejected => "rejected",
            SubmissionStatus::RevisionRequested => "revision_requested",
        };
        write!(f, "{}", s)
    }
}

/// Status-changing action sent to the transition endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusAction {
    RouteForApproval,
    Submit,
    Reject,
    RequestRevision,
}

impl StatusAction {
    /// Status this action moves a submission into.
    pub fn target(&self) -> SubmissionStatus {
        match self {
            StatusAction::RouteForApproval => SubmissionStatus::PendingApproval,
            StatusAction::Submit => SubmissionStatus::Submitted,
            StatusAction::Reject => SubmissionStatus::Rejected,
            StatusAction::RequestRevision => SubmissionStatus::RevisionRequested,
        }
    }

    /// Applies this action to a (possibly absent) current status.
    pub fn apply(
        &self,
        current: Option<SubmissionStatus>,
    ) -> Result<SubmissionStatus, ValidationError> {
        current.unwrap_or_default().transition_to(self.target())
    }
}
