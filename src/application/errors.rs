//! Errors returned by the workflow application services.

use thiserror::Error;

use crate::domain::foundation::{DomainError, DraftId, ErrorCode, ValidationError};
use crate::domain::sections::{SectionId, ValidationFailure};
use crate::domain::submission::StatusAction;

/// Error type for coordinator operations.
///
/// Only `Persistence` is surfaced as a global notification. Validation
/// failures belong next to the offending field, and lookup misses are not
/// errors at all.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    #[error("{0} must be completed first")]
    SectionIncomplete(SectionId),

    #[error("{0} is not part of this exam")]
    UnknownSection(SectionId),

    #[error("the declaration has not been accepted")]
    DeclarationRequired,

    #[error("submission is read-only")]
    ReadOnly,

    #[error("not permitted: {0}")]
    Forbidden(&'static str),

    #[error("cannot {action:?} from the current status: {source}")]
    InvalidTransition {
        action: StatusAction,
        #[source]
        source: ValidationError,
    },

    #[error("no identity change is waiting for confirmation")]
    NoPendingIdentityChange,

    #[error("an identity change is waiting for confirmation")]
    IdentityChangePending,

    #[error("submission not found: {0}")]
    NotFound(DraftId),

    #[error("persistence failed: {0}")]
    Persistence(#[source] DomainError),
}

impl WorkflowError {
    /// Returns the domain error code this error maps to.
    pub fn code(&self) -> ErrorCode {
        match self {
            WorkflowError::Validation(_)
            | WorkflowError::SectionIncomplete(_)
            | WorkflowError::UnknownSection(_)
            | WorkflowError::DeclarationRequired => ErrorCode::ValidationFailed,
            WorkflowError::ReadOnly => ErrorCode::SubmissionReadOnly,
            WorkflowError::Forbidden(_) => ErrorCode::Forbidden,
            WorkflowError::InvalidTransition { .. }
            | WorkflowError::NoPendingIdentityChange
            | WorkflowError::IdentityChangePending => ErrorCode::InvalidStateTransition,
            WorkflowError::NotFound(_) => ErrorCode::SubmissionNotFound,
            WorkflowError::Persistence(err) => err.code,
        }
    }

    /// Returns true if this error should be shown as a global notification.
    pub fn is_notifiable(&self) -> bool {
        matches!(self, WorkflowError::Persistence(_))
    }
}
