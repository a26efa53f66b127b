//! Identity value changes and lookup-driven auto-population.
//!
//! Replacing an identity value after later sections hold answers is held
//! back until the user confirms, because confirming wipes those answers.
//! Entering the first value never prompts.

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::navigation::ConfirmationPrompt;
use crate::domain::sections::SectionId;
use crate::domain::submission::normalize_identity_value;
use crate::ports::IdentityRecord;

use super::{SubmissionDraftCoordinator, WorkflowError};

/// What happened to a requested identity change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result")]
pub enum IdentityChange {
    /// Same value as before (after normalization).
    Unchanged,
    /// Applied right away; no downstream answers were at risk.
    Applied,
    /// Held as pending until the user confirms or cancels.
    ConfirmationRequired { prompt: ConfirmationPrompt },
}

/// Result of an identity lookup.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "result", content = "record")]
pub enum LookupOutcome {
    /// Patient found; details were written into the draft.
    Found(IdentityRecord),
    /// Not found or the directory failed; the user types details in.
    ManualEntry,
    /// This value was already looked up.
    Skipped,
    /// The exam category has no lookup, or there is no value to look up.
    NotApplicable,
}

impl SubmissionDraftCoordinator {
    /// Requests a new identity value.
    ///
    /// # Errors
    ///
    /// - `ReadOnly` if the submission cannot be edited
    /// - `Forbidden` if the identity field is locked for this actor
    pub fn change_identity_value(&mut self, raw: &str) -> Result<IdentityChange, WorkflowError> {
        let flags = self.current_flags();
        if flags.is_read_only {
            return Err(WorkflowError::ReadOnly);
        }
        if !flags.can_edit_identity_field {
            return Err(WorkflowError::Forbidden("identity value is locked during review"));
        }

        let next = normalize_identity_value(raw);
        let current = self.draft.fields().identity_value.clone();
        if next == current {
            self.pending_identity = None;
            return Ok(IdentityChange::Unchanged);
        }

        // A first entry has no confirmed patient to protect.
        if !current.is_empty() && self.draft.fields().has_downstream_data() {
            debug!(%current, %next, "identity change held for confirmation");
            let prompt = ConfirmationPrompt::identity_change(&current, &next);
            self.pending_identity = Some(next);
            return Ok(IdentityChange::ConfirmationRequired { prompt });
        }

        self.draft.set_identity_value(&next);
        self.pending_identity = None;
        self.after_edit();
        Ok(IdentityChange::Applied)
    }

    /// Applies the pending identity value.
    ///
    /// Every downstream answer and completion mark is cleared, then the
    /// lookup runs again for the new value.
    pub async fn confirm_identity_change(&mut self) -> Result<LookupOutcome, WorkflowError> {
        let next = self
            .pending_identity
            .take()
            .ok_or(WorkflowError::NoPendingIdentityChange)?;

        self.draft.set_identity_value(&next);
        let cleared = self.draft.clear_downstream();
        self.tracker.clear_downstream();
        self.tracker.evict(SectionId::PatientInfo);
        self.last_looked_up = None;
        self.after_edit();
        info!(
            correlation_id = %self.metadata.correlation_id(),
            cleared,
            "identity value changed"
        );

        self.lookup_identity().await
    }

    /// Drops the pending identity value; the confirmed value stays.
    ///
    /// Returns the identity value that remains in effect.
    pub fn cancel_identity_change(&mut self) -> Result<String, WorkflowError> {
        self.pending_identity
            .take()
            .ok_or(WorkflowError::NoPendingIdentityChange)?;
        Ok(self.draft.fields().identity_value.clone())
    }

    /// Looks up the current identity value and fills in what is found.
    ///
    /// A value that was already looked up is skipped. Not-found and lookup
    /// failures both fall back to manual entry.
    pub async fn lookup_identity(&mut self) -> Result<LookupOutcome, WorkflowError> {
        if self.pending_identity.is_some() {
            return Err(WorkflowError::IdentityChangePending);
        }
        self.ensure_editable()?;

        let key = self.draft.fields().identity_value.clone();
        if key.is_empty() || !self.draft.exam_type().category().supports_identity_lookup() {
            return Ok(LookupOutcome::NotApplicable);
        }
        if self.last_looked_up.as_deref() == Some(key.as_str()) {
            debug!(identity = %key, "lookup skipped for repeated value");
            return Ok(LookupOutcome::Skipped);
        }
        self.last_looked_up = Some(key.clone());

        match self.ports.identity.lookup(&key).await {
            Ok(Some(record)) => {
                self.apply_record(&record);
                Ok(LookupOutcome::Found(record))
            }
            Ok(None) => Ok(LookupOutcome::ManualEntry),
            Err(err) => {
                warn!(error = %err, "identity lookup failed, falling back to manual entry");
                self.last_looked_up = None;
                Ok(LookupOutcome::ManualEntry)
            }
        }
    }

    fn apply_record(&mut self, record: &IdentityRecord) {
        let name = record.display_name.trim();
        if !name.is_empty() {
            self.draft.set_patient_name(name);
        }
        if let Some(dob) = record.date_of_birth {
            self.draft.set_date_of_birth(Some(dob));
        }
        self.draft.apply_lookup_attributes(&record.attributes);
        self.after_edit();
    }
}
