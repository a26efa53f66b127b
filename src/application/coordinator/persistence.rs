//! Save-as-draft and submit / route-for-approval.
//!
//! The snapshot is only replaced after a verified successful response.
//! Submit clears the dirty flag before calling out and restores it if any
//! call fails, so a failed submit still leaves the user protected.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::domain::foundation::{DomainError, DraftId};
use crate::domain::navigation::{NavigationOutcome, NavigationTarget};
use crate::domain::requirement::{age_next_birthday, age_on};
use crate::domain::sections::WizardCursor;
use crate::domain::submission::{
    Draft, DraftPayload, DraftSnapshot, DerivedField, StatusAction, SubmissionStatus,
};
use crate::ports::Notification;

use super::{SubmissionDraftCoordinator, WorkflowError};

/// Final actions available from the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitAction {
    /// Send to a doctor for review.
    RouteForApproval,
    /// Submit to the agency directly.
    Submit,
}

impl SubmitAction {
    pub fn status_action(&self) -> StatusAction {
        match self {
            SubmitAction::RouteForApproval => StatusAction::RouteForApproval,
            SubmitAction::Submit => StatusAction::Submit,
        }
    }
}

/// A completed submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    pub draft_id: DraftId,
    pub status: SubmissionStatus,
    /// Acknowledgement view the guard navigated to.
    pub redirected_to: Option<NavigationTarget>,
}

impl SubmissionDraftCoordinator {
    /// Saves the current fields as a draft.
    ///
    /// Creates the submission on first save (sending the routing choice),
    /// updates it afterwards.
    ///
    /// # Errors
    ///
    /// - `ReadOnly` if saving is not allowed
    /// - `IdentityChangePending` while an identity change awaits confirmation
    /// - `Persistence` if the API call fails; the dirty flag stays set
    pub async fn save_draft(&mut self) -> Result<DraftId, WorkflowError> {
        let flags = self.current_flags();
        if !flags.can_save_draft {
            return Err(WorkflowError::ReadOnly);
        }
        if self.pending_identity.is_some() {
            return Err(WorkflowError::IdentityChangePending);
        }

        match self.persist(flags.should_include_route_flag_on_save).await {
            Ok(id) => {
                self.snapshot = Some(DraftSnapshot::capture(self.draft.fields()));
                self.protect_after_failure = false;
                self.sync_dirty();
                info!(
                    correlation_id = %self.metadata.correlation_id(),
                    draft_id = %id,
                    "draft saved"
                );
                self.ports
                    .notifier
                    .notify(Notification::success("Draft saved"));
                Ok(id)
            }
            Err(err) => {
                warn!(
                    correlation_id = %self.metadata.correlation_id(),
                    error = %err,
                    "draft save failed"
                );
                self.ports
                    .notifier
                    .notify(Notification::error("Could not save the draft. Please try again."));
                Err(WorkflowError::Persistence(err))
            }
        }
    }

    /// Persists the fields, then moves the submission to the action's status.
    ///
    /// Only when both calls succeed is the dirty flag left clear and the
    /// acknowledgement view opened.
    ///
    /// # Errors
    ///
    /// - `Forbidden` / `ReadOnly` if the actor may not take this action
    /// - `SectionIncomplete` if a required section is not complete
    /// - `DeclarationRequired` if the declaration was not accepted
    /// - `InvalidTransition` if the current status does not allow the action
    /// - `Persistence` if either call fails; the dirty flag ends set
    pub async fn submit(&mut self, action: SubmitAction) -> Result<SubmitOutcome, WorkflowError> {
        let flags = self.current_flags();
        if flags.is_read_only {
            return Err(WorkflowError::ReadOnly);
        }
        match action {
            SubmitAction::RouteForApproval if !flags.can_route_for_approval => {
                return Err(WorkflowError::Forbidden("routing for approval"));
            }
            SubmitAction::Submit if !flags.can_submit_directly => {
                return Err(WorkflowError::Forbidden("direct submission"));
            }
            _ => {}
        }
        if self.pending_identity.is_some() {
            return Err(WorkflowError::IdentityChangePending);
        }
        if let WizardCursor::Section(section) = self.enter_summary() {
            return Err(WorkflowError::SectionIncomplete(section));
        }
        if !self.declaration_accepted {
            return Err(WorkflowError::DeclarationRequired);
        }
        let status_action = action.status_action();
        status_action
            .apply(self.draft.status())
            .map_err(|source| WorkflowError::InvalidTransition {
                action: status_action,
                source,
            })?;

        self.ports.guard.set_dirty(false);
        let result = self
            .persist_and_transition(status_action, flags.should_include_route_flag_on_save)
            .await;

        let id = match result {
            Ok(id) => id,
            Err(err) => {
                self.protect_after_failure = true;
                self.ports.guard.set_dirty(true);
                warn!(
                    correlation_id = %self.metadata.correlation_id(),
                    ?action,
                    error = %err,
                    "submit failed"
                );
                self.ports
                    .notifier
                    .notify(Notification::error("Could not submit. Your changes are still here."));
                return Err(WorkflowError::Persistence(err));
            }
        };

        self.snapshot = Some(DraftSnapshot::capture(self.draft.fields()));
        self.protect_after_failure = false;
        self.sync_dirty();
        let status = self.draft.status().unwrap_or_default();
        info!(
            correlation_id = %self.metadata.correlation_id(),
            draft_id = %id,
            %status,
            "submission sent"
        );
        self.ports.notifier.notify(Notification::success(match action {
            SubmitAction::RouteForApproval => "Sent for approval",
            SubmitAction::Submit => "Submitted",
        }));

        let acknowledgement = format!(
            "{}/{}",
            self.settings.acknowledgement_path.trim_end_matches('/'),
            id
        );
        let redirected_to = match self
            .ports
            .guard
            .request_navigation(NavigationTarget::path(acknowledgement))
        {
            NavigationOutcome::Navigated(target) => Some(target),
            _ => None,
        };

        Ok(SubmitOutcome {
            draft_id: id,
            status,
            redirected_to,
        })
    }

    /// Body for create and update, including the profile's derived values.
    pub fn build_payload(&self, include_route_flag: bool) -> DraftPayload {
        let fields = self.draft.fields();
        let today = self.ports.clock.today();
        let mut derived = BTreeMap::new();

        for field in self.draft.exam_type().profile().derived {
            let value = match field {
                DerivedField::AgeAtExamination => fields
                    .date_of_birth
                    .and_then(|dob| age_on(dob, fields.examination_date.unwrap_or(today)))
                    .map(Value::from),
                DerivedField::AgeNextBirthday => fields
                    .date_of_birth
                    .and_then(|dob| age_next_birthday(dob, today))
                    .map(Value::from),
                DerivedField::CognitiveAssessmentRequired => {
                    Some(Value::Bool(self.requirement().blocks()))
                }
            };
            if let Some(value) = value {
                derived.insert(field.key().to_string(), value);
            }
        }

        DraftPayload {
            fields: fields.clone(),
            derived,
            route_for_approval: include_route_flag.then(|| self.draft.route_for_approval()),
        }
    }

    async fn persist(&mut self, include_route_flag: bool) -> Result<DraftId, DomainError> {
        match self.draft.id() {
            None => {
                let payload = self.build_payload(include_route_flag);
                let id = self.ports.submissions.create(&payload).await?;
                self.draft.assign_id(id);
                self.draft
                    .set_status(if payload.route_for_approval == Some(true) {
                        SubmissionStatus::PendingApproval
                    } else {
                        SubmissionStatus::Draft
                    });
                Ok(id)
            }
            Some(id) => {
                // Updates never carry the routing flag.
                let payload = self.build_payload(false);
                let stored = self.ports.submissions.update(&id, &payload).await?;
                self.adopt(id, stored);
                Ok(id)
            }
        }
    }

    async fn persist_and_transition(
        &mut self,
        action: StatusAction,
        include_route_flag: bool,
    ) -> Result<DraftId, DomainError> {
        let id = self.persist(include_route_flag).await?;
        if self.draft.status() != Some(action.target()) {
            let moved = self.ports.submissions.transition_status(&id, action).await?;
            self.adopt(id, moved);
        }
        Ok(id)
    }

    /// Takes the stored state as the new local draft, keeping the routing
    /// choice, which is not stored.
    fn adopt(&mut self, id: DraftId, mut stored: Draft) {
        stored.set_route_for_approval(self.draft.route_for_approval());
        if stored.id().is_none() {
            stored.assign_id(id);
        }
        self.draft = stored;
    }
}
