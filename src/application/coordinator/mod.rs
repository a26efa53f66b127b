//! SubmissionDraftCoordinator - owns one wizard session's draft.
//!
//! The coordinator is the only writer of the draft, the last-saved snapshot
//! and the section tracker. After every mutation it recomputes dirtiness and
//! pushes it into the shared [`NavigationGuardStore`].
//!
//! Operations are split by concern:
//! - field edits and queries (this module)
//! - identity change and lookup (`identity`)
//! - wizard navigation and completion (`sections`)
//! - save and submit (`persistence`)

mod identity;
mod persistence;
mod sections;

#[cfg(test)]
mod fixtures;

pub use identity::{IdentityChange, LookupOutcome};
pub use persistence::{SubmitAction, SubmitOutcome};

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::Value;
use tracing::debug;

use crate::domain::foundation::{ClinicId, CommandMetadata, DraftId, UserId};
use crate::domain::requirement::{resolve_for_draft, RequirementOutcome, RequirementPolicy};
use crate::domain::sections::{
    FieldId, FieldRegistry, FocusHandle, ProfileValidator, SectionCompletionTracker, SectionId,
    SectionValidator, WizardCursor,
};
use crate::domain::submission::profile::identity_keys;
use crate::domain::submission::{is_dirty, Draft, DraftSnapshot, ExamType};
use crate::domain::workflow::{compute_flags, FlagsMemo, WorkflowFlags, WorkflowInputs};
use crate::ports::{Clock, IdentityLookup, Notifier, SubmissionApi};

use super::{NavigationGuardStore, WorkflowError};

/// Default path prefix of the acknowledgement view shown after submit.
pub const DEFAULT_ACKNOWLEDGEMENT_PATH: &str = "/submissions/acknowledgement";

/// External collaborators a coordinator talks to.
#[derive(Clone)]
pub struct WorkflowPorts {
    pub submissions: Arc<dyn SubmissionApi>,
    pub identity: Arc<dyn IdentityLookup>,
    pub notifier: Arc<dyn Notifier>,
    pub clock: Arc<dyn Clock>,
    pub guard: Arc<NavigationGuardStore>,
}

/// Tunables for a coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorSettings {
    pub policy: RequirementPolicy,
    /// The submission id is appended to this path on redirect.
    pub acknowledgement_path: String,
}

impl Default for CoordinatorSettings {
    fn default() -> Self {
        Self {
            policy: RequirementPolicy::default(),
            acknowledgement_path: DEFAULT_ACKNOWLEDGEMENT_PATH.to_string(),
        }
    }
}

/// Orchestrates one wizard session.
pub struct SubmissionDraftCoordinator {
    ports: WorkflowPorts,
    settings: CoordinatorSettings,
    validator: Arc<dyn SectionValidator>,
    metadata: CommandMetadata,
    draft: Draft,
    snapshot: Option<DraftSnapshot>,
    /// Set when a submit failed after the flag was speculatively cleared.
    protect_after_failure: bool,
    tracker: SectionCompletionTracker,
    flags_memo: FlagsMemo,
    focus: FieldRegistry,
    pending_identity: Option<String>,
    last_looked_up: Option<String>,
    declaration_accepted: bool,
}

impl SubmissionDraftCoordinator {
    /// Opens a session on a new, unsaved draft and mounts the guard.
    pub fn new(
        ports: WorkflowPorts,
        settings: CoordinatorSettings,
        metadata: CommandMetadata,
        exam_type: ExamType,
        clinic_id: Option<ClinicId>,
    ) -> Self {
        let coordinator = Self::with_draft(
            ports,
            settings,
            metadata,
            Draft::new(exam_type, clinic_id),
            None,
        );
        coordinator.ports.guard.mount();
        coordinator.sync_dirty();
        coordinator
    }

    /// Resumes an existing submission.
    ///
    /// The loaded state becomes the snapshot, and every started section
    /// that still validates is marked complete.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the submission does not exist
    /// - `Persistence` if the fetch fails
    pub async fn load(
        ports: WorkflowPorts,
        settings: CoordinatorSettings,
        metadata: CommandMetadata,
        id: DraftId,
    ) -> Result<Self, WorkflowError> {
        let draft = ports
            .submissions
            .get(&id)
            .await
            .map_err(WorkflowError::Persistence)?
            .ok_or(WorkflowError::NotFound(id))?;

        let snapshot = DraftSnapshot::capture(draft.fields());
        let mut coordinator = Self::with_draft(ports, settings, metadata, draft, Some(snapshot));
        let identity = coordinator.draft.fields().identity_value.clone();
        if !identity.is_empty() {
            coordinator.last_looked_up = Some(identity);
        }
        coordinator.restore_progress();
        coordinator.ports.guard.mount();
        coordinator.sync_dirty();
        Ok(coordinator)
    }

    fn with_draft(
        ports: WorkflowPorts,
        settings: CoordinatorSettings,
        metadata: CommandMetadata,
        draft: Draft,
        snapshot: Option<DraftSnapshot>,
    ) -> Self {
        // Pin the correlation id so every log line of the session shares it.
        let correlation_id = metadata.correlation_id();
        let metadata = metadata.with_correlation_id(correlation_id);
        let tracker = SectionCompletionTracker::new(draft.exam_type().profile());
        Self {
            ports,
            settings,
            validator: Arc::new(ProfileValidator),
            metadata,
            draft,
            snapshot,
            protect_after_failure: false,
            tracker,
            flags_memo: FlagsMemo::new(),
            focus: FieldRegistry::new(),
            pending_identity: None,
            last_looked_up: None,
            declaration_accepted: false,
        }
    }

    /// Ends the session; a stale dirty flag must not block later navigation.
    pub fn unmount(self) {
        debug!(correlation_id = %self.metadata.correlation_id(), "wizard session closed");
        self.ports.guard.unmount();
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn snapshot(&self) -> Option<&DraftSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn tracker(&self) -> &SectionCompletionTracker {
        &self.tracker
    }

    pub fn metadata(&self) -> &CommandMetadata {
        &self.metadata
    }

    pub fn cursor(&self) -> WizardCursor {
        self.tracker.cursor()
    }

    /// New identity value waiting for the user's confirmation.
    pub fn pending_identity(&self) -> Option<&str> {
        self.pending_identity.as_deref()
    }

    pub fn declaration_accepted(&self) -> bool {
        self.declaration_accepted
    }

    pub fn declaration_text(&self) -> &'static str {
        self.draft.exam_type().profile().declaration
    }

    /// Returns true if the draft differs from what was last saved.
    pub fn is_dirty(&self) -> bool {
        self.protect_after_failure || is_dirty(self.draft.fields(), self.snapshot.as_ref())
    }

    /// Requirement of the exam's conditional section, as of today.
    pub fn requirement(&self) -> RequirementOutcome {
        resolve_for_draft(
            self.draft.fields(),
            self.ports.clock.today(),
            &self.settings.policy,
        )
    }

    /// Memoized permission flags for the current draft and actor.
    pub fn flags(&mut self) -> Arc<WorkflowFlags> {
        let inputs = self.flag_inputs();
        self.flags_memo.flags(inputs)
    }

    fn flag_inputs(&self) -> WorkflowInputs {
        WorkflowInputs {
            exam_type: self.draft.exam_type(),
            status: self.draft.status(),
            has_identity: self.draft.is_persisted(),
            role: self.metadata.role,
        }
    }

    fn current_flags(&self) -> WorkflowFlags {
        compute_flags(self.flag_inputs())
    }

    // ───────────────────────────────────────────────────────────────
    // Focus registry
    // ───────────────────────────────────────────────────────────────

    pub fn register_field(&mut self, field: FieldId, handle: Arc<dyn FocusHandle>) {
        self.focus.register(field, handle);
    }

    pub fn unregister_field(&mut self, field: &FieldId) {
        self.focus.unregister(field);
    }

    // ───────────────────────────────────────────────────────────────
    // Field edits
    // ───────────────────────────────────────────────────────────────

    pub fn update_patient_name(&mut self, name: &str) -> Result<bool, WorkflowError> {
        let name = name.trim().to_string();
        self.edit(|draft| draft.set_patient_name(name))
    }

    pub fn update_date_of_birth(&mut self, date: Option<NaiveDate>) -> Result<bool, WorkflowError> {
        self.edit(|draft| draft.set_date_of_birth(date))
    }

    pub fn update_examination_date(
        &mut self,
        date: Option<NaiveDate>,
    ) -> Result<bool, WorkflowError> {
        self.edit(|draft| draft.set_examination_date(date))
    }

    pub fn set_assigned_reviewer(&mut self, reviewer: Option<UserId>) -> Result<bool, WorkflowError> {
        self.edit(|draft| draft.set_assigned_reviewer(reviewer))
    }

    /// Sets an exam-specific answer; blank values remove the key.
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if the exam has no such section
    /// - `Forbidden` for identity keys, which have dedicated setters
    pub fn set_answer(
        &mut self,
        section: SectionId,
        key: &str,
        value: Value,
    ) -> Result<bool, WorkflowError> {
        if !self.draft.exam_type().profile().contains(section) {
            return Err(WorkflowError::UnknownSection(section));
        }
        if section.is_identity_section() && is_identity_key(key) {
            return Err(WorkflowError::Forbidden("identity fields have dedicated setters"));
        }
        let key = key.to_string();
        self.edit(|draft| draft.set_answer(section, key, value))
    }

    /// Records whether the first save should route for approval.
    ///
    /// This is a routing choice, not form data, so it never makes the draft
    /// dirty.
    pub fn set_route_for_approval(&mut self, route: bool) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        self.draft.set_route_for_approval(route);
        Ok(())
    }

    fn edit(&mut self, apply: impl FnOnce(&mut Draft) -> bool) -> Result<bool, WorkflowError> {
        self.ensure_editable()?;
        let changed = apply(&mut self.draft);
        if changed {
            self.after_edit();
        }
        Ok(changed)
    }

    fn after_edit(&mut self) {
        self.declaration_accepted = false;
        self.sync_dirty();
    }

    fn ensure_editable(&self) -> Result<(), WorkflowError> {
        if self.current_flags().is_read_only {
            return Err(WorkflowError::ReadOnly);
        }
        Ok(())
    }

    fn sync_dirty(&self) {
        self.ports.guard.set_dirty(self.is_dirty());
    }
}

fn is_identity_key(key: &str) -> bool {
    matches!(
        key,
        identity_keys::PATIENT_NAME
            | identity_keys::IDENTITY_VALUE
            | identity_keys::DATE_OF_BIRTH
            | identity_keys::EXAMINATION_DATE
    )
}

impl std::fmt::Debug for SubmissionDraftCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionDraftCoordinator")
            .field("draft", &self.draft)
            .field("cursor", &self.tracker.cursor())
            .field("dirty", &self.is_dirty())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::Harness;
    use super::*;
    use crate::domain::foundation::Role;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn new_session_is_clean_and_mounted() {
        let harness = Harness::new(Role::Nurse);
        let coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        assert!(!coordinator.is_dirty());
        assert!(harness.guard.is_mounted());
        assert!(!harness.guard.is_dirty());
    }

    #[test]
    fn first_edit_marks_dirty_and_arms_guard() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        coordinator.update_patient_name("Tan Ah Kow").unwrap();

        assert!(coordinator.is_dirty());
        assert!(harness.guard.is_dirty());
    }

    #[test]
    fn clearing_the_only_edit_is_clean_again() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        coordinator
            .set_answer(SectionId::GeneralMedical, "hearing", json!("normal"))
            .unwrap();
        coordinator
            .set_answer(SectionId::GeneralMedical, "hearing", json!(""))
            .unwrap();

        assert!(!coordinator.is_dirty());
        assert!(!harness.guard.is_dirty());
    }

    #[test]
    fn answers_for_absent_sections_are_rejected() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        let err = coordinator
            .set_answer(SectionId::Remarks, "note", json!("x"))
            .unwrap_err();

        assert!(matches!(err, WorkflowError::UnknownSection(SectionId::Remarks)));
    }

    #[test]
    fn identity_keys_cannot_be_set_as_answers() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        let err = coordinator
            .set_answer(SectionId::PatientInfo, "identity_value", json!("S1234567D"))
            .unwrap_err();

        assert!(matches!(err, WorkflowError::Forbidden(_)));
    }

    #[test]
    fn route_choice_does_not_dirty() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::SixMonthlyMdw);

        coordinator.set_route_for_approval(true).unwrap();

        assert!(!coordinator.is_dirty());
        assert!(coordinator.draft().route_for_approval());
    }

    #[test]
    fn unknown_role_is_read_only() {
        let harness = Harness::without_role();
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        let err = coordinator.update_patient_name("Tan").unwrap_err();

        assert!(matches!(err, WorkflowError::ReadOnly));
        assert!(coordinator.flags().is_read_only);
    }

    #[test]
    fn flags_are_reused_while_inputs_are_unchanged() {
        let harness = Harness::new(Role::Doctor);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

        let first = coordinator.flags();
        coordinator.update_patient_name("Tan").unwrap();
        let second = coordinator.flags();

        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn unmount_releases_the_guard() {
        let harness = Harness::new(Role::Nurse);
        let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);
        coordinator.update_patient_name("Tan").unwrap();

        coordinator.unmount();

        assert!(!harness.guard.is_dirty());
        assert!(!harness.guard.is_mounted());
    }

    #[tokio::test]
    async fn load_resumes_clean_with_progress() {
        let harness = Harness::new(Role::Doctor);
        let id = harness.seed(harness.complete_patient_info(ExamType::DrivingLicence));

        let coordinator = harness.load(id).await.unwrap();

        assert!(!coordinator.is_dirty());
        assert!(coordinator.tracker().is_complete(SectionId::PatientInfo));
        assert_eq!(
            coordinator.cursor(),
            WizardCursor::Section(SectionId::MedicalDeclaration)
        );
    }

    #[tokio::test]
    async fn load_of_missing_submission_is_not_found() {
        let harness = Harness::new(Role::Doctor);

        let err = harness.load(DraftId::new()).await.unwrap_err();

        assert!(matches!(err, WorkflowError::NotFound(_)));
    }

    proptest! {
        #[test]
        fn guard_mirrors_coordinator_dirtiness(
            edits in proptest::collection::vec(("[a-c]", prop_oneof![Just(String::new()), "[a-z]{1,3}"]), 1..12)
        ) {
            let harness = Harness::new(Role::Nurse);
            let mut coordinator = harness.new_coordinator(ExamType::DrivingLicence);

            for (key, value) in edits {
                coordinator
                    .set_answer(SectionId::Assessment, &key, json!(value))
                    .unwrap();
                prop_assert_eq!(coordinator.is_dirty(), harness.guard.is_dirty());
            }
        }
    }
}
