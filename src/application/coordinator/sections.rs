//! Wizard navigation: completing sections, advancing and the summary view.
//!
//! The conditional section's completion is reconciled against the current
//! requirement every time the user moves forward, since several fields feed
//! the same requirement and none of them alone decides when it flips.

use tracing::debug;

use crate::domain::requirement::RequirementOutcome;
use crate::domain::sections::{SectionId, WizardCursor};
use crate::domain::submission::ExamType;

use super::{SubmissionDraftCoordinator, WorkflowError};

impl SubmissionDraftCoordinator {
    /// Returns true when patient info passes its validator on its own.
    pub fn patient_info_valid(&self) -> bool {
        self.validator
            .validate(SectionId::PatientInfo, self.draft.fields(), self.requirement())
            .is_empty()
    }

    pub fn is_section_enabled(&self, section: SectionId) -> bool {
        self.tracker.is_enabled(section, self.patient_info_valid())
    }

    /// Returns (completed, total) over the sections currently required.
    pub fn progress(&self) -> (usize, usize) {
        self.tracker.progress(self.requirement())
    }

    /// Opens a section if it is enabled.
    pub fn open_section(&mut self, section: SectionId) -> bool {
        let patient_info_valid = self.patient_info_valid();
        self.tracker.open(section, patient_info_valid)
    }

    /// Validates a section and marks it complete.
    ///
    /// On failure nothing is marked, and focus moves to the first failing
    /// field that has a registered handle.
    ///
    /// # Errors
    ///
    /// - `UnknownSection` if the exam has no such section
    /// - `Validation` with the failing fields in priority order
    pub fn mark_section_complete(&mut self, section: SectionId) -> Result<(), WorkflowError> {
        if !self.tracker.plan().contains(&section) {
            return Err(WorkflowError::UnknownSection(section));
        }
        let requirement = self.requirement();
        let issues = self
            .validator
            .validate(section, self.draft.fields(), requirement);

        self.tracker
            .mark_complete(section, issues, requirement)
            .map_err(|failure| {
                let focused = self.focus.focus_first(&failure.fields());
                debug!(%section, ?focused, "section failed validation");
                WorkflowError::Validation(failure)
            })
    }

    /// Moves forward from the current view without validating it.
    pub fn advance(&mut self) -> WizardCursor {
        let requirement = self.reconcile();
        self.tracker.advance(requirement)
    }

    /// Completes the section under the cursor, then moves forward.
    pub fn complete_and_advance(&mut self) -> Result<WizardCursor, WorkflowError> {
        match self.tracker.cursor() {
            WizardCursor::Section(section) => {
                self.mark_section_complete(section)?;
                Ok(self.advance())
            }
            WizardCursor::Summary => Ok(self.enter_summary()),
        }
    }

    /// Opens a section from the summary; the next advance returns there.
    pub fn edit_from_summary(&mut self, section: SectionId) -> bool {
        self.tracker.edit_from_summary(section)
    }

    /// Shows the summary, or the first section still blocking it.
    pub fn enter_summary(&mut self) -> WizardCursor {
        let requirement = self.reconcile();
        self.tracker.enter_summary(requirement)
    }

    /// Switches the exam type of an unsaved draft.
    ///
    /// Answers for sections the new type lacks are dropped and the section
    /// plan is rebuilt. The conditional section is reconciled at once and
    /// fails closed when its requirement cannot be decided.
    ///
    /// # Errors
    ///
    /// - `ReadOnly` if the submission cannot be edited
    /// - `Forbidden` once the submission has been saved
    pub fn change_exam_type(&mut self, exam_type: ExamType) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        if self.draft.is_persisted() {
            return Err(WorkflowError::Forbidden("exam type is fixed once saved"));
        }
        if !self.draft.set_exam_type(exam_type) {
            return Ok(());
        }
        self.tracker.reset_plan(exam_type.profile());
        let requirement = self.reconcile();
        self.last_looked_up = None;
        self.after_edit();
        debug!(%exam_type, ?requirement, "exam type changed");
        Ok(())
    }

    /// Accepts the exam's declaration; only possible from the summary.
    ///
    /// Any later edit withdraws the acceptance.
    pub fn accept_declaration(&mut self) -> Result<(), WorkflowError> {
        self.ensure_editable()?;
        if let WizardCursor::Section(section) = self.enter_summary() {
            return Err(WorkflowError::SectionIncomplete(section));
        }
        self.declaration_accepted = true;
        Ok(())
    }

    /// Evicts a stale conditional completion and returns the requirement.
    pub(super) fn reconcile(&mut self) -> RequirementOutcome {
        let requirement = self.requirement();
        let conditional_valid = match self.draft.exam_type().profile().conditional_section() {
            Some(section) => self
                .validator
                .validate(section, self.draft.fields(), requirement)
                .is_empty(),
            None => true,
        };
        self.tracker.reconcile(requirement, conditional_valid);
        requirement
    }

    /// Marks every started section that validates as complete, then points
    /// the cursor at the first section still blocking the summary.
    pub(super) fn restore_progress(&mut self) {
        let requirement = self.requirement();
        let restored = self
            .tracker
            .replay(self.draft.fields(), requirement, self.validator.as_ref());
        let cursor = self.tracker.cursor();
        debug!(restored, ?cursor, "progress restored");
    }
}
