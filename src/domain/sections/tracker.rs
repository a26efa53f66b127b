//! SectionCompletionTracker - wizard progress for one session.
//!
//! Tracks which sections have passed their validator, where the cursor is,
//! and whether the user came into a section from the summary view.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::debug;

use crate::domain::requirement::RequirementOutcome;
use crate::domain::submission::{DraftFields, ExamProfile};

use super::{FieldIssue, SectionId, SectionValidator, ValidationFailure};

/// Where the wizard currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "view", content = "section")]
pub enum WizardCursor {
    Section(SectionId),
    Summary,
}

/// Completion state of the wizard.
#[derive(Debug, Clone)]
pub struct SectionCompletionTracker {
    plan: Vec<SectionId>,
    conditional: Option<SectionId>,
    completed: BTreeSet<SectionId>,
    /// Conditional sections marked complete while they were not required.
    completed_as_not_required: BTreeSet<SectionId>,
    cursor: WizardCursor,
    editing_from_summary: bool,
}

impl SectionCompletionTracker {
    pub fn new(profile: &ExamProfile) -> Self {
        let plan = profile.section_ids();
        let cursor = plan
            .first()
            .map(|s| WizardCursor::Section(*s))
            .unwrap_or(WizardCursor::Summary);
        Self {
            plan,
            conditional: profile.conditional_section(),
            completed: BTreeSet::new(),
            completed_as_not_required: BTreeSet::new(),
            cursor,
            editing_from_summary: false,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Queries
    // ───────────────────────────────────────────────────────────────

    pub fn plan(&self) -> &[SectionId] {
        &self.plan
    }

    pub fn cursor(&self) -> WizardCursor {
        self.cursor
    }

    pub fn is_complete(&self, section: SectionId) -> bool {
        self.completed.contains(&section)
    }

    pub fn completed(&self) -> &BTreeSet<SectionId> {
        &self.completed
    }

    pub fn is_editing_from_summary(&self) -> bool {
        self.editing_from_summary
    }

    /// Returns (completed, total) counting only sections currently required.
    pub fn progress(&self, requirement: RequirementOutcome) -> (usize, usize) {
        let counted: Vec<_> = self
            .plan
            .iter()
            .filter(|s| self.counts(**s, requirement))
            .collect();
        let done = counted.iter().filter(|s| self.completed.contains(**s)).count();
        (done, counted.len())
    }

    /// Returns true if the section can be opened.
    ///
    /// The first section is always open. A later one opens once its
    /// prerequisite is complete, or once patient info is valid on its own.
    pub fn is_enabled(&self, section: SectionId, patient_info_valid: bool) -> bool {
        let Some(index) = self.position(section) else {
            return false;
        };
        if index == 0 || patient_info_valid || self.completed.contains(&section) {
            return true;
        }
        self.completed.contains(&self.plan[index - 1])
    }

    /// First section that still has to be completed before the summary.
    pub fn first_blocking_section(&self, requirement: RequirementOutcome) -> Option<SectionId> {
        self.plan
            .iter()
            .copied()
            .find(|s| self.counts(*s, requirement) && !self.completed.contains(s))
    }

    // ───────────────────────────────────────────────────────────────
    // Transitions
    // ───────────────────────────────────────────────────────────────

    /// Moves the cursor to a section if it is enabled.
    pub fn open(&mut self, section: SectionId, patient_info_valid: bool) -> bool {
        if !self.is_enabled(section, patient_info_valid) {
            return false;
        }
        self.cursor = WizardCursor::Section(section);
        true
    }

    /// Opens a section from the summary view; the next advance returns there.
    pub fn edit_from_summary(&mut self, section: SectionId) -> bool {
        if self.position(section).is_none() {
            return false;
        }
        self.cursor = WizardCursor::Section(section);
        self.editing_from_summary = true;
        true
    }

    /// Marks a section complete if its validator reported no issues.
    ///
    /// A failed validation leaves the completion set untouched.
    pub fn mark_complete(
        &mut self,
        section: SectionId,
        issues: Vec<FieldIssue>,
        requirement: RequirementOutcome,
    ) -> Result<(), ValidationFailure> {
        if !issues.is_empty() {
            return Err(ValidationFailure { section, issues });
        }
        self.completed.insert(section);
        if Some(section) == self.conditional && !requirement.blocks() {
            self.completed_as_not_required.insert(section);
        } else {
            self.completed_as_not_required.remove(&section);
        }
        Ok(())
    }

    /// Removes a section's completion mark.
    pub fn evict(&mut self, section: SectionId) -> bool {
        self.completed_as_not_required.remove(&section);
        self.completed.remove(&section)
    }

    /// Evicts the conditional section when its completion no longer holds.
    ///
    /// `conditional_valid` is the conditional section's validator result
    /// under the current requirement. Returns true if an entry was evicted.
    pub fn reconcile(&mut self, requirement: RequirementOutcome, conditional_valid: bool) -> bool {
        let Some(section) = self.conditional else {
            return false;
        };
        if !requirement.blocks() || !self.completed.contains(&section) {
            return false;
        }
        if self.completed_as_not_required.contains(&section) || !conditional_valid {
            debug!(%section, ?requirement, "evicting stale conditional section");
            return self.evict(section);
        }
        false
    }

    /// Moves forward from the current section.
    ///
    /// When the section was opened from the summary, control returns to the
    /// summary (clearing that flag) instead of moving linearly. Entering the
    /// summary redirects to the first blocking section, if any.
    pub fn advance(&mut self, requirement: RequirementOutcome) -> WizardCursor {
        let WizardCursor::Section(current) = self.cursor else {
            return self.enter_summary(requirement);
        };

        if self.editing_from_summary {
            self.editing_from_summary = false;
            return self.enter_summary(requirement);
        }

        let next = self
            .position(current)
            .and_then(|index| {
                self.plan[index + 1..]
                    .iter()
                    .copied()
                    .find(|s| self.counts(*s, requirement))
            });

        match next {
            Some(section) => {
                self.cursor = WizardCursor::Section(section);
                self.cursor
            }
            None => self.enter_summary(requirement),
        }
    }

    /// Tries to show the summary, redirecting to the first blocking section.
    pub fn enter_summary(&mut self, requirement: RequirementOutcome) -> WizardCursor {
        self.cursor = match self.first_blocking_section(requirement) {
            Some(section) => {
                debug!(%section, "summary blocked by incomplete section");
                WizardCursor::Section(section)
            }
            None => WizardCursor::Summary,
        };
        self.cursor
    }

    /// Rebuilds completion from saved answers, then enters the summary.
    ///
    /// Patient info and every section that holds answers are validated;
    /// the valid ones are marked complete. Sections nobody has opened stay
    /// incomplete even when they have no required fields. Returns how many
    /// sections were marked.
    pub fn replay(
        &mut self,
        fields: &DraftFields,
        requirement: RequirementOutcome,
        validator: &dyn SectionValidator,
    ) -> usize {
        let mut restored = 0;
        for section in self.plan.clone() {
            let started =
                section.is_identity_section() || fields.answers.has_section_data(section);
            if !started {
                continue;
            }
            let issues = validator.validate(section, fields, requirement);
            if self.mark_complete(section, issues, requirement).is_ok() {
                restored += 1;
            }
        }
        self.enter_summary(requirement);
        restored
    }

    /// Re-plans for a different exam profile, keeping completions that
    /// still apply.
    pub fn reset_plan(&mut self, profile: &ExamProfile) {
        self.plan = profile.section_ids();
        self.conditional = profile.conditional_section();
        let plan = &self.plan;
        self.completed.retain(|s| plan.contains(s));
        self.completed_as_not_required.retain(|s| plan.contains(s));
        self.editing_from_summary = false;
        if let WizardCursor::Section(section) = self.cursor {
            if !self.plan.contains(&section) {
                self.cursor = self
                    .plan
                    .first()
                    .map(|s| WizardCursor::Section(*s))
                    .unwrap_or(WizardCursor::Summary);
            }
        }
    }

    /// Drops every completion mark except the identity section's.
    pub fn clear_downstream(&mut self) {
        self.completed.retain(|s| s.is_identity_section());
        self.completed_as_not_required.clear();
    }

    fn position(&self, section: SectionId) -> Option<usize> {
        self.plan.iter().position(|s| *s == section)
    }

    fn counts(&self, section: SectionId, requirement: RequirementOutcome) -> bool {
        Some(section) != self.conditional || requirement.blocks()
    }
}
