//! Scenario evaluation - what the workflow would decide for a given draft.
//!
//! A scenario names an actor, a date and a draft. Evaluating it runs the
//! rules engine, the requirement resolver and every section validator, and
//! replays progress with [`SectionCompletionTracker::replay`], the same call
//! that restores a resumed draft.

use std::path::Path;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::foundation::Role;
use crate::domain::requirement::{resolve_for_draft, RequirementOutcome, RequirementPolicy};
use crate::domain::sections::{
    ProfileValidator, SectionCompletionTracker, SectionId, SectionValidator, WizardCursor,
};
use crate::domain::submission::{DraftFields, SubmissionStatus};
use crate::domain::workflow::{compute_flags, WorkflowFlags, WorkflowInputs};

/// Errors reading a scenario file.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read scenario {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid scenario: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Input to [`evaluate`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub role: Option<Role>,
    /// Absent for a draft that has never been saved.
    #[serde(default)]
    pub status: Option<SubmissionStatus>,
    /// Date ages are computed against.
    pub today: NaiveDate,
    pub draft: DraftFields,
}

impl Scenario {
    pub fn from_yaml(source: &str) -> Result<Self, ScenarioError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&source)
    }
}

/// Validation result of one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionReport {
    pub section: SectionId,
    pub enabled: bool,
    pub complete: bool,
    /// `"<section>.<key>: <reason>"`, highest priority first.
    pub issues: Vec<String>,
}

/// Output of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub flags: WorkflowFlags,
    pub requirement: RequirementOutcome,
    pub sections: Vec<SectionReport>,
    pub completed: usize,
    pub total: usize,
    /// Where the wizard would open: a section, or the summary.
    pub cursor: WizardCursor,
}

/// Evaluates a scenario under the given requirement policy.
pub fn evaluate(scenario: &Scenario, policy: &RequirementPolicy) -> ScenarioReport {
    let fields = &scenario.draft;
    let profile = fields.exam_type.profile();
    let validator = ProfileValidator;
    let requirement = resolve_for_draft(fields, scenario.today, policy);

    let flags = compute_flags(WorkflowInputs {
        exam_type: fields.exam_type,
        status: scenario.status,
        has_identity: scenario.status.is_some(),
        role: scenario.role,
    });

    let mut tracker = SectionCompletionTracker::new(profile);
    tracker.replay(fields, requirement, &validator);
    let issues: Vec<_> = tracker
        .plan()
        .iter()
        .map(|section| (*section, validator.validate(*section, fields, requirement)))
        .collect();

    let patient_info_valid = issues
        .iter()
        .find(|(section, _)| section.is_identity_section())
        .map(|(_, i)| i.is_empty())
        .unwrap_or(true);

    let sections = issues
        .into_iter()
        .map(|(section, section_issues)| SectionReport {
            section,
            enabled: tracker.is_enabled(section, patient_info_valid),
            complete: tracker.is_complete(section),
            issues: section_issues
                .iter()
                .map(|issue| format!("{}: {}", issue.field, issue.error))
                .collect(),
        })
        .collect();

    let (completed, total) = tracker.progress(requirement);
    let cursor = tracker.cursor();

    ScenarioReport {
        flags,
        requirement,
        sections,
        completed,
        total,
        cursor,
    }
}
