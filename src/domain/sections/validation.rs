//! Section validators.
//!
//! A validator returns the failing fields of one section in the fixed
//! priority order the exam profile lists them, so the first entry is the
//! field focus should move to.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::foundation::ValidationError;
use crate::domain::requirement::RequirementOutcome;
use crate::domain::submission::profile::{cognitive_keys, identity_keys};
use crate::domain::submission::DraftFields;

use super::SectionId;

/// Address of one form field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FieldId {
    pub section: SectionId,
    pub key: String,
}

impl FieldId {
    pub fn new(section: SectionId, key: impl Into<String>) -> Self {
        Self {
            section,
            key: key.into(),
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.section, self.key)
    }
}

/// One failing field and why it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: FieldId,
    pub error: ValidationError,
}

/// A section that could not be marked complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{section} has {} invalid field(s)", .issues.len())]
pub struct ValidationFailure {
    pub section: SectionId,
    /// Failing fields, highest priority first.
    pub issues: Vec<FieldIssue>,
}

impl ValidationFailure {
    pub fn fields(&self) -> Vec<FieldId> {
        self.issues.iter().map(|i| i.field.clone()).collect()
    }

    pub fn first_field(&self) -> Option<&FieldId> {
        self.issues.first().map(|i| &i.field)
    }
}

/// Validates one section of a draft.
pub trait SectionValidator: Send + Sync {
    /// Returns failing fields in priority order; empty when valid.
    fn validate(
        &self,
        section: SectionId,
        fields: &DraftFields,
        requirement: RequirementOutcome,
    ) -> Vec<FieldIssue>;
}

/// Validator driven by the exam profile's required-field tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProfileValidator;

const AMT_MAX_SCORE: i32 = 10;

impl SectionValidator for ProfileValidator {
    fn validate(
        &self,
        section: SectionId,
        fields: &DraftFields,
        requirement: RequirementOutcome,
    ) -> Vec<FieldIssue> {
        let Some(spec) = fields.exam_type.profile().section(section) else {
            return Vec::new();
        };
        if spec.conditional && !requirement.blocks() {
            return Vec::new();
        }

        spec.required
            .iter()
            .filter_map(|key| {
                let error = match fields.value_of(section, key) {
                    None => Some(ValidationError::empty_field(*key)),
                    Some(value) => check_format(section, key, &value, fields),
                }?;
                Some(FieldIssue {
                    field: FieldId::new(section, *key),
                    error,
                })
            })
            .collect()
    }
}

fn check_format(
    section: SectionId,
    key: &str,
    value: &Value,
    fields: &DraftFields,
) -> Option<ValidationError> {
    match (section, key) {
        (SectionId::PatientInfo, identity_keys::IDENTITY_VALUE) => {
            let id = value.as_str().unwrap_or_default();
            let well_formed =
                (5..=20).contains(&id.len()) && id.chars().all(|c| c.is_ascii_alphanumeric());
            (!well_formed).then(|| {
                ValidationError::invalid_format(key, "expected 5-20 letters or digits")
            })
        }
        (SectionId::PatientInfo, identity_keys::EXAMINATION_DATE) => {
            match (fields.date_of_birth, fields.examination_date) {
                (Some(dob), Some(exam)) if exam < dob => Some(ValidationError::invalid_format(
                    key,
                    "examination date is before date of birth",
                )),
                _ => None,
            }
        }
        (SectionId::CognitiveAssessment, cognitive_keys::AMT_SCORE) => {
            match value.as_i64().and_then(|n| i32::try_from(n).ok()) {
                Some(score) if (0..=AMT_MAX_SCORE).contains(&score) => None,
                Some(score) => Some(ValidationError::out_of_range(key, 0, AMT_MAX_SCORE, score)),
                None => Some(ValidationError::invalid_format(key, "expected a whole number")),
            }
        }
        _ => None,
    }
}
