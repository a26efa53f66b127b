//! Cognitive assessment requirement resolver.
//!
//! Decides whether the abbreviated mental test section must be filled in.
//! The result is tri-state; `Indeterminate` means the answers needed to
//! decide are missing and gates exactly like `Required`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::Answer;
use crate::domain::sections::SectionId;
use crate::domain::submission::profile::cognitive_keys;
use crate::domain::submission::DraftFields;

use super::age::{age_next_birthday, age_on};

/// Thresholds and licence classes that trigger the assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementPolicy {
    /// Inclusive lower bound of the primary age bracket.
    pub primary_min_age: u32,
    /// Inclusive upper bound of the primary age bracket.
    pub primary_max_age: u32,
    /// From this age on, either yes/no attribute alone triggers the test.
    pub secondary_min_age: u32,
    /// Licence classes that trigger the test inside the primary bracket.
    pub licence_classes: Vec<String>,
}

impl Default for RequirementPolicy {
    fn default() -> Self {
        Self {
            primary_min_age: 70,
            primary_max_age: 74,
            secondary_min_age: 65,
            licence_classes: vec!["4".into(), "4A".into(), "5".into()],
        }
    }
}

impl RequirementPolicy {
    pub fn in_primary_bracket(&self, age: u32) -> bool {
        (self.primary_min_age..=self.primary_max_age).contains(&age)
    }

    pub fn at_or_above_secondary(&self, age: u32) -> bool {
        age >= self.secondary_min_age
    }

    pub fn lists_licence_class(&self, class: &str) -> bool {
        let class = class.trim();
        self.licence_classes
            .iter()
            .any(|listed| listed.eq_ignore_ascii_case(class))
    }
}

/// Tri-state outcome of the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementOutcome {
    Required,
    NotRequired,
    Indeterminate,
}

impl RequirementOutcome {
    /// Returns true if the section must be completed before moving on.
    pub fn blocks(&self) -> bool {
        !matches!(self, RequirementOutcome::NotRequired)
    }
}

/// Inputs the resolver reads, already extracted from the draft.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequirementInputs {
    pub impairment_suspected: bool,
    pub age_next_birthday: Option<u32>,
    pub age_at_examination: Option<u32>,
    /// Whether the licence class is in the triggering set; `None` if no
    /// class has been entered.
    pub licence_class_listed: Option<bool>,
    pub holds_vocational_licence: Answer,
    pub commercial_driving: Answer,
}

impl RequirementInputs {
    /// Extracts inputs from the draft's fields.
    ///
    /// Age at next birthday is taken relative to `today`; age at
    /// examination relative to the examination date (or `today` when no
    /// date has been entered yet).
    pub fn from_fields(fields: &DraftFields, today: NaiveDate, policy: &RequirementPolicy) -> Self {
        let answers = &fields.answers;
        let history = |key: &str| Answer::from_value(answers.get(SectionId::MedicalHistory, key));

        let licence_class_listed = answers
            .get(SectionId::MedicalHistory, cognitive_keys::LICENCE_CLASS)
            .and_then(|v| v.as_str())
            .filter(|s| !s.trim().is_empty())
            .map(|class| policy.lists_licence_class(class));

        let exam_date = fields.examination_date.unwrap_or(today);

        Self {
            impairment_suspected: Answer::from_value(
                answers.get(SectionId::GeneralMedical, cognitive_keys::IMPAIRMENT_SUSPECTED),
            )
            .is_yes(),
            age_next_birthday: fields
                .date_of_birth
                .and_then(|dob| age_next_birthday(dob, today)),
            age_at_examination: fields.date_of_birth.and_then(|dob| age_on(dob, exam_date)),
            licence_class_listed,
            holds_vocational_licence: history(cognitive_keys::HOLDS_VOCATIONAL_LICENCE),
            commercial_driving: history(cognitive_keys::COMMERCIAL_DRIVING),
        }
    }
}

/// Resolves whether the cognitive assessment is required.
pub fn resolve(inputs: &RequirementInputs, policy: &RequirementPolicy) -> RequirementOutcome {
    if inputs.impairment_suspected {
        return RequirementOutcome::Required;
    }

    let ages: Vec<u32> = [inputs.age_next_birthday, inputs.age_at_examination]
        .into_iter()
        .flatten()
        .collect();
    if ages.is_empty() {
        return RequirementOutcome::Indeterminate;
    }

    // Either age calculation landing in range is enough.
    let in_primary = ages.iter().any(|a| policy.in_primary_bracket(*a));
    let above_secondary = ages.iter().any(|a| policy.at_or_above_secondary(*a));
    if !in_primary && !above_secondary {
        return RequirementOutcome::NotRequired;
    }

    let mut undecided = false;

    if in_primary {
        match inputs.licence_class_listed {
            Some(true) => return RequirementOutcome::Required,
            Some(false) => {}
            None => undecided = true,
        }
    }

    if above_secondary {
        let attributes = [inputs.holds_vocational_licence, inputs.commercial_driving];
        if attributes.iter().any(Answer::is_yes) {
            return RequirementOutcome::Required;
        }
        if attributes.iter().any(|a| !a.is_known()) {
            undecided = true;
        }
    }

    if undecided {
        RequirementOutcome::Indeterminate
    } else {
        RequirementOutcome::NotRequired
    }
}
