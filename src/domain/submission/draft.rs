//! Draft - the in-progress submission owned by one wizard session.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::{ClinicId, DraftId, UserId};
use crate::domain::sections::SectionId;

use super::profile::identity_keys;
use super::{ExamType, FormData, SubmissionStatus};

/// The comparable fields of a draft.
///
/// This is exactly what the last-saved snapshot copies and what dirty
/// checking compares, so it holds no persistence bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftFields {
    pub exam_type: ExamType,
    #[serde(default)]
    pub clinic_id: Option<ClinicId>,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub identity_value: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub examination_date: Option<NaiveDate>,
    #[serde(default)]
    pub assigned_reviewer: Option<UserId>,
    #[serde(default)]
    pub answers: FormData,
}

impl DraftFields {
    pub fn new(exam_type: ExamType, clinic_id: Option<ClinicId>) -> Self {
        Self {
            exam_type,
            clinic_id,
            patient_name: String::new(),
            identity_value: String::new(),
            date_of_birth: None,
            examination_date: None,
            assigned_reviewer: None,
            answers: FormData::new(),
        }
    }

    /// Returns true when nothing has been entered by the user.
    ///
    /// Exam type and clinic come from the route and the session, so they
    /// never count as user input.
    pub fn is_blank(&self) -> bool {
        self.patient_name.trim().is_empty()
            && self.identity_value.trim().is_empty()
            && self.date_of_birth.is_none()
            && self.examination_date.is_none()
            && self.assigned_reviewer.is_none()
            && self.answers.is_empty()
    }

    /// Reads a field the way validators see it.
    ///
    /// Identity keys in the patient-info section come from the draft's own
    /// fields; everything else comes from the answers bag.
    pub fn value_of(&self, section: SectionId, key: &str) -> Option<Value> {
        if section.is_identity_section() {
            let own = match key {
                identity_keys::PATIENT_NAME => Some(text_value(&self.patient_name)),
                identity_keys::IDENTITY_VALUE => Some(text_value(&self.identity_value)),
                identity_keys::DATE_OF_BIRTH => Some(date_value(self.date_of_birth)),
                identity_keys::EXAMINATION_DATE => Some(date_value(self.examination_date)),
                _ => None,
            };
            if let Some(value) = own {
                return value;
            }
        }
        self.answers.get(section, key).cloned()
    }

    /// Returns true if any section after patient info holds answers.
    pub fn has_downstream_data(&self) -> bool {
        self.answers.sections().any(|s| !s.is_identity_section())
    }
}

fn text_value(s: &str) -> Option<Value> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| Value::String(trimmed.to_string()))
}

fn date_value(date: Option<NaiveDate>) -> Option<Value> {
    date.map(|d| Value::String(d.format("%Y-%m-%d").to_string()))
}

/// Normalizes an identity value (NRIC, FIN or passport number).
pub fn normalize_identity_value(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

/// The Draft aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    #[serde(default)]
    id: Option<DraftId>,
    #[serde(default)]
    status: Option<SubmissionStatus>,
    fields: DraftFields,
    #[serde(default)]
    route_for_approval: bool,
}

impl Draft {
    /// Creates an unsaved draft for an exam type.
    pub fn new(exam_type: ExamType, clinic_id: Option<ClinicId>) -> Self {
        Self {
            id: None,
            status: None,
            fields: DraftFields::new(exam_type, clinic_id),
            route_for_approval: false,
        }
    }

    /// Reconstitutes a draft from persisted data.
    pub fn reconstitute(id: DraftId, status: SubmissionStatus, fields: DraftFields) -> Self {
        Self {
            id: Some(id),
            status: Some(status),
            fields,
            route_for_approval: false,
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> Option<DraftId> {
        self.id
    }

    pub fn status(&self) -> Option<SubmissionStatus> {
        self.status
    }

    pub fn fields(&self) -> &DraftFields {
        &self.fields
    }

    pub fn exam_type(&self) -> ExamType {
        self.fields.exam_type
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    pub fn route_for_approval(&self) -> bool {
        self.route_for_approval
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations (each returns true if the draft changed)
    // ───────────────────────────────────────────────────────────────

    pub fn set_patient_name(&mut self, name: impl Into<String>) -> bool {
        replace(&mut self.fields.patient_name, name.into())
    }

    pub fn set_identity_value(&mut self, raw: &str) -> bool {
        replace(&mut self.fields.identity_value, normalize_identity_value(raw))
    }

    pub fn set_date_of_birth(&mut self, date: Option<NaiveDate>) -> bool {
        replace(&mut self.fields.date_of_birth, date)
    }

    pub fn set_examination_date(&mut self, date: Option<NaiveDate>) -> bool {
        replace(&mut self.fields.examination_date, date)
    }

    pub fn set_assigned_reviewer(&mut self, reviewer: Option<UserId>) -> bool {
        replace(&mut self.fields.assigned_reviewer, reviewer)
    }

    pub fn set_answer(&mut self, section: SectionId, key: impl Into<String>, value: Value) -> bool {
        self.fields.answers.set(section, key, value)
    }

    pub fn set_route_for_approval(&mut self, route: bool) {
        self.route_for_approval = route;
    }

    /// Switches exam type, dropping answers for sections the new type lacks.
    pub fn set_exam_type(&mut self, exam_type: ExamType) -> bool {
        if self.fields.exam_type == exam_type {
            return false;
        }
        self.fields.exam_type = exam_type;
        let profile = exam_type.profile();
        self.fields.answers.retain_sections(|s| profile.contains(s));
        true
    }

    /// Clears every answer downstream of the identity section.
    pub fn clear_downstream(&mut self) -> bool {
        let had = self.fields.has_downstream_data();
        self.fields.answers.retain_sections(|s| s.is_identity_section());
        had
    }

    /// Replaces the identity-section answers written by a lookup.
    pub fn apply_lookup_attributes(&mut self, attributes: &BTreeMap<String, Value>) {
        self.fields.answers.clear_section(SectionId::PatientInfo);
        for (key, value) in attributes {
            self.fields
                .answers
                .set(SectionId::PatientInfo, key.clone(), value.clone());
        }
    }

    /// Records the identifier assigned by a successful create.
    pub fn assign_id(&mut self, id: DraftId) {
        self.id = Some(id);
    }

    pub fn set_status(&mut self, status: SubmissionStatus) {
        self.status = Some(status);
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Body sent to the create and update endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftPayload {
    #[serde(flatten)]
    pub fields: DraftFields,
    /// Values the exam profile requires to be computed on save.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub derived: BTreeMap<String, Value>,
    /// Only present on create; updates never change routing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_for_approval: Option<bool>,
}
