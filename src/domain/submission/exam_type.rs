//! Exam types and the agency categories they belong to.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::profile::{profile_for, ExamProfile};

/// Government agency an exam is filed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamCategory {
    /// Ministry of Manpower (foreign worker exams).
    Mom,
    /// Traffic Police / Land Transport Authority (licence exams).
    TrafficPolice,
    /// Immigration & Checkpoints Authority.
    Ica,
}

impl ExamCategory {
    /// Returns true if the identity value is frozen while a reviewer holds
    /// the submission for approval.
    pub fn locks_identity_during_review(&self) -> bool {
        matches!(self, ExamCategory::Mom)
    }

    /// Returns true if the identity value can be looked up to prefill the
    /// patient's details.
    pub fn supports_identity_lookup(&self) -> bool {
        matches!(self, ExamCategory::Mom)
    }
}

impl fmt::Display for ExamCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExamCategory::Mom => "MOM",
            ExamCategory::TrafficPolice => "TP/LTA",
            ExamCategory::Ica => "ICA",
        };
        write!(f, "{}", s)
    }
}

/// The kind of medical examination being filed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExamType {
    SixMonthlyMdw,
    SixMonthlyFmw,
    WorkPermit,
    DrivingLicence,
    DrivingVocational,
    VocationalXray,
    PermanentResidency,
    StudentPass,
}

impl ExamType {
    pub const ALL: [ExamType; 8] = [
        ExamType::SixMonthlyMdw,
        ExamType::SixMonthlyFmw,
        ExamType::WorkPermit,
        ExamType::DrivingLicence,
        ExamType::DrivingVocational,
        ExamType::VocationalXray,
        ExamType::PermanentResidency,
        ExamType::StudentPass,
    ];

    pub fn category(&self) -> ExamCategory {
        match self {
            ExamType::SixMonthlyMdw | ExamType::SixMonthlyFmw | ExamType::WorkPermit => {
                ExamCategory::Mom
            }
            ExamType::DrivingLicence | ExamType::DrivingVocational | ExamType::VocationalXray => {
                ExamCategory::TrafficPolice
            }
            ExamType::PermanentResidency | ExamType::StudentPass => ExamCategory::Ica,
        }
    }

    /// Returns the capability tables registered for this exam type.
    pub fn profile(&self) -> &'static ExamProfile {
        profile_for(*self)
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.profile().title)
    }
}
