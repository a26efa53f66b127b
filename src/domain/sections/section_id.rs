//! Wizard section identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the submission wizard.
///
/// Which sections appear, and in what order, is decided per exam type by
/// the exam profile; this enum is only the shared vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    PatientInfo,
    MedicalDeclaration,
    MedicalHistory,
    GeneralMedical,
    CognitiveAssessment,
    TestResults,
    Assessment,
    Remarks,
}

impl SectionId {
    /// Returns the key used for this section in payloads and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionId::PatientInfo => "patient_info",
            SectionId::MedicalDeclaration => "medical_declaration",
            SectionId::MedicalHistory => "medical_history",
            SectionId::GeneralMedical => "general_medical",
            SectionId::CognitiveAssessment => "cognitive_assessment",
            SectionId::TestResults => "test_results",
            SectionId::Assessment => "assessment",
            SectionId::Remarks => "remarks",
        }
    }

    /// Returns true for the section holding identity and lookup data.
    ///
    /// Every other section is downstream of the identity value.
    pub fn is_identity_section(&self) -> bool {
        matches!(self, SectionId::PatientInfo)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_to_same_key_as_display() {
        for section in [
            SectionId::PatientInfo,
            SectionId::CognitiveAssessment,
            SectionId::TestResults,
        ] {
            let json = serde_json::to_string(&section).unwrap();
            assert_eq!(json, format!("\"{}\"", section));
        }
    }

    #[test]
    fn only_patient_info_is_identity_section() {
        assert!(SectionId::PatientInfo.is_identity_section());
        assert!(!SectionId::Remarks.is_identity_section());
    }
}
