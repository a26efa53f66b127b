//! Exam profiles - per-exam-type capability tables.
//!
//! Everything that varies by exam type lives here: the wizard section plan,
//! each section's required fields in focus-priority order, which section is
//! conditional, the declaration text, and the derived fields sent on save.
//! Adding an exam type means adding one `static` profile and one arm in
//! [`profile_for`].

use serde::Serialize;

use crate::domain::sections::SectionId;

use super::ExamType;

/// Field keys stored on the draft itself rather than in the answers bag.
pub mod identity_keys {
    pub const PATIENT_NAME: &str = "patient_name";
    pub const IDENTITY_VALUE: &str = "identity_value";
    pub const DATE_OF_BIRTH: &str = "date_of_birth";
    pub const EXAMINATION_DATE: &str = "examination_date";
}

/// Answer keys read by the cognitive assessment requirement.
pub mod cognitive_keys {
    pub const LICENCE_CLASS: &str = "licence_class";
    pub const HOLDS_VOCATIONAL_LICENCE: &str = "holds_vocational_licence";
    pub const COMMERCIAL_DRIVING: &str = "commercial_driving";
    pub const IMPAIRMENT_SUSPECTED: &str = "cognitive_impairment_suspected";
    pub const AMT_SCORE: &str = "amt_score";
}

/// One wizard section as configured for an exam type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpec {
    pub id: SectionId,
    /// Required field keys, in the order focus should visit them.
    pub required: &'static [&'static str],
    /// Conditional sections are only required when the requirement
    /// resolver says so.
    pub conditional: bool,
}

/// Values computed from the draft and sent alongside the answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DerivedField {
    AgeAtExamination,
    AgeNextBirthday,
    CognitiveAssessmentRequired,
}

impl DerivedField {
    pub fn key(&self) -> &'static str {
        match self {
            DerivedField::AgeAtExamination => "age_at_examination",
            DerivedField::AgeNextBirthday => "age_next_birthday",
            DerivedField::CognitiveAssessmentRequired => "cognitive_assessment_required",
        }
    }
}

/// Capability table for one exam type.
#[derive(Debug)]
pub struct ExamProfile {
    pub exam_type: ExamType,
    pub title: &'static str,
    pub sections: &'static [SectionSpec],
    pub declaration: &'static str,
    pub derived: &'static [DerivedField],
}

impl ExamProfile {
    /// Returns section ids in wizard order.
    pub fn section_ids(&self) -> Vec<SectionId> {
        self.sections.iter().map(|s| s.id).collect()
    }

    pub fn section(&self, id: SectionId) -> Option<&SectionSpec> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn contains(&self, id: SectionId) -> bool {
        self.section(id).is_some()
    }

    /// Returns the section whose necessity is decided at runtime, if any.
    pub fn conditional_section(&self) -> Option<SectionId> {
        self.sections.iter().find(|s| s.conditional).map(|s| s.id)
    }

    pub fn requires_date_of_birth(&self) -> bool {
        self.section(SectionId::PatientInfo)
            .map(|s| s.required.contains(&identity_keys::DATE_OF_BIRTH))
            .unwrap_or(false)
    }
}

use cognitive_keys as ck;
use identity_keys as ik;

const PATIENT_INFO_BASIC: SectionSpec = SectionSpec {
    id: SectionId::PatientInfo,
    required: &[ik::PATIENT_NAME, ik::IDENTITY_VALUE, ik::EXAMINATION_DATE],
    conditional: false,
};

const PATIENT_INFO_WITH_DOB: SectionSpec = SectionSpec {
    id: SectionId::PatientInfo,
    required: &[
        ik::PATIENT_NAME,
        ik::IDENTITY_VALUE,
        ik::DATE_OF_BIRTH,
        ik::EXAMINATION_DATE,
    ],
    conditional: false,
};

const REMARKS: SectionSpec = SectionSpec {
    id: SectionId::Remarks,
    required: &[],
    conditional: false,
};

const DRIVING_CORE: [SectionSpec; 5] = [
    PATIENT_INFO_WITH_DOB,
    SectionSpec {
        id: SectionId::MedicalDeclaration,
        required: &["patient_declaration"],
        conditional: false,
    },
    SectionSpec {
        id: SectionId::MedicalHistory,
        required: &[ck::LICENCE_CLASS],
        conditional: false,
    },
    SectionSpec {
        id: SectionId::GeneralMedical,
        required: &["blood_pressure", "visual_acuity", "hearing"],
        conditional: false,
    },
    SectionSpec {
        id: SectionId::CognitiveAssessment,
        required: &[ck::AMT_SCORE],
        conditional: true,
    },
];

const DRIVING_DERIVED: &[DerivedField] = &[
    DerivedField::AgeAtExamination,
    DerivedField::AgeNextBirthday,
    DerivedField::CognitiveAssessmentRequired,
];

const MOM_DECLARATION: &str = "I certify that I have examined the worker named above and that \
the test results reported here were obtained from specimens taken from that worker.";

const TP_DECLARATION: &str = "I certify that I have examined the person named above and that \
the medical findings recorded here are true to the best of my knowledge.";

const ICA_DECLARATION: &str = "I certify that the applicant named above was examined by me \
and that the results reported here belong to the applicant.";

static SIX_MONTHLY_MDW: ExamProfile = ExamProfile {
    exam_type: ExamType::SixMonthlyMdw,
    title: "Six-monthly medical exam (MDW)",
    sections: &[
        PATIENT_INFO_BASIC,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["pregnancy", "syphilis", "hiv", "chest_xray"],
            conditional: false,
        },
        REMARKS,
    ],
    declaration: MOM_DECLARATION,
    derived: &[],
};

static SIX_MONTHLY_FMW: ExamProfile = ExamProfile {
    exam_type: ExamType::SixMonthlyFmw,
    title: "Six-monthly medical exam (FMW)",
    sections: &[
        PATIENT_INFO_BASIC,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["pregnancy", "syphilis", "hiv"],
            conditional: false,
        },
        REMARKS,
    ],
    declaration: MOM_DECLARATION,
    derived: &[],
};

static WORK_PERMIT: ExamProfile = ExamProfile {
    exam_type: ExamType::WorkPermit,
    title: "Work permit medical exam",
    sections: &[
        PATIENT_INFO_BASIC,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["syphilis", "hiv", "chest_xray"],
            conditional: false,
        },
        REMARKS,
    ],
    declaration: MOM_DECLARATION,
    derived: &[],
};

static DRIVING_LICENCE: ExamProfile = ExamProfile {
    exam_type: ExamType::DrivingLicence,
    title: "Driving licence medical exam",
    sections: &[
        DRIVING_CORE[0],
        DRIVING_CORE[1],
        DRIVING_CORE[2],
        DRIVING_CORE[3],
        DRIVING_CORE[4],
        SectionSpec {
            id: SectionId::Assessment,
            required: &["fit_to_drive"],
            conditional: false,
        },
    ],
    declaration: TP_DECLARATION,
    derived: DRIVING_DERIVED,
};

static DRIVING_VOCATIONAL: ExamProfile = ExamProfile {
    exam_type: ExamType::DrivingVocational,
    title: "Driving and vocational licence medical exam",
    sections: &[
        DRIVING_CORE[0],
        DRIVING_CORE[1],
        DRIVING_CORE[2],
        DRIVING_CORE[3],
        DRIVING_CORE[4],
        SectionSpec {
            id: SectionId::Assessment,
            required: &["fit_to_drive", "fit_for_vocational_duty"],
            conditional: false,
        },
    ],
    declaration: TP_DECLARATION,
    derived: DRIVING_DERIVED,
};

static VOCATIONAL_XRAY: ExamProfile = ExamProfile {
    exam_type: ExamType::VocationalXray,
    title: "Vocational licence chest X-ray",
    sections: &[
        PATIENT_INFO_WITH_DOB,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["chest_xray"],
            conditional: false,
        },
        SectionSpec {
            id: SectionId::Assessment,
            required: &["fit_for_vocational_duty"],
            conditional: false,
        },
    ],
    declaration: TP_DECLARATION,
    derived: &[DerivedField::AgeAtExamination],
};

static PERMANENT_RESIDENCY: ExamProfile = ExamProfile {
    exam_type: ExamType::PermanentResidency,
    title: "Permanent residency medical exam",
    sections: &[
        PATIENT_INFO_WITH_DOB,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["hiv", "chest_xray"],
            conditional: false,
        },
        REMARKS,
    ],
    declaration: ICA_DECLARATION,
    derived: &[DerivedField::AgeAtExamination],
};

static STUDENT_PASS: ExamProfile = ExamProfile {
    exam_type: ExamType::StudentPass,
    title: "Student pass medical exam",
    sections: &[
        PATIENT_INFO_WITH_DOB,
        SectionSpec {
            id: SectionId::TestResults,
            required: &["hiv", "chest_xray"],
            conditional: false,
        },
        REMARKS,
    ],
    declaration: ICA_DECLARATION,
    derived: &[DerivedField::AgeAtExamination],
};

/// The single registration site for exam profiles.
pub fn profile_for(exam_type: ExamType) -> &'static ExamProfile {
    match exam_type {
        ExamType::SixMonthlyMdw => &SIX_MONTHLY_MDW,
        ExamType::SixMonthlyFmw => &SIX_MONTHLY_FMW,
        ExamType::WorkPermit => &WORK_PERMIT,
        ExamType::DrivingLicence => &DRIVING_LICENCE,
        ExamType::DrivingVocational => &DRIVING_VOCATIONAL,
        ExamType::VocationalXray => &VOCATIONAL_XRAY,
        ExamType::PermanentResidency => &PERMANENT_RESIDENCY,
        ExamType::StudentPass => &STUDENT_PASS,
    }
}
