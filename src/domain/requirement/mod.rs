//! Conditional requirement resolution for supplementary sections.

mod age;
mod resolver;

pub use age::{age_next_birthday, age_on};
pub use resolver::{resolve, RequirementInputs, RequirementOutcome, RequirementPolicy};

use chrono::NaiveDate;

use crate::domain::submission::DraftFields;

/// Resolves the conditional section's requirement for a draft.
///
/// Exam types without a conditional section never require one.
pub fn resolve_for_draft(
    fields: &DraftFields,
    today: NaiveDate,
    policy: &RequirementPolicy,
) -> RequirementOutcome {
    if fields.exam_type.profile().conditional_section().is_none() {
        return RequirementOutcome::NotRequired;
    }
    resolve(&RequirementInputs::from_fields(fields, today, policy), policy)
}
