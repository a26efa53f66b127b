//! Sections - wizard steps, their validation, and completion tracking.

mod focus;
mod section_id;
mod tracker;
mod validation;

pub use focus::{FieldRegistry, FocusHandle};
pub use section_id::SectionId;
pub use tracker::{SectionCompletionTracker, WizardCursor};
pub use validation::{FieldId, FieldIssue, ProfileValidator, SectionValidator, ValidationFailure};
