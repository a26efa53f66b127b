//! Submission module - the draft aggregate and its vocabulary.
//!
//! - `exam_type` - exam types and agency categories
//! - `profile` - per-exam-type capability tables
//! - `status` - submission lifecycle
//! - `form_data` - per-section answers bag
//! - `draft` - the Draft aggregate and its save payload
//! - `snapshot` - last-saved snapshot and dirty checking

mod draft;
mod exam_type;
mod form_data;
pub mod profile;
mod snapshot;
mod status;

pub use draft::{normalize_identity_value, Draft, DraftFields, DraftPayload};
pub use exam_type::{ExamCategory, ExamType};
pub use form_data::FormData;
pub use profile::{DerivedField, ExamProfile, SectionSpec};
pub use snapshot::{is_dirty, DraftSnapshot};
pub use status::{StatusAction, SubmissionStatus};
