//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the submission workflow.

mod answer;
mod command;
mod errors;
mod ids;
mod role;
mod state_machine;

pub use answer::Answer;
pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ClinicId, DraftId, UserId};
pub use role::Role;
pub use state_machine::StateMachine;
