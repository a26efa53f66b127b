//! Workflow rules - pure permission flags for the wizard.

mod flags;

pub use flags::{compute_flags, FlagsMemo, WorkflowFlags, WorkflowInputs};
