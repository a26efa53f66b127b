//! Domain layer containing workflow rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (IDs, roles, answers, errors)
//! - `submission` - Draft aggregate, exam profiles, status lifecycle
//! - `workflow` - Pure permission flags
//! - `requirement` - Conditional section requirement resolver
//! - `sections` - Section validation, focus registry, completion tracking
//! - `navigation` - Navigation targets and guard outcomes

pub mod foundation;
pub mod navigation;
pub mod requirement;
pub mod sections;
pub mod submission;
pub mod workflow;
