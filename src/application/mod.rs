//! Application layer - stateful services over the domain rules.
//!
//! - `navigation_guard` - shared unsaved-changes flag and history interception
//! - `guarded_navigator` - drives the guard against the confirmation dialog
//! - `coordinator` - one wizard session's draft, snapshot and progress
//! - `scenario` - offline evaluation of a described draft

mod coordinator;
mod errors;
mod guarded_navigator;
mod navigation_guard;
pub mod scenario;

pub use coordinator::{
    CoordinatorSettings, IdentityChange, LookupOutcome, SubmissionDraftCoordinator,
    SubmitAction, SubmitOutcome, WorkflowPorts, DEFAULT_ACKNOWLEDGEMENT_PATH,
};
pub use errors::WorkflowError;
pub use guarded_navigator::{GuardedNavigator, NavigationResolution};
pub use navigation_guard::{NavigationGuardStore, DEFAULT_CACHE_BUST_MARKER};
pub use scenario::{evaluate, Scenario, ScenarioError, ScenarioReport, SectionReport};
