//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the workflow core and the outside world. Adapters implement these ports.
//!
//! - `SubmissionApi` - create / update / transition / get submissions
//! - `IdentityLookup` - patient details by identity value
//! - `HistoryPlatform` - browser history primitive
//! - `ConfirmationDialog` - stay / leave prompts
//! - `Notifier` - transient global notifications
//! - `Clock` - today's date

mod clock;
mod confirmation_dialog;
mod history_platform;
mod identity_lookup;
mod notifier;
mod submission_api;

pub use clock::Clock;
pub use confirmation_dialog::ConfirmationDialog;
pub use history_platform::HistoryPlatform;
pub use identity_lookup::{IdentityLookup, IdentityRecord};
pub use notifier::{Notification, NotificationLevel, Notifier};
pub use submission_api::SubmissionApi;
