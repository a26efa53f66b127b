//! Adapters - Implementations of port interfaces.
//!
//! - `memory` - in-memory submission store, identity directory, history
//!   stack and scripted dialog
//! - `notifier` - notifications written to the log
//! - `clock` - system and fixed clocks

mod clock;
pub mod memory;
mod notifier;

pub use clock::{FixedClock, SystemClock};
pub use memory::{
    HistoryCall, InMemoryIdentityDirectory, InMemorySubmissionApi, RecordingHistory,
    ScriptedDialog, SubmissionOperation,
};
pub use notifier::TracingNotifier;
