//! In-memory adapters for tests, demos and the scenario runner.

mod dialog;
mod history;
mod identity_directory;
mod submissions;

pub use dialog::ScriptedDialog;
pub use history::{HistoryCall, RecordingHistory};
pub use identity_directory::InMemoryIdentityDirectory;
pub use submissions::{InMemorySubmissionApi, SubmissionOperation};
