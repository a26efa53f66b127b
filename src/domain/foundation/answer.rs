//! Tri-state yes/no answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A yes/no question that may not have been answered yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Answer {
    Yes,
    No,
    #[default]
    Unknown,
}

impl Answer {
    /// Reads an answer out of a stored form value.
    ///
    /// Accepts booleans and the strings `"yes"` / `"no"` (any case).
    /// Anything else, including a missing value, is `Unknown`.
    pub fn from_value(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Bool(true)) => Answer::Yes,
            Some(Value::Bool(false)) => Answer::No,
            Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "yes" | "y" | "true" => Answer::Yes,
                "no" | "n" | "false" => Answer::No,
                _ => Answer::Unknown,
            },
            _ => Answer::Unknown,
        }
    }

    pub fn is_yes(&self) -> bool {
        matches!(self, Answer::Yes)
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Answer::Unknown)
    }
}
