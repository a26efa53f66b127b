//! FormData - the per-section answers bag of a draft.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::sections::SectionId;

/// Exam-specific answers grouped by wizard section.
///
/// Blank values are never stored: writing one removes the key, and a
/// section left with no keys is dropped. Two bags holding the same
/// answers therefore always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormData(BTreeMap<SectionId, BTreeMap<String, Value>>);

impl FormData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if a value carries no user input.
    pub fn is_blank(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(a) => a.is_empty(),
            Value::Object(o) => o.is_empty(),
            Value::Bool(_) | Value::Number(_) => false,
        }
    }

    pub fn get(&self, section: SectionId, key: &str) -> Option<&Value> {
        self.0.get(&section).and_then(|answers| answers.get(key))
    }

    /// Stores an answer, or removes it when the value is blank.
    ///
    /// Returns true if the bag changed.
    pub fn set(&mut self, section: SectionId, key: impl Into<String>, value: Value) -> bool {
        let key = key.into();
        if Self::is_blank(&value) {
            return self.remove(section, &key);
        }
        let answers = self.0.entry(section).or_default();
        match answers.get(&key) {
            Some(existing) if *existing == value => false,
            _ => {
                answers.insert(key, value);
                true
            }
        }
    }

    pub fn remove(&mut self, section: SectionId, key: &str) -> bool {
        let Some(answers) = self.0.get_mut(&section) else {
            return false;
        };
        let removed = answers.remove(key).is_some();
        if answers.is_empty() {
            self.0.remove(&section);
        }
        removed
    }

    pub fn section(&self, section: SectionId) -> Option<&BTreeMap<String, Value>> {
        self.0.get(&section)
    }

    pub fn has_section_data(&self, section: SectionId) -> bool {
        self.0.contains_key(&section)
    }

    /// Drops every answer in the given section.
    pub fn clear_section(&mut self, section: SectionId) -> bool {
        self.0.remove(&section).is_some()
    }

    /// Drops answers for every section the predicate rejects.
    pub fn retain_sections(&mut self, mut keep: impl FnMut(SectionId) -> bool) {
        self.0.retain(|section, _| keep(*section));
    }

    pub fn sections(&self) -> impl Iterator<Item = SectionId> + '_ {
        self.0.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
