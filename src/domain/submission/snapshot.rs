//! Last-saved snapshot and dirty checking.

use super::DraftFields;

/// Deep copy of a draft's comparable fields taken right after a verified
/// successful save. Only ever replaced whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftSnapshot(DraftFields);

impl DraftSnapshot {
    pub fn capture(fields: &DraftFields) -> Self {
        Self(fields.clone())
    }

    pub fn fields(&self) -> &DraftFields {
        &self.0
    }
}

/// Decides whether the current fields hold unsaved changes.
///
/// Without a snapshot any user input counts; with one, only structural
/// inequality does.
pub fn is_dirty(current: &DraftFields, snapshot: Option<&DraftSnapshot>) -> bool {
    match snapshot {
        None => !current.is_blank(),
        Some(saved) => saved.fields() != current,
    }
}
