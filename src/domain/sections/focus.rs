//! Field registry - focus handles registered by rendered fields.

use std::collections::HashMap;
use std::sync::Arc;

use super::FieldId;

/// Moves input focus to (and scrolls to) one rendered field.
pub trait FocusHandle: Send + Sync {
    fn focus(&self);
}

impl<F> FocusHandle for F
where
    F: Fn() + Send + Sync,
{
    fn focus(&self) {
        self()
    }
}

/// Focus handles keyed by field, registered when a field mounts.
#[derive(Default, Clone)]
pub struct FieldRegistry {
    handles: HashMap<FieldId, Arc<dyn FocusHandle>>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the handle for a field.
    pub fn register(&mut self, field: FieldId, handle: Arc<dyn FocusHandle>) {
        self.handles.insert(field, handle);
    }

    pub fn unregister(&mut self, field: &FieldId) {
        self.handles.remove(field);
    }

    pub fn is_registered(&self, field: &FieldId) -> bool {
        self.handles.contains_key(field)
    }

    /// Focuses the first field in `ordered` that has a handle.
    ///
    /// Fields not currently rendered are skipped. Returns the field that
    /// received focus.
    pub fn focus_first(&self, ordered: &[FieldId]) -> Option<FieldId> {
        let field = ordered.iter().find(|f| self.handles.contains_key(*f))?;
        if let Some(handle) = self.handles.get(field) {
            handle.focus();
        }
        Some(field.clone())
    }
}

impl std::fmt::Debug for FieldRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldRegistry")
            .field("fields", &self.handles.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sections::SectionId;
    use std::sync::Mutex;

    fn recording_handle(log: Arc<Mutex<Vec<String>>>, name: &'static str) -> Arc<dyn FocusHandle> {
        Arc::new(move || log.lock().unwrap().push(name.to_string()))
    }

    #[test]
    fn focuses_first_registered_field_only() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = FieldRegistry::new();
        let name = FieldId::new(SectionId::PatientInfo, "patient_name");
        let dob = FieldId::new(SectionId::PatientInfo, "date_of_birth");
        let exam = FieldId::new(SectionId::PatientInfo, "examination_date");
        registry.register(dob.clone(), recording_handle(log.clone(), "dob"));
        registry.register(exam.clone(), recording_handle(log.clone(), "exam"));

        let focused = registry.focus_first(&[name, dob.clone(), exam]);

        assert_eq!(focused, Some(dob));
        assert_eq!(*log.lock().unwrap(), vec!["dob".to_string()]);
    }

    #[test]
    fn nothing_focused_when_no_handles() {
        let registry = FieldRegistry::new();
        let field = FieldId::new(SectionId::Remarks, "note");
        assert_eq!(registry.focus_first(&[field]), None);
    }

    #[test]
    fn unregister_removes_handle() {
        let mut registry = FieldRegistry::new();
        let field = FieldId::new(SectionId::Remarks, "note");
        registry.register(field.clone(), Arc::new(|| {}));
        registry.unregister(&field);
        assert!(!registry.is_registered(&field));
    }
}
