//! Hand-written mocks shared by the coordinator's test modules.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::json;

use crate::application::NavigationGuardStore;
use crate::domain::foundation::{CommandMetadata, DomainError, DraftId, ErrorCode, Role, UserId};
use crate::domain::sections::SectionId;
use crate::domain::submission::{
    Draft, DraftFields, DraftPayload, ExamType, StatusAction, SubmissionStatus,
};
use crate::ports::{
    Clock, HistoryPlatform, IdentityLookup, IdentityRecord, Notification, NotificationLevel,
    Notifier, SubmissionApi,
};

use super::{CoordinatorSettings, SubmissionDraftCoordinator, WorkflowPorts};

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ─────────────────────────────────────────────────────────────────────
// Submission API
// ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(super) enum ApiOp {
    Create,
    Update,
    Transition,
}

#[derive(Default)]
pub(super) struct MockSubmissionApi {
    drafts: Mutex<HashMap<DraftId, Draft>>,
    failing: Mutex<HashSet<ApiOp>>,
    calls: Mutex<Vec<ApiOp>>,
    payloads: Mutex<Vec<DraftPayload>>,
}

impl MockSubmissionApi {
    pub fn fail_on(&self, op: ApiOp) {
        self.failing.lock().unwrap().insert(op);
    }

    pub fn recover(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn calls(&self) -> Vec<ApiOp> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_payload(&self) -> Option<DraftPayload> {
        self.payloads.lock().unwrap().last().cloned()
    }

    pub fn stored(&self, id: &DraftId) -> Option<Draft> {
        self.drafts.lock().unwrap().get(id).cloned()
    }

    pub fn insert(&self, draft: Draft) {
        if let Some(id) = draft.id() {
            self.drafts.lock().unwrap().insert(id, draft);
        }
    }

    fn record(&self, op: ApiOp) -> Result<(), DomainError> {
        self.calls.lock().unwrap().push(op);
        if self.failing.lock().unwrap().contains(&op) {
            return Err(DomainError::persistence(format!("simulated {:?} failure", op)));
        }
        Ok(())
    }

    fn existing(&self, id: &DraftId) -> Result<Draft, DomainError> {
        self.stored(id).ok_or_else(|| {
            DomainError::new(ErrorCode::SubmissionNotFound, format!("no submission {}", id))
        })
    }
}

#[async_trait]
impl SubmissionApi for MockSubmissionApi {
    async fn create(&self, payload: &DraftPayload) -> Result<DraftId, DomainError> {
        self.record(ApiOp::Create)?;
        self.payloads.lock().unwrap().push(payload.clone());
        let id = DraftId::new();
        let status = if payload.route_for_approval == Some(true) {
            SubmissionStatus::PendingApproval
        } else {
            SubmissionStatus::Draft
        };
        self.insert(Draft::reconstitute(id, status, payload.fields.clone()));
        Ok(id)
    }

    async fn update(&self, id: &DraftId, payload: &DraftPayload) -> Result<Draft, DomainError> {
        self.record(ApiOp::Update)?;
        self.payloads.lock().unwrap().push(payload.clone());
        let existing = self.existing(id)?;
        let status = existing.status().unwrap_or_default();
        let updated = Draft::reconstitute(*id, status, payload.fields.clone());
        self.insert(updated.clone());
        Ok(updated)
    }

    async fn transition_status(
        &self,
        id: &DraftId,
        action: StatusAction,
    ) -> Result<Draft, DomainError> {
        self.record(ApiOp::Transition)?;
        let existing = self.existing(id)?;
        let status = action.apply(existing.status())?;
        let moved = Draft::reconstitute(*id, status, existing.fields().clone());
        self.insert(moved.clone());
        Ok(moved)
    }

    async fn get(&self, id: &DraftId) -> Result<Option<Draft>, DomainError> {
        Ok(self.stored(id))
    }
}

// ─────────────────────────────────────────────────────────────────────
// Identity lookup
// ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(super) struct MockLookup {
    records: Mutex<HashMap<String, IdentityRecord>>,
    calls: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl MockLookup {
    pub fn add(&self, identity: &str, name: &str) {
        let mut attributes = BTreeMap::new();
        attributes.insert("employer".to_string(), json!("Acme Cleaning Pte Ltd"));
        self.records.lock().unwrap().insert(
            identity.to_string(),
            IdentityRecord {
                display_name: name.to_string(),
                date_of_birth: None,
                attributes,
            },
        );
    }

    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl IdentityLookup for MockLookup {
    async fn lookup(&self, identity_value: &str) -> Result<Option<IdentityRecord>, DomainError> {
        self.calls.lock().unwrap().push(identity_value.to_string());
        if *self.failing.lock().unwrap() {
            return Err(DomainError::new(ErrorCode::LookupError, "directory offline"));
        }
        Ok(self.records.lock().unwrap().get(identity_value).cloned())
    }
}

// ─────────────────────────────────────────────────────────────────────
// Notifier, clock, history
// ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub(super) struct MockNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl MockNotifier {
    pub fn errors(&self) -> usize {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.level == NotificationLevel::Error)
            .count()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, notification: Notification) {
        self.sent.lock().unwrap().push(notification);
    }
}

pub(super) struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub(super) struct MockHistory {
    location: Mutex<String>,
    pushes: Mutex<usize>,
    navigations: Mutex<Vec<String>>,
}

impl MockHistory {
    fn new() -> Self {
        Self {
            location: Mutex::new("/submissions/new".to_string()),
            pushes: Mutex::new(0),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        self.navigations.lock().unwrap().clone()
    }

    pub fn pushes(&self) -> usize {
        *self.pushes.lock().unwrap()
    }
}

impl HistoryPlatform for MockHistory {
    fn current_location(&self) -> String {
        self.location.lock().unwrap().clone()
    }

    fn push_state(&self, _path: &str) {
        *self.pushes.lock().unwrap() += 1;
    }

    fn go(&self, _offset: i32) {}

    fn navigate(&self, path: &str) {
        self.navigations.lock().unwrap().push(path.to_string());
        *self.location.lock().unwrap() = path.to_string();
    }
}

// ─────────────────────────────────────────────────────────────────────
// Harness
// ─────────────────────────────────────────────────────────────────────

pub(super) struct Harness {
    pub api: Arc<MockSubmissionApi>,
    pub lookup: Arc<MockLookup>,
    pub notifier: Arc<MockNotifier>,
    pub history: Arc<MockHistory>,
    pub guard: Arc<NavigationGuardStore>,
    pub today: NaiveDate,
    role: Option<Role>,
}

impl Harness {
    pub fn new(role: Role) -> Self {
        Self::with_role(Some(role))
    }

    pub fn without_role() -> Self {
        Self::with_role(None)
    }

    fn with_role(role: Option<Role>) -> Self {
        let history = Arc::new(MockHistory::new());
        Self {
            api: Arc::new(MockSubmissionApi::default()),
            lookup: Arc::new(MockLookup::default()),
            notifier: Arc::new(MockNotifier::default()),
            guard: Arc::new(NavigationGuardStore::new(history.clone())),
            history,
            today: date(2024, 6, 15),
            role,
        }
    }

    pub fn ports(&self) -> WorkflowPorts {
        WorkflowPorts {
            submissions: self.api.clone(),
            identity: self.lookup.clone(),
            notifier: self.notifier.clone(),
            clock: Arc::new(FixedClock(self.today)),
            guard: self.guard.clone(),
        }
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new(UserId::new("user-1").unwrap(), self.role)
            .with_correlation_id("corr-1")
    }

    pub fn new_coordinator(&self, exam_type: ExamType) -> SubmissionDraftCoordinator {
        SubmissionDraftCoordinator::new(
            self.ports(),
            CoordinatorSettings::default(),
            self.metadata(),
            exam_type,
            None,
        )
    }

    pub async fn load(
        &self,
        id: DraftId,
    ) -> Result<SubmissionDraftCoordinator, crate::application::WorkflowError> {
        SubmissionDraftCoordinator::load(
            self.ports(),
            CoordinatorSettings::default(),
            self.metadata(),
            id,
        )
        .await
    }

    /// Stores a draft-status submission and returns its id.
    pub fn seed(&self, fields: DraftFields) -> DraftId {
        self.seed_with_status(fields, SubmissionStatus::Draft)
    }

    pub fn seed_with_status(&self, fields: DraftFields, status: SubmissionStatus) -> DraftId {
        let id = DraftId::new();
        self.api.insert(Draft::reconstitute(id, status, fields));
        id
    }

    /// Patient details that validate; the patient is 40, so the cognitive
    /// assessment is not required.
    pub fn complete_patient_info(&self, exam_type: ExamType) -> DraftFields {
        let mut fields = DraftFields::new(exam_type, None);
        fields.patient_name = "Tan Ah Kow".into();
        fields.identity_value = "S1234567D".into();
        fields.date_of_birth = Some(date(1984, 3, 1));
        fields.examination_date = Some(date(2024, 6, 10));
        fields
    }
}

/// Fills every required field of the driving-licence sections except the
/// cognitive assessment.
pub(super) fn fill_driving_sections(coordinator: &mut SubmissionDraftCoordinator) {
    let answers = [
        (SectionId::MedicalDeclaration, "patient_declaration", json!(true)),
        (SectionId::MedicalHistory, "licence_class", json!("3")),
        (SectionId::GeneralMedical, "blood_pressure", json!("120/80")),
        (SectionId::GeneralMedical, "visual_acuity", json!("6/6")),
        (SectionId::GeneralMedical, "hearing", json!("normal")),
        (SectionId::Assessment, "fit_to_drive", json!(true)),
    ];
    for (section, key, value) in answers {
        coordinator.set_answer(section, key, value).unwrap();
    }
}

/// Enters valid patient details for a 40-year-old.
pub(super) fn fill_patient_info(coordinator: &mut SubmissionDraftCoordinator) {
    coordinator.update_patient_name("Tan Ah Kow").unwrap();
    coordinator.update_identity_directly("S1234567D");
    coordinator.update_date_of_birth(Some(date(1984, 3, 1))).unwrap();
    coordinator
        .update_examination_date(Some(date(2024, 6, 10)))
        .unwrap();
}

impl SubmissionDraftCoordinator {
    /// Sets the identity value without the confirmation flow.
    pub(super) fn update_identity_directly(&mut self, value: &str) {
        self.draft.set_identity_value(value);
        self.after_edit();
    }
}
