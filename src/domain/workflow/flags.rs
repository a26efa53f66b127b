//! WorkflowFlags - permissions derived from exam type, status and role.
//!
//! `compute_flags` is a pure function; nothing here is persisted. `FlagsMemo`
//! hands back the same `Arc` for repeated identical inputs so callers can
//! short-circuit on pointer equality.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::Role;
use crate::domain::submission::{ExamType, SubmissionStatus};

/// Everything the flags depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct WorkflowInputs {
    pub exam_type: ExamType,
    pub status: Option<SubmissionStatus>,
    /// True once the submission has a persisted identifier.
    pub has_identity: bool,
    pub role: Option<Role>,
}

/// Action and editing permissions for one render of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowFlags {
    pub can_edit_identity_field: bool,
    pub can_show_assistive_identity_value: bool,
    pub is_read_only: bool,
    pub can_route_for_approval: bool,
    pub can_submit_directly: bool,
    pub should_include_route_flag_on_save: bool,
    pub can_save_draft: bool,
}

/// Computes the flags for one set of inputs.
pub fn compute_flags(inputs: WorkflowInputs) -> WorkflowFlags {
    let WorkflowInputs {
        exam_type,
        status,
        has_identity,
        role,
    } = inputs;
    let category = exam_type.category();

    let identity_locked = role.map(|r| r.is_reviewer()).unwrap_or(false)
        && category.locks_identity_during_review()
        && status == Some(SubmissionStatus::PendingApproval);
    let can_edit_identity_field = !identity_locked;

    let is_read_only = role.is_none() || status.map(|s| s.is_final()).unwrap_or(false);

    // Revision-requested submissions are back with their author and gate
    // like drafts.
    let open_draft = status.map(|s| s.is_editable_draft()).unwrap_or(true);
    let awaiting_review = status == Some(SubmissionStatus::PendingApproval);

    let can_route_for_approval = !is_read_only
        && role.map(|r| r.may_route_for_approval()).unwrap_or(false)
        && open_draft;

    let can_submit_directly = !is_read_only
        && role.map(|r| r.may_submit_directly()).unwrap_or(false)
        && (open_draft || awaiting_review);

    WorkflowFlags {
        can_edit_identity_field,
        can_show_assistive_identity_value: !has_identity
            && can_edit_identity_field
            && category.supports_identity_lookup(),
        is_read_only,
        can_route_for_approval,
        can_submit_directly,
        should_include_route_flag_on_save: !has_identity,
        can_save_draft: !is_read_only,
    }
}

/// Remembers the last computed flags.
#[derive(Debug, Default)]
pub struct FlagsMemo {
    last: Option<(WorkflowInputs, Arc<WorkflowFlags>)>,
}

impl FlagsMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flags for `inputs`, reusing the previous allocation when
    /// the inputs have not changed.
    pub fn flags(&mut self, inputs: WorkflowInputs) -> Arc<WorkflowFlags> {
        if let Some((last_inputs, flags)) = &self.last {
            if *last_inputs == inputs {
                return Arc::clone(flags);
            }
        }
        let flags = Arc::new(compute_flags(inputs));
        self.last = Some((inputs, Arc::clone(&flags)));
        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SubmissionStatus::*;

    fn inputs(
        exam_type: ExamType,
        status: Option<SubmissionStatus>,
        has_identity: bool,
        role: Option<Role>,
    ) -> WorkflowInputs {
        WorkflowInputs {
            exam_type,
            status,
            has_identity,
            role,
        }
    }

    const STATUSES: [Option<SubmissionStatus>; 6] = [
        None,
        Some(Draft),
        Some(PendingApproval),
        Some(Submitted),
        Some(Rejected),
        Some(RevisionRequested),
    ];

    const ROLES: [Option<Role>; 4] = [None, Some(Role::Nurse), Some(Role::Doctor), Some(Role::Admin)];

    #[test]
    fn identity_locked_only_for_reviewer_on_mom_pending_approval() {
        for exam_type in ExamType::ALL {
            for status in STATUSES {
                for role in ROLES {
                    let flags = compute_flags(inputs(exam_type, status, true, role));
                    let expect_locked = role == Some(Role::Doctor)
                        && exam_type.category().locks_identity_during_review()
                        && status == Some(PendingApproval);
                    assert_eq!(
                        flags.can_edit_identity_field, !expect_locked,
                        "{:?} {:?} {:?}",
                        exam_type, status, role
                    );
                }
            }
        }
    }

    #[test]
    fn identity_editable_when_status_absent() {
        let flags = compute_flags(inputs(ExamType::WorkPermit, None, false, Some(Role::Doctor)));
        assert!(flags.can_edit_identity_field);
    }

    #[test]
    fn assistive_identity_only_for_new_lookup_capable_drafts() {
        let new_mom = compute_flags(inputs(ExamType::SixMonthlyMdw, None, false, Some(Role::Nurse)));
        assert!(new_mom.can_show_assistive_identity_value);

        let saved_mom =
            compute_flags(inputs(ExamType::SixMonthlyMdw, Some(Draft), true, Some(Role::Nurse)));
        assert!(!saved_mom.can_show_assistive_identity_value);

        let new_tp = compute_flags(inputs(ExamType::DrivingLicence, None, false, Some(Role::Nurse)));
        assert!(!new_tp.can_show_assistive_identity_value);
    }

    #[test]
    fn read_only_for_final_statuses_or_unknown_role() {
        assert!(compute_flags(inputs(ExamType::StudentPass, Some(Submitted), true, Some(Role::Doctor))).is_read_only);
        assert!(compute_flags(inputs(ExamType::StudentPass, Some(Rejected), true, Some(Role::Nurse))).is_read_only);
        assert!(compute_flags(inputs(ExamType::StudentPass, None, false, None)).is_read_only);
        assert!(!compute_flags(inputs(ExamType::StudentPass, Some(PendingApproval), true, Some(Role::Nurse))).is_read_only);
    }

    #[test]
    fn nurse_routes_drafts_but_not_pending_ones() {
        let nurse = Some(Role::Nurse);
        assert!(compute_flags(inputs(ExamType::WorkPermit, None, false, nurse)).can_route_for_approval);
        assert!(compute_flags(inputs(ExamType::WorkPermit, Some(Draft), true, nurse)).can_route_for_approval);
        assert!(!compute_flags(inputs(ExamType::WorkPermit, Some(PendingApproval), true, nurse)).can_route_for_approval);
        assert!(!compute_flags(inputs(ExamType::WorkPermit, Some(Draft), true, nurse)).can_submit_directly);
    }

    #[test]
    fn doctor_submits_drafts_and_pending_approvals() {
        let doctor = Some(Role::Doctor);
        assert!(compute_flags(inputs(ExamType::DrivingLicence, None, false, doctor)).can_submit_directly);
        assert!(compute_flags(inputs(ExamType::DrivingLicence, Some(PendingApproval), true, doctor)).can_submit_directly);
        assert!(!compute_flags(inputs(ExamType::DrivingLicence, Some(Submitted), true, doctor)).can_submit_directly);
        assert!(!compute_flags(inputs(ExamType::DrivingLicence, Some(Draft), true, doctor)).can_route_for_approval);
    }

    #[test]
    fn route_flag_only_on_create_path() {
        assert!(compute_flags(inputs(ExamType::WorkPermit, None, false, Some(Role::Nurse))).should_include_route_flag_on_save);
        assert!(!compute_flags(inputs(ExamType::WorkPermit, Some(Draft), true, Some(Role::Nurse))).should_include_route_flag_on_save);
    }

    #[test]
    fn identical_inputs_give_identical_outputs() {
        for exam_type in ExamType::ALL {
            for status in STATUSES {
                for role in ROLES {
                    let i = inputs(exam_type, status, false, role);
                    assert_eq!(compute_flags(i), compute_flags(i));
                }
            }
        }
    }

    #[test]
    fn memo_returns_same_allocation_for_same_inputs() {
        let mut memo = FlagsMemo::new();
        let i = inputs(ExamType::WorkPermit, Some(Draft), true, Some(Role::Nurse));

        let first = memo.flags(i);
        let second = memo.flags(i);
        assert!(Arc::ptr_eq(&first, &second));

        let other = memo.flags(WorkflowInputs { role: Some(Role::Doctor), ..i });
        assert!(!Arc::ptr_eq(&first, &other));
    }
}
