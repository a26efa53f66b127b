//! Role enum for clinic staff acting on submissions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role a clinic user acts under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Prepares submissions and routes them to a doctor.
    Nurse,
    /// Reviews routed submissions and submits to the agency.
    Doctor,
    /// Clinic administrator.
    Admin,
}

impl Role {
    /// Returns true for the role that reviews submissions routed for approval.
    pub fn is_reviewer(&self) -> bool {
        matches!(self, Role::Doctor)
    }

    /// Returns true if this role may send a submission to a reviewer.
    pub fn may_route_for_approval(&self) -> bool {
        matches!(self, Role::Nurse | Role::Admin)
    }

    /// Returns true if this role may submit to the agency without review.
    pub fn may_submit_directly(&self) -> bool {
        matches!(self, Role::Doctor)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Nurse => "nurse",
            Role::Doctor => "doctor",
            Role::Admin => "admin",
        };
        write!(f, "{}", s)
    }
}
