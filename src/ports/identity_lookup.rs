//! IdentityLookup port - patient details by identity value.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::foundation::DomainError;

/// What a lookup knows about a patient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdentityRecord {
    pub display_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    /// Extra attributes (employer, nationality, ...) written into the
    /// patient-info section.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

/// Port for looking up a patient by identity value.
///
/// Lookups must be idempotent: calling twice with the same value returns
/// the same answer. `Ok(None)` means "not found", which callers treat as
/// manual entry rather than an error.
#[async_trait]
pub trait IdentityLookup: Send + Sync {
    async fn lookup(&self, identity_value: &str) -> Result<Option<IdentityRecord>, DomainError>;
}
