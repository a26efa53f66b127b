//! In-Memory Identity Directory
//!
//! Resolves identity values from a fixed set of records. Counts calls so
//! tests can check that repeated lookups are skipped.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::submission::normalize_identity_value;
use crate::ports::{IdentityLookup, IdentityRecord};

#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityDirectory {
    records: Arc<RwLock<HashMap<String, IdentityRecord>>>,
    calls: Arc<AtomicUsize>,
    offline: Arc<RwLock<bool>>,
}

impl InMemoryIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, identity_value: &str, record: IdentityRecord) {
        self.records
            .write()
            .await
            .insert(normalize_identity_value(identity_value), record);
    }

    /// Makes every lookup fail until set back.
    pub async fn set_offline(&self, offline: bool) {
        *self.offline.write().await = offline;
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityLookup for InMemoryIdentityDirectory {
    async fn lookup(&self, identity_value: &str) -> Result<Option<IdentityRecord>, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if *self.offline.read().await {
            return Err(DomainError::new(
                ErrorCode::LookupError,
                "Identity directory unavailable",
            ));
        }
        let key = normalize_identity_value(identity_value);
        Ok(self.records.read().await.get(&key).cloned())
    }
}
