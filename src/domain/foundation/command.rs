//! Actor context that flows through workflow operations.
//!
//! Instead of each coordinator operation taking `user_id`, `role` and
//! `correlation_id` separately, they read a single `CommandMetadata`
//! captured when the wizard session opens.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Role, UserId};

/// Metadata context for workflow commands.
///
/// Carries who is acting, under which role, and the correlation ID used
/// in log spans for every persistence call made on the actor's behalf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The user executing this command.
    pub user_id: UserId,

    /// Role the user acts under. `None` means the role could not be
    /// resolved, which makes every submission read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for a user acting under a role.
    pub fn new(user_id: UserId, role: Option<Role>) -> Self {
        Self {
            user_id,
            role,
            correlation_id: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }
}

#[cfg(test)]
impl CommandMetadata {
    /// Creates a test fixture for a user with the given role.
    pub fn test_fixture(role: Role) -> Self {
        Self::new(UserId::new("test-user-123").unwrap(), Some(role))
            .with_correlation_id("test-correlation-id")
    }
}
