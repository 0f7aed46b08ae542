//! Acting identity and permission types.
//!
//! The engine never reads identity from ambient session state: every
//! strategy call receives an explicit [`ActorContext`] naming the actor and
//! the permissions the caller resolved for them.

use super::{TenantId, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Named capability an actor may hold.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Permission(String);

impl Permission {
    /// Creates a permission from its canonical name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Returns the permission name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The capability guarding task creation.
    #[must_use]
    pub fn create_task() -> Self {
        Self::new("create-task")
    }

    /// The capability guarding task field updates.
    #[must_use]
    pub fn update_task() -> Self {
        Self::new("update-task")
    }

    /// The capability guarding task assignment.
    #[must_use]
    pub fn assign_task() -> Self {
        Self::new("assign-task")
    }

    /// The capability guarding task approval.
    #[must_use]
    pub fn approve_task() -> Self {
        Self::new("approve-task")
    }

    /// The capability guarding task blocking.
    #[must_use]
    pub fn block_task() -> Self {
        Self::new("block-task")
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The identity performing an action, with the permissions it holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorContext {
    actor_id: UserId,
    permissions: BTreeSet<Permission>,
}

impl ActorContext {
    /// Creates an actor context with no permissions.
    #[must_use]
    pub const fn new(actor_id: UserId) -> Self {
        Self {
            actor_id,
            permissions: BTreeSet::new(),
        }
    }

    /// Adds held permissions.
    #[must_use]
    pub fn with_permissions(mut self, permissions: impl IntoIterator<Item = Permission>) -> Self {
        self.permissions.extend(permissions);
        self
    }

    /// Returns the acting user identifier.
    #[must_use]
    pub const fn actor_id(&self) -> UserId {
        self.actor_id
    }

    /// Returns whether the actor holds the given permission.
    #[must_use]
    pub fn holds(&self, permission: &Permission) -> bool {
        self.permissions.contains(permission)
    }
}

/// Resolved user record supplied by the user directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    tenant_id: TenantId,
    display_name: String,
}

impl UserRecord {
    /// Creates a user record.
    #[must_use]
    pub fn new(id: UserId, tenant_id: TenantId, display_name: impl Into<String>) -> Self {
        Self {
            id,
            tenant_id,
            display_name: display_name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the tenant the user belongs to.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the user display name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
