//! Read-only event context consumed by the workflow engine.
//!
//! The engine never owns or mutates events; it only needs the owning
//! event's time window, tenant, and creator to validate and authorize task
//! actions.

use super::{EventId, TenantId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resolved event record supplied by the event directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    id: EventId,
    tenant_id: TenantId,
    name: String,
    created_by: UserId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl EventRecord {
    /// Creates an event record.
    #[must_use]
    pub fn new(
        id: EventId,
        tenant_id: TenantId,
        name: impl Into<String>,
        created_by: UserId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            name: name.into(),
            created_by,
            starts_at,
            ends_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the tenant owning the event.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the event name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the event creator identity.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the event start time.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the event end time.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }

    /// Returns the containment window used for temporal validation.
    #[must_use]
    pub const fn window(&self) -> EventWindow {
        EventWindow {
            event_id: self.id,
            tenant_id: self.tenant_id,
            created_by: self.created_by,
            starts_at: self.starts_at,
            ends_at: self.ends_at,
        }
    }
}

/// Time window and ownership context of the event containing a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventWindow {
    event_id: EventId,
    tenant_id: TenantId,
    created_by: UserId,
    starts_at: DateTime<Utc>,
    ends_at: DateTime<Utc>,
}

impl EventWindow {
    /// Creates an event window.
    #[must_use]
    pub const fn new(
        event_id: EventId,
        tenant_id: TenantId,
        created_by: UserId,
        starts_at: DateTime<Utc>,
        ends_at: DateTime<Utc>,
    ) -> Self {
        Self {
            event_id,
            tenant_id,
            created_by,
            starts_at,
            ends_at,
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn event_id(&self) -> EventId {
        self.event_id
    }

    /// Returns the tenant owning the event.
    #[must_use]
    pub const fn tenant_id(&self) -> TenantId {
        self.tenant_id
    }

    /// Returns the event creator identity.
    #[must_use]
    pub const fn created_by(&self) -> UserId {
        self.created_by
    }

    /// Returns the window start.
    #[must_use]
    pub const fn starts_at(&self) -> DateTime<Utc> {
        self.starts_at
    }

    /// Returns the window end.
    #[must_use]
    pub const fn ends_at(&self) -> DateTime<Utc> {
        self.ends_at
    }
}
