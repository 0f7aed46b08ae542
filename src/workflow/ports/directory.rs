//! Lookup ports for the entities the engine references but does not own.

use crate::workflow::domain::{EventId, EventRecord, PersistenceError, UserId, UserRecord};
use async_trait::async_trait;

/// Read-only access to event records.
#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// Finds an event by identifier.
    ///
    /// Returns `None` when the event does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    async fn find_by_id(&self, id: EventId) -> Result<Option<EventRecord>, PersistenceError>;
}

/// Read-only access to user records.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Finds a user by identifier.
    ///
    /// Returns `None` when the user does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backing store fails.
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PersistenceError>;
}
