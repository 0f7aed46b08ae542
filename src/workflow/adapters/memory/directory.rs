//! In-memory event and user directories for tests and local development.

use crate::workflow::domain::{EventId, EventRecord, PersistenceError, UserId, UserRecord};
use crate::workflow::ports::{EventDirectory, UserDirectory};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

fn poisoned<T>(err: std::sync::PoisonError<T>) -> PersistenceError {
    PersistenceError::backend(std::io::Error::other(err.to_string()))
}

/// Thread-safe in-memory event directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventDirectory {
    events: Arc<RwLock<HashMap<EventId, EventRecord>>>,
}

impl InMemoryEventDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an event record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the state lock is poisoned.
    pub fn insert(&self, event: EventRecord) -> Result<(), PersistenceError> {
        let mut events = self.events.write().map_err(poisoned)?;
        events.insert(event.id(), event);
        Ok(())
    }
}

#[async_trait]
impl EventDirectory for InMemoryEventDirectory {
    async fn find_by_id(&self, id: EventId) -> Result<Option<EventRecord>, PersistenceError> {
        let events = self.events.read().map_err(poisoned)?;
        Ok(events.get(&id).cloned())
    }
}

/// Thread-safe in-memory user directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, UserRecord>>>,
}

impl InMemoryUserDirectory {
    /// Creates an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a user record.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the state lock is poisoned.
    pub fn insert(&self, user: UserRecord) -> Result<(), PersistenceError> {
        let mut users = self.users.write().map_err(poisoned)?;
        users.insert(user.id(), user);
        Ok(())
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, PersistenceError> {
        let users = self.users.read().map_err(poisoned)?;
        Ok(users.get(&id).cloned())
    }
}
