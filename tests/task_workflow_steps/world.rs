//! Shared world state for task workflow BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::fixture;
use runsheet::workflow::adapters::memory::{
    InMemoryEventDirectory, InMemoryEvidenceVault, InMemoryUserDirectory, InMemoryWorkflowStore,
};
use runsheet::workflow::domain::{
    ActorContext, EventRecord, Permission, UserId, UserRecord, WorkflowError,
};
use runsheet::workflow::ports::EvidenceVault;
use runsheet::workflow::services::{TaskView, TaskWorkflowService};

/// Store type used by the BDD world.
pub type TestStore = InMemoryWorkflowStore<DefaultClock>;

/// Service type used by the BDD world.
pub type TestWorkflowService =
    TaskWorkflowService<InMemoryEventDirectory, InMemoryUserDirectory, TestStore, DefaultClock>;

/// Scenario world for task workflow behaviour tests.
pub struct TaskWorkflowWorld {
    /// Service under test.
    pub service: TestWorkflowService,
    /// Event directory seeded by given steps.
    pub events: Arc<InMemoryEventDirectory>,
    /// User directory seeded by given steps.
    pub users: Arc<InMemoryUserDirectory>,
    /// Event the scenario operates on.
    pub event: Option<EventRecord>,
    /// Named people registered in the scenario.
    pub people: HashMap<String, UserRecord>,
    /// The task most recently returned by a successful action.
    pub task_view: Option<TaskView>,
    /// The most recent failed action result.
    pub last_error: Option<WorkflowError>,
}

impl TaskWorkflowWorld {
    /// Creates a world with empty scenario state.
    #[must_use]
    pub fn new() -> Self {
        let events = Arc::new(InMemoryEventDirectory::new());
        let users = Arc::new(InMemoryUserDirectory::new());
        let vault = Arc::new(InMemoryEvidenceVault::new()) as Arc<dyn EvidenceVault>;
        let store = Arc::new(InMemoryWorkflowStore::new(vault, Arc::new(DefaultClock)));
        let service = TaskWorkflowService::new(
            Arc::clone(&events),
            Arc::clone(&users),
            store,
            Arc::new(DefaultClock),
        );

        Self {
            service,
            events,
            users,
            event: None,
            people: HashMap::new(),
            task_view: None,
            last_error: None,
        }
    }
}

impl TaskWorkflowWorld {
    /// Returns the scenario event or an error naming the missing setup.
    pub fn event(&self) -> Result<&EventRecord, eyre::Report> {
        self.event
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing event in scenario world"))
    }

    /// Returns the acting context of the event owner with full permissions.
    pub fn owner_actor(&self) -> Result<ActorContext, eyre::Report> {
        let event = self.event()?;
        Ok(ActorContext::new(event.created_by()).with_permissions([
            Permission::create_task(),
            Permission::update_task(),
            Permission::assign_task(),
            Permission::approve_task(),
            Permission::block_task(),
        ]))
    }

    /// Returns the acting context of a registered person.
    pub fn person_actor(&self, name: &str) -> Result<ActorContext, eyre::Report> {
        let person = self
            .people
            .get(name)
            .ok_or_else(|| eyre::eyre!("unknown person {name} in scenario world"))?;
        Ok(ActorContext::new(person.id()))
    }

    /// Registers a person in the event's tenant, reusing existing entries.
    pub fn register_person(&mut self, name: &str) -> Result<UserRecord, eyre::Report> {
        if let Some(person) = self.people.get(name) {
            return Ok(person.clone());
        }
        let tenant_id = self.event()?.tenant_id();
        let person = UserRecord::new(UserId::new(), tenant_id, name);
        self.users
            .insert(person.clone())
            .map_err(|err| eyre::eyre!("seed user: {err}"))?;
        self.people.insert(name.to_owned(), person.clone());
        Ok(person)
    }
}

impl Default for TaskWorkflowWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns a fixed scenario timestamp at the given hour.
#[must_use]
pub fn hour(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0)
        .single()
        .expect("valid scenario timestamp")
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskWorkflowWorld {
    TaskWorkflowWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
