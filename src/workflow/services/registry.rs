//! Lookup table from action kinds to strategy instances.

use super::strategies::{
    AcceptTaskStrategy, ApproveTaskStrategy, AssignTaskStrategy, BlockTaskStrategy,
    CreateTaskStrategy, DeleteTaskStrategy, RejectTaskStrategy, SubmitTaskStrategy,
    TaskActionStrategy, UpdateTaskStrategy,
};
use crate::workflow::domain::ActionKind;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry mapping each action kind to its strategy.
///
/// Built once at startup. Lookup never panics; a missing entry is an
/// engine configuration defect the orchestrator reports as such, not a
/// user-facing error.
#[derive(Clone)]
pub struct TaskActionRegistry {
    strategies: HashMap<ActionKind, Arc<dyn TaskActionStrategy>>,
}

impl TaskActionRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            strategies: HashMap::new(),
        }
    }

    /// Creates a registry holding all nine built-in strategies.
    #[must_use]
    pub fn with_builtin_strategies() -> Self {
        Self::empty()
            .register(Arc::new(CreateTaskStrategy))
            .register(Arc::new(UpdateTaskStrategy))
            .register(Arc::new(DeleteTaskStrategy))
            .register(Arc::new(AssignTaskStrategy))
            .register(Arc::new(AcceptTaskStrategy))
            .register(Arc::new(RejectTaskStrategy))
            .register(Arc::new(SubmitTaskStrategy))
            .register(Arc::new(ApproveTaskStrategy))
            .register(Arc::new(BlockTaskStrategy))
    }

    /// Registers a strategy under its own action kind, replacing any
    /// previous registration for that kind.
    #[must_use]
    pub fn register(mut self, strategy: Arc<dyn TaskActionStrategy>) -> Self {
        self.strategies.insert(strategy.kind(), strategy);
        self
    }

    /// Returns the strategy registered for the action kind, if any.
    #[must_use]
    pub fn get(&self, kind: ActionKind) -> Option<Arc<dyn TaskActionStrategy>> {
        self.strategies.get(&kind).cloned()
    }
}

impl Default for TaskActionRegistry {
    fn default() -> Self {
        Self::with_builtin_strategies()
    }
}
