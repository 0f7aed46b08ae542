//! Unit tests for the strategy registry.

use crate::workflow::domain::ActionKind;
use crate::workflow::services::TaskActionRegistry;
use crate::workflow::services::strategies::BlockTaskStrategy;
use rstest::rstest;
use std::sync::Arc;

const ALL_ACTIONS: [ActionKind; 9] = [
    ActionKind::Create,
    ActionKind::Update,
    ActionKind::Delete,
    ActionKind::Assign,
    ActionKind::Accept,
    ActionKind::Reject,
    ActionKind::Submit,
    ActionKind::Approve,
    ActionKind::Block,
];

#[rstest]
fn builtin_registry_covers_every_action_kind() {
    let registry = TaskActionRegistry::with_builtin_strategies();

    for action in ALL_ACTIONS {
        let strategy = registry.get(action);
        let Some(strategy) = strategy else {
            panic!("no strategy registered for {action}");
        };
        assert_eq!(strategy.kind(), action);
    }
}

#[rstest]
fn empty_registry_returns_none_instead_of_panicking() {
    let registry = TaskActionRegistry::empty();

    for action in ALL_ACTIONS {
        assert!(registry.get(action).is_none(), "action {action}");
    }
}

#[rstest]
fn register_replaces_previous_entry_for_the_kind() {
    let registry = TaskActionRegistry::empty()
        .register(Arc::new(BlockTaskStrategy))
        .register(Arc::new(BlockTaskStrategy));

    assert!(registry.get(ActionKind::Block).is_some());
    assert!(registry.get(ActionKind::Create).is_none());
}
