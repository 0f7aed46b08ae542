//! End-to-end workflow tests against the in-memory store with a
//! filesystem evidence vault.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use runsheet::workflow::adapters::fs::FsEvidenceVault;
use runsheet::workflow::adapters::memory::{
    InMemoryEventDirectory, InMemoryUserDirectory, InMemoryWorkflowStore,
};
use runsheet::workflow::domain::{
    ActionKind, ActorContext, CostRecord, EventId, EventRecord, EvidenceUpload, LookupError,
    Permission, TaskStatus, TenantId, UserId, UserRecord, WorkflowError,
};
use runsheet::workflow::ports::EvidenceVault;
use runsheet::workflow::services::{
    CreateTaskRequest, TaskActionRequest, TaskWorkflowService,
};

type TestService = TaskWorkflowService<
    InMemoryEventDirectory,
    InMemoryUserDirectory,
    InMemoryWorkflowStore<DefaultClock>,
    DefaultClock,
>;

fn hour(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

struct Fixture {
    service: TestService,
    vault_root: tempfile::TempDir,
    event: EventRecord,
    owner: ActorContext,
    assignee: UserRecord,
}

#[fixture]
fn fixture() -> Fixture {
    let tenant_id = TenantId::new();
    let owner_id = UserId::new();
    let event = EventRecord::new(
        EventId::new(),
        tenant_id,
        "Quayside Food Market",
        owner_id,
        hour(9),
        hour(13),
    );

    let events = Arc::new(InMemoryEventDirectory::new());
    events.insert(event.clone()).expect("seed event");

    let users = Arc::new(InMemoryUserDirectory::new());
    let assignee = UserRecord::new(UserId::new(), tenant_id, "Ffion");
    users
        .insert(UserRecord::new(owner_id, tenant_id, "Priya"))
        .expect("seed owner");
    users.insert(assignee.clone()).expect("seed assignee");

    let vault_root = tempfile::tempdir().expect("temp dir for vault");
    let vault = Arc::new(
        FsEvidenceVault::open(vault_root.path().to_str().expect("utf-8 temp path"))
            .expect("open vault"),
    ) as Arc<dyn EvidenceVault>;
    let store = Arc::new(InMemoryWorkflowStore::new(vault, Arc::new(DefaultClock)));
    let service = TaskWorkflowService::new(events, users, store, Arc::new(DefaultClock));

    let owner = ActorContext::new(owner_id).with_permissions([
        Permission::create_task(),
        Permission::update_task(),
        Permission::assign_task(),
        Permission::approve_task(),
        Permission::block_task(),
    ]);

    Fixture {
        service,
        vault_root,
        event,
        owner,
        assignee,
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_lifecycle_commits_each_step_with_audit_trail(fixture: Fixture) {
    let assignee_actor = ActorContext::new(fixture.assignee.id());

    let created = fixture
        .service
        .create_task(
            &fixture.owner,
            CreateTaskRequest::new(fixture.event.id(), "Set up stalls", hour(10), hour(12))
                .with_assignee(fixture.assignee.id()),
        )
        .await
        .expect("create should succeed");
    let task_id = created.task().id();
    assert_eq!(created.task().status(), TaskStatus::Pending);

    let accepted = fixture
        .service
        .accept_task(
            &assignee_actor,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new(),
        )
        .await
        .expect("accept should succeed");
    assert_eq!(accepted.task().status(), TaskStatus::Progress);

    let submitted = fixture
        .service
        .submit_task(
            &assignee_actor,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new()
                .with_remark("all twelve stalls standing")
                .with_cost(CostRecord::new().with_labour_minutes(150))
                .with_evidence([
                    EvidenceUpload::new("stalls.jpg", b"stall photo".to_vec())
                        .with_content_type("image/jpeg"),
                ]),
        )
        .await
        .expect("submit should succeed");
    assert_eq!(submitted.task().status(), TaskStatus::PendingApproval);

    let approved = fixture
        .service
        .approve_task(
            &fixture.owner,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new(),
        )
        .await
        .expect("approve should succeed");
    assert_eq!(approved.task().status(), TaskStatus::Completed);

    let history = fixture
        .service
        .task_history(task_id)
        .await
        .expect("history should load");
    let actions: Vec<ActionKind> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(
        actions,
        vec![
            ActionKind::Create,
            ActionKind::Accept,
            ActionKind::Submit,
            ActionKind::Approve,
        ]
    );

    let submit_entry = history
        .iter()
        .find(|entry| entry.action() == ActionKind::Submit)
        .expect("submit entry should exist");
    assert_eq!(submit_entry.evidence().len(), 1);
    let evidence = submit_entry
        .evidence()
        .first()
        .expect("submit entry should carry evidence");

    // The vault wrote the bytes under the capability root.
    let on_disk = std::fs::read(fixture.vault_root.path().join(evidence.locator()))
        .expect("evidence bytes should exist on disk");
    assert_eq!(on_disk, b"stall photo");
    assert_eq!(evidence.size_bytes(), 11);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deletion_keeps_the_audit_trail_readable(fixture: Fixture) {
    let created = fixture
        .service
        .create_task(
            &fixture.owner,
            CreateTaskRequest::new(fixture.event.id(), "Hire a generator", hour(10), hour(11))
                .with_assignee(fixture.assignee.id()),
        )
        .await
        .expect("create should succeed");
    let task_id = created.task().id();

    fixture
        .service
        .delete_task(
            &fixture.owner,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new().with_remark("venue supplies power after all"),
        )
        .await
        .expect("delete should succeed");

    let lookup = fixture.service.get_task(fixture.event.id(), task_id).await;
    assert!(matches!(
        lookup,
        Err(WorkflowError::Lookup(LookupError::TaskNotFound(_)))
    ));

    let history = fixture
        .service
        .task_history(task_id)
        .await
        .expect("history should load");
    let actions: Vec<ActionKind> = history.iter().map(|entry| entry.action()).collect();
    assert_eq!(actions, vec![ActionKind::Create, ActionKind::Delete]);
    assert_eq!(
        history
            .last()
            .and_then(|entry| entry.remark()),
        Some("venue supplies power after all")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_work_can_be_deleted_but_not_resumed(fixture: Fixture) {
    let assignee_actor = ActorContext::new(fixture.assignee.id());

    let created = fixture
        .service
        .create_task(
            &fixture.owner,
            CreateTaskRequest::new(fixture.event.id(), "Chalkboard signage", hour(10), hour(11))
                .with_assignee(fixture.assignee.id()),
        )
        .await
        .expect("create should succeed");
    let task_id = created.task().id();

    let rejected = fixture
        .service
        .reject_task(
            &assignee_actor,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new().with_remark("no chalk markers available"),
        )
        .await
        .expect("reject should succeed");
    assert_eq!(rejected.task().status(), TaskStatus::Rejected);

    let resume = fixture
        .service
        .accept_task(
            &assignee_actor,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new(),
        )
        .await;
    assert!(matches!(resume, Err(WorkflowError::State(_))));

    fixture
        .service
        .delete_task(
            &fixture.owner,
            fixture.event.id(),
            task_id,
            TaskActionRequest::new(),
        )
        .await
        .expect("delete should succeed");
}
