//! Reconciler unit tests

use deploywatch::models::deployment::{Deployment, DeploymentStatus, HealthStatus};
use deploywatch::models::event::DeltaEvent;
use deploywatch::store::reconciler::Reconciler;

fn create_test_deployment(id: i64, name: &str, status: DeploymentStatus) -> Deployment {
    Deployment {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        repository_url: Some("https://example.com/repo.git".to_string()),
        branch: Some("main".to_string()),
        service_url: None,
        workflow_run_id: None,
        status,
        health_status: HealthStatus::Unknown,
        created_at: Some("2026-01-04T12:44:03Z".to_string()),
        updated_at: Some("2026-01-04T12:44:03Z".to_string()),
    }
}

#[test]
fn test_snapshot_then_disjoint_updates_grows_by_event_count() {
    let reconciler = Reconciler::new();

    let snapshot: Vec<Deployment> = (1..=5)
        .map(|id| create_test_deployment(id, &format!("svc-{}", id), DeploymentStatus::Completed))
        .collect();
    reconciler.apply_snapshot(snapshot);
    assert_eq!(reconciler.len(), 5);

    for id in 100..103 {
        reconciler.apply_delta(DeltaEvent::Update(create_test_deployment(
            id,
            &format!("svc-{}", id),
            DeploymentStatus::Pending,
        )));
    }

    assert_eq!(reconciler.len(), 8);
}

#[test]
fn test_delete_of_absent_id_is_a_noop() {
    let reconciler = Reconciler::new();
    reconciler.apply_snapshot(vec![create_test_deployment(
        1,
        "svc-1",
        DeploymentStatus::Pending,
    )]);

    let before = {
        let mut records = reconciler.records();
        records.sort_by_key(|d| d.id);
        records
    };

    reconciler.apply_delta(DeltaEvent::Delete(99));

    let mut after = reconciler.records();
    after.sort_by_key(|d| d.id);
    assert_eq!(before, after);
}

#[test]
fn test_update_is_idempotent() {
    let reconciler = Reconciler::new();
    let deployment = create_test_deployment(3, "svc-3", DeploymentStatus::InProgress);

    reconciler.apply_delta(DeltaEvent::Update(deployment.clone()));
    let once = reconciler.records();

    reconciler.apply_delta(DeltaEvent::Update(deployment));
    let twice = reconciler.records();

    assert_eq!(once, twice);
    assert_eq!(reconciler.len(), 1);
}

#[test]
fn test_delete_is_idempotent() {
    let reconciler = Reconciler::new();
    reconciler.apply_snapshot(vec![create_test_deployment(
        1,
        "svc-1",
        DeploymentStatus::Pending,
    )]);

    reconciler.apply_delta(DeltaEvent::Delete(1));
    assert!(reconciler.is_empty());

    reconciler.apply_delta(DeltaEvent::Delete(1));
    assert!(reconciler.is_empty());
}

#[test]
fn test_update_replaces_the_whole_record() {
    let reconciler = Reconciler::new();
    reconciler.apply_snapshot(vec![
        create_test_deployment(1, "svc-1", DeploymentStatus::Pending),
        create_test_deployment(2, "svc-2", DeploymentStatus::Completed),
    ]);

    let mut replacement = create_test_deployment(1, "svc-1", DeploymentStatus::InProgress);
    replacement.workflow_run_id = Some(42);
    reconciler.apply_delta(DeltaEvent::Update(replacement));

    let updated = reconciler.get(1).unwrap();
    assert_eq!(updated.status, DeploymentStatus::InProgress);
    assert_eq!(updated.workflow_run_id, Some(42));
    assert_eq!(
        reconciler.get(2).unwrap().status,
        DeploymentStatus::Completed
    );
}

#[test]
fn test_snapshot_reapply_fully_replaces() {
    let reconciler = Reconciler::new();
    reconciler.apply_snapshot(vec![
        create_test_deployment(1, "svc-1", DeploymentStatus::Pending),
        create_test_deployment(2, "svc-2", DeploymentStatus::Completed),
    ]);

    reconciler.apply_snapshot(vec![create_test_deployment(
        3,
        "svc-3",
        DeploymentStatus::Failed,
    )]);

    assert_eq!(reconciler.len(), 1);
    assert!(reconciler.get(1).is_none());
    assert!(reconciler.get(3).is_some());
}

// Boundary case, intentional: events carry no ordering token, so a delta
// landing before the snapshot is discarded when the snapshot replaces the
// collection wholesale.
#[test]
fn test_snapshot_overrides_deltas_that_arrived_first() {
    let reconciler = Reconciler::new();

    reconciler.apply_delta(DeltaEvent::Delete(7));
    assert!(reconciler.is_empty());

    reconciler.apply_delta(DeltaEvent::Update(create_test_deployment(
        8,
        "early",
        DeploymentStatus::Pending,
    )));
    assert_eq!(reconciler.len(), 1);

    reconciler.apply_snapshot(vec![create_test_deployment(
        7,
        "svc-7",
        DeploymentStatus::Failed,
    )]);

    assert_eq!(reconciler.len(), 1);
    assert_eq!(reconciler.get(7).unwrap().status, DeploymentStatus::Failed);
    assert!(reconciler.get(8).is_none());
}

#[test]
fn test_clear_empties_the_collection() {
    let reconciler = Reconciler::new();
    reconciler.apply_snapshot(vec![create_test_deployment(
        1,
        "svc-1",
        DeploymentStatus::Pending,
    )]);

    reconciler.clear();
    assert!(reconciler.is_empty());
}

#[tokio::test]
async fn test_every_mutation_notifies_subscribers() {
    let reconciler = Reconciler::new();
    let mut changes = reconciler.subscribe();

    reconciler.apply_snapshot(vec![create_test_deployment(
        1,
        "svc-1",
        DeploymentStatus::Pending,
    )]);
    changes.changed().await.unwrap();

    reconciler.apply_delta(DeltaEvent::Delete(1));
    changes.changed().await.unwrap();

    reconciler.clear();
    changes.changed().await.unwrap();
}
