//! View projection unit tests

use deploywatch::models::deployment::{Deployment, DeploymentStatus, HealthStatus};
use deploywatch::store::projector::{project, ViewFilter};

fn create_test_deployment(id: i64, name: &str, status: DeploymentStatus) -> Deployment {
    Deployment {
        id,
        name: name.to_string(),
        description: format!("{} description", name),
        repository_url: None,
        branch: Some("main".to_string()),
        service_url: None,
        workflow_run_id: None,
        status,
        health_status: HealthStatus::Unknown,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn test_rows_are_sorted_descending_by_id() {
    let records = vec![
        create_test_deployment(3, "c", DeploymentStatus::Pending),
        create_test_deployment(1, "a", DeploymentStatus::Pending),
        create_test_deployment(2, "b", DeploymentStatus::Pending),
    ];

    let view = project(&records, &ViewFilter::default());
    let ids: Vec<i64> = view.rows.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_rows_exist_unchanged_in_the_source_records() {
    let records = vec![
        create_test_deployment(1, "api-gateway", DeploymentStatus::Failed),
        create_test_deployment(2, "worker", DeploymentStatus::Completed),
    ];

    let view = project(&records, &ViewFilter::default());
    for row in &view.rows {
        assert!(records.contains(row));
    }
}

#[test]
fn test_search_matches_name_and_description_case_insensitive() {
    let mut with_desc_match = create_test_deployment(2, "worker", DeploymentStatus::Pending);
    with_desc_match.description = "the API billing worker".to_string();

    let records = vec![
        create_test_deployment(1, "Api-Gateway", DeploymentStatus::Pending),
        with_desc_match,
        create_test_deployment(3, "frontend", DeploymentStatus::Pending),
    ];

    let filter = ViewFilter {
        search: "api".to_string(),
        status: None,
    };
    let view = project(&records, &filter);
    let ids: Vec<i64> = view.rows.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[test]
fn test_search_and_status_filter_combine() {
    let records = vec![
        create_test_deployment(3, "api-gateway", DeploymentStatus::Failed),
        create_test_deployment(4, "api-cache", DeploymentStatus::Completed),
    ];

    let filter = ViewFilter {
        search: "api".to_string(),
        status: Some(DeploymentStatus::Failed),
    };
    let view = project(&records, &filter);
    let ids: Vec<i64> = view.rows.iter().map(|d| d.id).collect();
    assert_eq!(ids, vec![3]);
}

#[test]
fn test_empty_filter_passes_everything() {
    let records = vec![
        create_test_deployment(1, "a", DeploymentStatus::Pending),
        create_test_deployment(2, "b", DeploymentStatus::Failed),
    ];

    let view = project(&records, &ViewFilter::default());
    assert_eq!(view.rows.len(), 2);
}

#[test]
fn test_counts_cover_the_whole_collection() {
    let records = vec![
        create_test_deployment(1, "a", DeploymentStatus::Pending),
        create_test_deployment(2, "b", DeploymentStatus::InProgress),
        create_test_deployment(3, "c", DeploymentStatus::Completed),
        create_test_deployment(4, "d", DeploymentStatus::Failed),
        create_test_deployment(5, "e", DeploymentStatus::Failed),
    ];

    let view = project(&records, &ViewFilter::default());
    assert_eq!(view.counts.total, 5);
    assert_eq!(view.counts.active, 2);
    assert_eq!(view.counts.completed, 1);
    assert_eq!(view.counts.failed, 2);
}

#[test]
fn test_counts_are_independent_of_the_filter() {
    let records = vec![
        create_test_deployment(1, "api", DeploymentStatus::Pending),
        create_test_deployment(2, "frontend", DeploymentStatus::Failed),
    ];

    let filter = ViewFilter {
        search: "api".to_string(),
        status: None,
    };
    let view = project(&records, &filter);
    assert_eq!(view.rows.len(), 1);
    assert_eq!(view.counts.total, 2);
    assert_eq!(view.counts.failed, 1);
}

#[test]
fn test_empty_collection_projects_empty() {
    let view = project(&[], &ViewFilter::default());
    assert!(view.rows.is_empty());
    assert_eq!(view.counts.total, 0);
    assert_eq!(view.counts.active, 0);
}
