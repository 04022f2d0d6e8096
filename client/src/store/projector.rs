//! Derived dashboard view
//!
//! Pure projection of the canonical collection through transient
//! search/filter state. Never holds records of its own.

use crate::models::deployment::{Deployment, DeploymentStatus};

/// Transient filter state supplied by the display layer
#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    /// Case-insensitive substring match on name or description; empty
    /// matches everything
    pub search: String,

    /// Restrict to a single status; `None` matches everything
    pub status: Option<DeploymentStatus>,
}

impl ViewFilter {
    /// Whether a record passes this filter
    pub fn matches(&self, deployment: &Deployment) -> bool {
        let search_ok = self.search.is_empty() || {
            let needle = self.search.to_lowercase();
            deployment.name.to_lowercase().contains(&needle)
                || deployment.description.to_lowercase().contains(&needle)
        };
        let status_ok = self.status.is_none_or(|s| deployment.status == s);
        search_ok && status_ok
    }
}

/// Aggregate counts over the whole collection, independent of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewCounts {
    pub total: usize,
    /// PENDING plus IN_PROGRESS
    pub active: usize,
    pub completed: usize,
    pub failed: usize,
}

/// Filtered, sorted rows plus aggregate counts
#[derive(Debug, Clone, Default)]
pub struct ProjectedView {
    /// Records passing the filter, sorted descending by id (newest first)
    pub rows: Vec<Deployment>,
    pub counts: ViewCounts,
}

/// Derive the display view from the canonical records and filter state.
/// O(n) per call; the expected collection size is tens to low hundreds.
pub fn project(records: &[Deployment], filter: &ViewFilter) -> ProjectedView {
    let mut counts = ViewCounts {
        total: records.len(),
        ..Default::default()
    };
    for deployment in records {
        match deployment.status {
            DeploymentStatus::Pending | DeploymentStatus::InProgress => counts.active += 1,
            DeploymentStatus::Completed => counts.completed += 1,
            DeploymentStatus::Failed => counts.failed += 1,
        }
    }

    let mut rows: Vec<Deployment> = records
        .iter()
        .filter(|d| filter.matches(d))
        .cloned()
        .collect();
    rows.sort_by(|a, b| b.id.cmp(&a.id));

    ProjectedView { rows, counts }
}
