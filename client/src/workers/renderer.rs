//! Terminal renderer worker
//!
//! Display plumbing: subscribes to reconciler change notifications and the
//! stream connection state, and reprints the projected view on every
//! change. Reads only the projection, never the canonical map directly.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use colored::Colorize;
use tokio::sync::watch;
use tracing::info;

use crate::models::deployment::{Deployment, DeploymentStatus, HealthStatus};
use crate::store::projector::{project, ProjectedView, ViewFilter};
use crate::store::reconciler::Reconciler;
use crate::workers::stream::ConnectionState;

/// Renderer options
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Filter applied to the projected view
    pub filter: ViewFilter,
}

/// Run the renderer until the reconciler is dropped or shutdown fires
pub async fn run(
    options: &Options,
    reconciler: Arc<Reconciler>,
    mut conn_state: watch::Receiver<ConnectionState>,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) {
    info!("Renderer starting...");

    let mut changes = reconciler.subscribe();

    loop {
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Renderer shutting down...");
                return;
            }
            changed = changes.changed() => {
                if changed.is_err() {
                    info!("Reconciler gone, renderer stopping");
                    return;
                }
                let view = project(&reconciler.records(), &options.filter);
                print_view(&view, *conn_state.borrow());
            }
            changed = conn_state.changed() => {
                if changed.is_err() {
                    info!("Stream worker gone, renderer stopping");
                    return;
                }
                let view = project(&reconciler.records(), &options.filter);
                print_view(&view, *conn_state.borrow());
            }
        }
    }
}

fn print_view(view: &ProjectedView, conn: ConnectionState) {
    println!();
    println!(
        "Deployments  [{}]  total {} | active {} | done {} | failed {}",
        format_connection(conn),
        view.counts.total,
        view.counts.active,
        view.counts.completed,
        view.counts.failed,
    );

    if view.rows.is_empty() {
        println!("  (no deployments match)");
        return;
    }

    for deployment in &view.rows {
        println!("  {}", format_row(deployment));
    }
}

fn format_connection(conn: ConnectionState) -> String {
    match conn {
        ConnectionState::Connected => "live".green().to_string(),
        ConnectionState::Connecting => "connecting".yellow().to_string(),
        ConnectionState::Disconnected => "disconnected".red().to_string(),
        ConnectionState::SessionEnded => "ended".dimmed().to_string(),
    }
}

fn format_row(deployment: &Deployment) -> String {
    let status = match deployment.status {
        DeploymentStatus::Pending => "PENDING".yellow(),
        DeploymentStatus::InProgress => "IN_PROGRESS".cyan(),
        DeploymentStatus::Completed => "COMPLETED".green(),
        DeploymentStatus::Failed => "FAILED".red(),
    };
    let health = match deployment.health_status {
        HealthStatus::Healthy => "healthy".green(),
        HealthStatus::Unhealthy => "unhealthy".red(),
        HealthStatus::Unknown => "unknown".dimmed(),
    };
    let updated = deployment
        .updated_at
        .as_deref()
        .map(format_time_ago)
        .unwrap_or_else(|| "unknown".to_string());

    format!(
        "#{:<5} {:<24} {:<12} {:<10} {}",
        deployment.id, deployment.name, status, health, updated
    )
}

/// Compact "time ago" rendering of an ISO-8601 timestamp
fn format_time_ago(iso: &str) -> String {
    let Ok(parsed) = DateTime::parse_from_rfc3339(iso) else {
        return iso.to_string();
    };
    let elapsed = Utc::now().signed_duration_since(parsed.with_timezone(&Utc));
    let seconds = elapsed.num_seconds();

    if seconds < 60 {
        "just now".to_string()
    } else if seconds < 3600 {
        format!("{}m ago", seconds / 60)
    } else if seconds < 86400 {
        format!("{}h ago", seconds / 3600)
    } else if seconds < 604800 {
        format!("{}d ago", seconds / 86400)
    } else {
        parsed.format("%Y-%m-%d %H:%M").to_string()
    }
}
