//! Deployment models

use serde::{Deserialize, Serialize};

/// A deployment record as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    /// Unique deployment ID, assigned by the server
    pub id: i64,

    /// Deployment name
    pub name: String,

    /// Free-form description
    pub description: String,

    /// Source repository URL
    #[serde(default)]
    pub repository_url: Option<String>,

    /// Branch being deployed
    #[serde(default)]
    pub branch: Option<String>,

    /// URL the deployed service answers on
    #[serde(default)]
    pub service_url: Option<String>,

    /// CI workflow run, once the backend has associated one
    #[serde(default)]
    pub workflow_run_id: Option<i64>,

    /// Current status, server-authoritative
    pub status: DeploymentStatus,

    /// Current health, server-authoritative
    #[serde(default)]
    pub health_status: HealthStatus,

    /// Creation timestamp (ISO-8601), server-assigned
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO-8601), server-assigned
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Deployment lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeploymentStatus {
    Pending,
    InProgress,
    Completed,
    Failed,
}

impl DeploymentStatus {
    /// Wire representation, also used for the `?status=` query parameter
    pub fn as_str(&self) -> &'static str {
        match self {
            DeploymentStatus::Pending => "PENDING",
            DeploymentStatus::InProgress => "IN_PROGRESS",
            DeploymentStatus::Completed => "COMPLETED",
            DeploymentStatus::Failed => "FAILED",
        }
    }
}

impl std::str::FromStr for DeploymentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PENDING" => Ok(DeploymentStatus::Pending),
            "IN_PROGRESS" => Ok(DeploymentStatus::InProgress),
            "COMPLETED" => Ok(DeploymentStatus::Completed),
            "FAILED" => Ok(DeploymentStatus::Failed),
            _ => Err(format!("Invalid deployment status: {}", s)),
        }
    }
}

/// Deployment health status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
    #[default]
    Unknown,
}

/// Payload for creating a new deployment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentRequest {
    pub name: String,
    pub description: String,
    pub repository_url: String,
    pub branch: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_url: Option<String>,
    pub status: DeploymentStatus,
}

impl DeploymentRequest {
    /// New deployments always start out pending; the server drives them from there.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        repository_url: impl Into<String>,
        branch: impl Into<String>,
        service_url: Option<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            repository_url: repository_url.into(),
            branch: branch.into(),
            service_url,
            status: DeploymentStatus::Pending,
        }
    }
}
