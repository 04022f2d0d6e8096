//! Deployment API client

use crate::errors::ClientError;
use crate::http::client::HttpClient;
use crate::models::deployment::{Deployment, DeploymentRequest, DeploymentStatus};

impl HttpClient {
    /// Fetch the full snapshot of known deployments. Single attempt, no retry.
    pub async fn fetch_deployments(&self, token: &str) -> Result<Vec<Deployment>, ClientError> {
        self.get("/api/deployments", token).await
    }

    /// List branches of a repository the backend can deploy from
    pub async fn fetch_branches(
        &self,
        token: &str,
        repo_url: &str,
    ) -> Result<Vec<String>, ClientError> {
        let encoded: String = url::form_urlencoded::byte_serialize(repo_url.as_bytes()).collect();
        let path = format!("/api/deployments/branches?repoUrl={}", encoded);
        self.get(&path, token).await
    }

    /// Create a new deployment
    pub async fn create_deployment(
        &self,
        token: &str,
        request: &DeploymentRequest,
    ) -> Result<Deployment, ClientError> {
        self.post("/api/deployments", token, request).await
    }

    /// Delete a deployment
    pub async fn delete_deployment(&self, token: &str, id: i64) -> Result<(), ClientError> {
        let path = format!("/api/deployments/{}", id);
        self.delete(&path, token).await
    }

    /// Ask the server to move a deployment to a new status
    pub async fn update_deployment_status(
        &self,
        token: &str,
        id: i64,
        status: DeploymentStatus,
    ) -> Result<Deployment, ClientError> {
        let path = format!("/api/deployments/{}/status?status={}", id, status.as_str());
        self.patch(&path, token).await
    }
}
