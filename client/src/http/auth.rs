//! Authentication API client

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::errors::ClientError;
use crate::http::client::HttpClient;

/// Credentials for login and registration
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Password change payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

/// Successful login/registration response
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub roles: HashSet<String>,
}

impl HttpClient {
    /// Exchange credentials for a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_public("/api/auth/login", &request).await
    }

    /// Register a new account
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.post_public("/api/auth/register", &request).await
    }

    /// Change the password of the logged-in user
    pub async fn change_password(
        &self,
        token: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), ClientError> {
        let request = ChangePasswordRequest {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        };
        self.post_unit("/api/auth/change-password", token, &request)
            .await
    }
}
