//! Application configuration options

use std::time::Duration;

use crate::workers::{renderer, stream};

/// Main application options
#[derive(Debug, Clone)]
pub struct AppOptions {
    /// Backend base URL
    pub backend_base_url: String,

    /// Stream worker options
    pub stream: stream::Options,

    /// Renderer options
    pub renderer: renderer::Options,

    /// Enable the terminal renderer
    pub enable_renderer: bool,

    /// Maximum wait for workers to stop on shutdown
    pub max_shutdown_delay: Duration,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            backend_base_url: "http://localhost:8080".to_string(),
            stream: stream::Options::default(),
            renderer: renderer::Options::default(),
            enable_renderer: true,
            max_shutdown_delay: Duration::from_secs(10),
        }
    }
}

/// Login credentials for session start
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}
