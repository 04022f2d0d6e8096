//! Application state management

use std::sync::Arc;

use tracing::info;

use crate::errors::ClientError;
use crate::http::client::HttpClient;
use crate::session::SessionContext;
use crate::store::reconciler::Reconciler;

/// Main application state
pub struct AppState {
    /// HTTP client for backend communication
    pub http_client: Arc<HttpClient>,

    /// Explicit session context shared by all backend calls
    pub session: Arc<SessionContext>,

    /// Owner of the canonical deployment collection
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    /// Initialize application state
    pub fn init(backend_base_url: &str) -> Result<Self, ClientError> {
        info!("Initializing application state...");

        let http_client = Arc::new(HttpClient::new(backend_base_url)?);
        let session = Arc::new(SessionContext::new());
        let reconciler = Arc::new(Reconciler::new());

        Ok(Self {
            http_client,
            session,
            reconciler,
        })
    }

    /// Tear down the session: clear the canonical collection and the login
    pub fn end_session(&self) {
        info!("Ending session...");
        self.reconciler.clear();
        self.session.clear_session();
    }
}
