//! Session synchronization loop
//!
//! Runs the one-shot snapshot fetch and the stream event feed concurrently,
//! folding whichever arrives into the reconciler in arrival order. A
//! snapshot landing after early deltas replaces them wholesale; events
//! carry no ordering token, so arrival order is all there is to go on.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::errors::ClientError;
use crate::http::client::HttpClient;
use crate::models::deployment::Deployment;
use crate::models::event::DeltaEvent;
use crate::session::SessionContext;
use crate::store::reconciler::Reconciler;

/// Snapshot source trait for testability
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the complete current set of deployments. Single attempt.
    async fn fetch_all(&self) -> Result<Vec<Deployment>, ClientError>;
}

/// Production snapshot source: the REST API, authenticated with the
/// session's bearer token read at request time
pub struct ApiSnapshotSource {
    http_client: Arc<HttpClient>,
    session: Arc<SessionContext>,
}

impl ApiSnapshotSource {
    pub fn new(http_client: Arc<HttpClient>, session: Arc<SessionContext>) -> Self {
        Self {
            http_client,
            session,
        }
    }
}

#[async_trait]
impl SnapshotSource for ApiSnapshotSource {
    async fn fetch_all(&self) -> Result<Vec<Deployment>, ClientError> {
        let token = self.session.token()?;
        self.http_client.fetch_deployments(&token).await
    }
}

/// Run the synchronization loop until the event feed closes or shutdown
/// fires.
///
/// The snapshot failure path leaves the collection at its prior state; the
/// caller decides whether to surface or re-invoke. Stream events keep
/// flowing either way.
pub async fn run<S: SnapshotSource>(
    source: &S,
    reconciler: &Reconciler,
    mut events: mpsc::Receiver<DeltaEvent>,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) -> Result<(), ClientError> {
    info!("Syncer starting...");

    let mut snapshot_fut = Box::pin(source.fetch_all());
    let mut snapshot_pending = true;
    let mut result = Ok(());

    loop {
        tokio::select! {
            _ = &mut shutdown_signal => {
                info!("Syncer shutting down...");
                break;
            }
            snapshot = &mut snapshot_fut, if snapshot_pending => {
                snapshot_pending = false;
                match snapshot {
                    Ok(records) => {
                        info!("Snapshot received: {} deployments", records.len());
                        reconciler.apply_snapshot(records);
                    }
                    Err(e) => {
                        error!("Snapshot fetch failed: {}", e);
                        result = Err(e);
                    }
                }
            }
            event = events.recv() => {
                match event {
                    Some(event) => reconciler.apply_delta(event),
                    None => {
                        info!("Event feed closed, syncer stopping");
                        break;
                    }
                }
            }
        }
    }

    result
}
