//! Main application run loop

use std::future::Future;
use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::app::options::{AppOptions, Credentials};
use crate::app::state::AppState;
use crate::errors::ClientError;
use crate::sync::syncer::{self, ApiSnapshotSource};
use crate::workers::stream::{self, ConnectionState};
use crate::workers::renderer;

/// Run the dashboard client until the shutdown signal fires
pub async fn run(
    options: AppOptions,
    credentials: Credentials,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), ClientError> {
    info!("Initializing deploywatch...");

    let (shutdown_tx, _shutdown_rx): (broadcast::Sender<()>, _) = broadcast::channel(1);

    let app_state = Arc::new(AppState::init(&options.backend_base_url)?);

    // Session start: exchange credentials for a bearer token
    let auth = app_state
        .http_client
        .login(&credentials.username, &credentials.password)
        .await?;
    info!("Logged in as {}", auth.username);
    app_state
        .session
        .set_session(auth.token, auth.username, auth.roles);

    let workers = init_workers(&options, app_state.clone(), &shutdown_tx);

    shutdown_signal.await;
    info!("Shutdown signal received, shutting down...");

    let _ = shutdown_tx.send(());
    join_workers(workers, &options).await;

    app_state.end_session();
    Ok(())
}

/// Spawn the stream, syncer, and renderer workers
fn init_workers(
    options: &AppOptions,
    app_state: Arc<AppState>,
    shutdown_tx: &broadcast::Sender<()>,
) -> Vec<(&'static str, JoinHandle<()>)> {
    let (event_tx, event_rx) = mpsc::channel(64);
    let (conn_tx, conn_rx) = watch::channel(ConnectionState::Disconnected);

    let mut workers = Vec::new();

    // Stream worker: persistent connection, reconnects until cancelled
    {
        let stream_options = options.stream.clone();
        let session = app_state.session.clone();
        let backend_url = options.backend_base_url.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            stream::run(
                &stream_options,
                session,
                backend_url,
                event_tx,
                conn_tx,
                Box::pin(async move {
                    let _ = shutdown_rx.recv().await;
                }),
            )
            .await;
        });
        workers.push(("stream", handle));
    }

    // Syncer: one-shot snapshot raced against the event feed
    {
        let source = ApiSnapshotSource::new(app_state.http_client.clone(), app_state.session.clone());
        let reconciler = app_state.reconciler.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            let result = syncer::run(
                &source,
                reconciler.as_ref(),
                event_rx,
                Box::pin(async move {
                    let _ = shutdown_rx.recv().await;
                }),
            )
            .await;
            if let Err(e) = result {
                error!("Initial snapshot failed, live events only: {}", e);
            }
        });
        workers.push(("syncer", handle));
    }

    // Renderer: reprints the projected view on every change
    if options.enable_renderer {
        let renderer_options = options.renderer.clone();
        let reconciler = app_state.reconciler.clone();
        let mut shutdown_rx = shutdown_tx.subscribe();

        let handle = tokio::spawn(async move {
            renderer::run(
                &renderer_options,
                reconciler,
                conn_rx,
                Box::pin(async move {
                    let _ = shutdown_rx.recv().await;
                }),
            )
            .await;
        });
        workers.push(("renderer", handle));
    }

    workers
}

/// Wait for each worker to stop, bounded by the configured delay
async fn join_workers(workers: Vec<(&'static str, JoinHandle<()>)>, options: &AppOptions) {
    for (name, handle) in workers {
        match tokio::time::timeout(options.max_shutdown_delay, handle).await {
            Ok(Ok(())) => debug!("{} worker stopped", name),
            Ok(Err(e)) => error!("{} worker panicked: {}", name, e),
            Err(_) => error!(
                "{} worker did not stop within {:?}",
                name, options.max_shutdown_delay
            ),
        }
    }
}
