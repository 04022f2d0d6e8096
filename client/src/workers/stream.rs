//! Delta stream worker
//!
//! Owns the persistent WebSocket to the backend and forwards decoded change
//! events. Reconnects with a fixed delay for the lifetime of the session;
//! only explicit cancellation (the shutdown future) stops it.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::{connect_async, tungstenite::protocol::Message};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::ClientError;
use crate::models::event::{decode_frame, DeltaEvent};
use crate::session::SessionContext;

/// Stream worker options
#[derive(Debug, Clone)]
pub struct Options {
    /// Reconnect delay on connection failure
    pub reconnect_delay: Duration,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            reconnect_delay: Duration::from_secs(5),
        }
    }
}

/// Connection lifecycle, published for the display layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    /// Terminal; reached only via explicit cancellation
    SessionEnded,
}

/// Run the delta stream worker until cancelled.
///
/// Decoded events go out on `events`; the current connection state on
/// `conn_state`. Malformed frames are logged and dropped, never fatal.
pub async fn run(
    options: &Options,
    session: Arc<SessionContext>,
    backend_url: String,
    events: mpsc::Sender<DeltaEvent>,
    conn_state: watch::Sender<ConnectionState>,
    mut shutdown_signal: Pin<Box<dyn Future<Output = ()> + Send>>,
) {
    info!("Stream worker starting...");

    let stream_url = match build_stream_url(&backend_url) {
        Ok(url) => url,
        Err(e) => {
            error!("Failed to build stream URL: {}", e);
            let _ = conn_state.send(ConnectionState::Disconnected);
            return;
        }
    };

    loop {
        let _ = conn_state.send(ConnectionState::Connecting);

        let token = match session.token() {
            Ok(t) => t,
            Err(e) => {
                error!("Cannot open stream without a session: {}", e);
                if wait_or_shutdown(options.reconnect_delay, &mut shutdown_signal).await {
                    break;
                }
                continue;
            }
        };

        info!("Connecting to stream: {}", stream_url);

        let request = match http::Request::builder()
            .uri(stream_url.as_str())
            .header("Authorization", format!("Bearer {}", token))
            .header("User-Agent", "deploywatch")
            .body(())
        {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to build stream request: {}", e);
                let _ = conn_state.send(ConnectionState::Disconnected);
                return;
            }
        };

        match connect_async(request).await {
            Ok((mut ws_stream, _)) => {
                info!("Connected to deployment stream");
                let _ = conn_state.send(ConnectionState::Connected);

                loop {
                    tokio::select! {
                        _ = &mut shutdown_signal => {
                            info!("Stream worker shutting down connection...");
                            let _ = ws_stream.close(None).await;
                            let _ = conn_state.send(ConnectionState::SessionEnded);
                            return;
                        }
                        msg = ws_stream.next() => {
                            match msg {
                                Some(Ok(Message::Text(text))) => {
                                    if let Some(event) = handle_frame(&text) {
                                        if events.send(event).await.is_err() {
                                            info!("Event consumer gone, stream worker stopping");
                                            let _ = ws_stream.close(None).await;
                                            let _ = conn_state.send(ConnectionState::SessionEnded);
                                            return;
                                        }
                                    }
                                }
                                Some(Ok(Message::Close(_))) => {
                                    warn!("Server closed the stream");
                                    break;
                                }
                                Some(Err(e)) => {
                                    error!("Stream read error: {}", e);
                                    break;
                                }
                                None => {
                                    warn!("Stream ended");
                                    break;
                                }
                                _ => {}
                            }
                        }
                    }
                }
            }
            Err(e) => {
                error!(
                    "Failed to connect to stream: {}. Retrying in {:?}...",
                    e, options.reconnect_delay
                );
            }
        }

        let _ = conn_state.send(ConnectionState::Disconnected);

        if wait_or_shutdown(options.reconnect_delay, &mut shutdown_signal).await {
            break;
        }
    }

    let _ = conn_state.send(ConnectionState::SessionEnded);
    info!("Stream worker shut down");
}

/// Sleep for the backoff delay; returns true if shutdown fired first
async fn wait_or_shutdown(
    delay: Duration,
    shutdown_signal: &mut Pin<Box<dyn Future<Output = ()> + Send>>,
) -> bool {
    tokio::select! {
        _ = shutdown_signal.as_mut() => true,
        _ = tokio::time::sleep(delay) => false,
    }
}

/// Decode one text frame, logging and discarding anything malformed
fn handle_frame(text: &str) -> Option<DeltaEvent> {
    match decode_frame(text) {
        Ok(event) => {
            debug!("Received {:?}", event);
            Some(event)
        }
        Err(e) => {
            warn!("Dropping malformed frame: {}", e);
            None
        }
    }
}

/// Derive the ws/wss stream URL from the backend base URL
pub fn build_stream_url(backend_url: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(backend_url).map_err(|e| ClientError::ConfigError(e.to_string()))?;

    let scheme = match url.scheme() {
        "http" => "ws",
        "https" => "wss",
        _ => {
            return Err(ClientError::ConfigError(
                "Invalid backend URL scheme".to_string(),
            ))
        }
    };

    url.set_scheme(scheme)
        .map_err(|_| ClientError::ConfigError("Failed to set scheme".to_string()))?;
    url.set_path("/ws");

    Ok(url)
}
