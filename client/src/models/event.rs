//! Change events pushed by the backend over the stream endpoint

use serde::Deserialize;

use crate::errors::ClientError;
use crate::models::deployment::Deployment;

/// An incremental change to the canonical collection
#[derive(Debug, Clone, PartialEq)]
pub enum DeltaEvent {
    /// Insert or fully replace a deployment
    Update(Deployment),

    /// Remove the deployment with this ID
    Delete(i64),
}

impl DeltaEvent {
    /// ID of the deployment this event concerns
    pub fn id(&self) -> i64 {
        match self {
            DeltaEvent::Update(deployment) => deployment.id,
            DeltaEvent::Delete(id) => *id,
        }
    }
}

/// Wire envelope for stream frames: `{ "type": ..., "payload": ... }`
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    payload: serde_json::Value,
}

/// Decode a single text frame into a delta event.
///
/// Unknown `type` values and undecodable payloads yield a `DecodeError`;
/// the stream worker logs and drops those frames without terminating.
pub fn decode_frame(text: &str) -> Result<DeltaEvent, ClientError> {
    let envelope: Envelope = serde_json::from_str(text)
        .map_err(|e| ClientError::DecodeError(format!("bad envelope: {}", e)))?;

    match envelope.kind.as_str() {
        "UPDATE" => {
            let deployment: Deployment = serde_json::from_value(envelope.payload)
                .map_err(|e| ClientError::DecodeError(format!("bad UPDATE payload: {}", e)))?;
            Ok(DeltaEvent::Update(deployment))
        }
        "DELETE" => {
            let id: i64 = serde_json::from_value(envelope.payload)
                .map_err(|e| ClientError::DecodeError(format!("bad DELETE payload: {}", e)))?;
            Ok(DeltaEvent::Delete(id))
        }
        other => Err(ClientError::DecodeError(format!(
            "unknown event type: {}",
            other
        ))),
    }
}
