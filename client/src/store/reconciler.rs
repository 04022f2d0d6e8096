//! Canonical deployment collection
//!
//! Single owner of the authoritative id → deployment map. A one-shot
//! snapshot replaces the map wholesale; stream events are folded in one at
//! a time afterwards. Merge semantics are last-write-by-arrival: events
//! carry no sequence number, so whichever write lands last wins, and a
//! snapshot discards any deltas applied before it.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::watch;
use tracing::debug;

use crate::models::deployment::Deployment;
use crate::models::event::DeltaEvent;

/// Owner of the canonical deployment collection
pub struct Reconciler {
    records: RwLock<HashMap<i64, Deployment>>,
    revision: watch::Sender<u64>,
}

impl Reconciler {
    /// Create an empty collection
    pub fn new() -> Self {
        let (revision, _) = watch::channel(0);
        Self {
            records: RwLock::new(HashMap::new()),
            revision,
        }
    }

    /// Replace the entire collection with a fresh snapshot.
    ///
    /// Idempotent: a repeated snapshot still fully replaces.
    pub fn apply_snapshot(&self, snapshot: Vec<Deployment>) {
        {
            let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
            records.clear();
            for deployment in snapshot {
                records.insert(deployment.id, deployment);
            }
            debug!("Applied snapshot: {} deployments", records.len());
        }
        self.notify();
    }

    /// Fold a single stream event into the collection.
    ///
    /// UPDATE replaces the stored record entirely (or inserts it); DELETE of
    /// an absent id is a silent no-op. Both are idempotent.
    pub fn apply_delta(&self, event: DeltaEvent) {
        {
            let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
            match event {
                DeltaEvent::Update(deployment) => {
                    debug!("Applying UPDATE for deployment {}", deployment.id);
                    records.insert(deployment.id, deployment);
                }
                DeltaEvent::Delete(id) => {
                    debug!("Applying DELETE for deployment {}", id);
                    records.remove(&id);
                }
            }
        }
        self.notify();
    }

    /// Drop everything at session end
    pub fn clear(&self) {
        {
            let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
            records.clear();
        }
        self.notify();
    }

    /// Subscribe to change notifications. The value is a revision counter;
    /// subscribers re-read the collection when it moves.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.revision.subscribe()
    }

    /// Clone out the current records
    pub fn records(&self) -> Vec<Deployment> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.values().cloned().collect()
    }

    /// Look up a single deployment
    pub fn get(&self, id: i64) -> Option<Deployment> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.get(&id).cloned()
    }

    /// Number of deployments currently held
    pub fn len(&self) -> usize {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.len()
    }

    /// Whether the collection is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn notify(&self) {
        self.revision.send_modify(|r| *r += 1);
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new()
    }
}
