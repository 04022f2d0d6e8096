//! Canonical deployment state and derived views

pub mod projector;
pub mod reconciler;
