//! Live state synchronization

pub mod syncer;
