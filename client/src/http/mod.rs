//! HTTP request layer

pub mod auth;
pub mod client;
pub mod deployments;
