//! Deploywatch Library
//!
//! Core modules for the deployment dashboard client.

pub mod app;
pub mod config;
pub mod errors;
pub mod http;
pub mod logs;
pub mod models;
pub mod session;
pub mod store;
pub mod sync;
pub mod workers;
