//! HTTP request handlers.
//!
//! - [`tickets`]: ticket CRUD and the daily summary
//! - [`health`]: root greeting, liveness and readiness probes

pub mod health;
pub mod tickets;
