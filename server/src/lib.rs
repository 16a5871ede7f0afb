//! Ticketmaster service wiring.
//!
//! Configuration loading and process-level telemetry for the `ticketmaster`
//! binary. Ticket behaviour lives in `ticketmaster-core`, the HTTP surface in
//! `ticketmaster-web`.

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]

pub mod config;
pub mod telemetry;

pub use config::Config;
