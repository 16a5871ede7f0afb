//! Axum HTTP boundary for the Ticketmaster service.
//!
//! The boundary parses requests, calls the lifecycle service and maps its
//! typed outcomes to status codes. It holds no ticket logic of its own.
//!
//! # Request Flow
//!
//! 1. **HTTP Request** arrives at an Axum handler
//! 2. **Extract** path id and JSON body (malformed bodies become 422)
//! 3. **Call** the matching `TicketService` operation
//! 4. **Map** `TicketError` to [`AppError`] (404, 422, 500, 503)
//! 5. **Return** the ticket (or ticket list) as JSON
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticketmaster_core::{environment::SystemClock, LifecycleConfig, TicketService};
//! use ticketmaster_web::{build_router, AppState};
//!
//! let service = TicketService::new(store, Arc::new(SystemClock), LifecycleConfig::default());
//! let app = build_router(AppState::new(service));
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

// Re-export key types for convenience
pub use error::AppError;
pub use extractors::{TicketJson, TicketQuery};
pub use middleware::{CORRELATION_ID_HEADER, correlation_id_layer};
pub use routes::build_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
