//! # Ticketmaster Core
//!
//! Ticket record model and lifecycle rules for the Ticketmaster service.
//!
//! Tickets are persisted as field-value records (one hash per ticket id) in an
//! external key-value store that expires them automatically. This crate owns:
//!
//! - **Record model** ([`ticket`]): the canonical [`Ticket`] plus its creation
//!   and update views, and strict decoding from stored fields
//! - **Store boundary** ([`store`]): the small command set the service needs
//!   from the key-value engine
//! - **Lifecycle service** ([`lifecycle`]): create, update, get, list, delete
//!   and the daily status summary
//! - **Environment** ([`environment`]): the clock abstraction
//!
//! # Lifecycle
//!
//! ```text
//! absent ──create──▶ active ──update*──▶ active ──delete / ttl expiry──▶ absent
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticketmaster_core::{environment::SystemClock, LifecycleConfig, NewTicket, TicketService};
//!
//! let service = TicketService::new(store, Arc::new(SystemClock), LifecycleConfig::default());
//! let ticket = service
//!     .create(NewTicket::new("Printer on fire", "Open"))
//!     .await?;
//! assert_eq!(ticket.created_date, ticket.updated_date);
//! ```

pub mod error;
pub mod lifecycle;
pub mod store;
pub mod summary;
pub mod ticket;

pub use error::{Result, TicketError};
pub use lifecycle::{DEFAULT_TICKET_TTL, LifecycleConfig, TicketService, UpdateMode};
pub use store::{Fields, KeyValueStore, StoreError};
pub use summary::TicketSummary;
pub use ticket::{
    NewTicket, TIMESTAMP_FORMAT, Ticket, TicketUpdate, TicketUpdateRequest, format_timestamp,
};

/// Environment traits for dependency injection.
///
/// All time-dependent behaviour goes through [`Clock`](environment::Clock) so
/// tests can pin or step the current time.
pub mod environment {
    use chrono::{DateTime, Utc};

    /// Clock trait - abstracts time operations for testability
    ///
    /// # Examples
    ///
    /// ```ignore
    /// // Test - fixed time for deterministic tests
    /// struct FixedClock { time: DateTime<Utc> }
    /// impl Clock for FixedClock {
    ///     fn now(&self) -> DateTime<Utc> {
    ///         self.time
    ///     }
    /// }
    /// ```
    pub trait Clock: Send + Sync {
        /// Get the current time
        fn now(&self) -> DateTime<Utc>;
    }

    /// Production clock backed by the system time.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct SystemClock;

    impl Clock for SystemClock {
        fn now(&self) -> DateTime<Utc> {
            Utc::now()
        }
    }
}
