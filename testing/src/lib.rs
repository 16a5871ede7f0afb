//! # Ticketmaster Testing
//!
//! Testing utilities for the Ticketmaster service.
//!
//! This crate provides:
//! - [`InMemoryStore`]: a `KeyValueStore` kept in process memory, with expiry
//!   bookkeeping, simulated expiry and failure injection
//! - Deterministic clocks ([`FixedClock`], [`StepClock`])
//! - Fixtures for common ticket inputs
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use ticketmaster_core::{LifecycleConfig, TicketService};
//! use ticketmaster_testing::{InMemoryStore, test_clock};
//!
//! #[tokio::test]
//! async fn creates_ticket() {
//!     let store = Arc::new(InMemoryStore::new());
//!     let service = TicketService::new(store.clone(), Arc::new(test_clock()), LifecycleConfig::default());
//!
//!     let ticket = service.create(fixtures::new_ticket("123455")).await.unwrap();
//!     assert_eq!(store.ttl(&ticket.id), Some(1_209_600));
//! }
//! ```

pub mod memory_store;

use chrono::{DateTime, Duration, Utc};
use ticketmaster_core::environment::Clock;

/// Deterministic clocks.
pub mod mocks {
    use super::{Clock, DateTime, Duration, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use ticketmaster_testing::mocks::FixedClock;
    /// use ticketmaster_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// assert_eq!(clock.now(), clock.now());
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Clock that advances by a fixed step on every reading.
    ///
    /// The first call returns `start`, the next `start + step`, and so on.
    /// Lets tests observe `updated_date` moving past `created_date` without
    /// sleeping.
    #[derive(Debug)]
    pub struct StepClock {
        start: DateTime<Utc>,
        step: Duration,
        ticks: AtomicI64,
    }

    impl StepClock {
        /// Create a stepping clock.
        #[must_use]
        pub const fn new(start: DateTime<Utc>, step: Duration) -> Self {
            Self {
                start,
                step,
                ticks: AtomicI64::new(0),
            }
        }
    }

    impl Clock for StepClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            let offset = self
                .step
                .checked_mul(i32::try_from(tick).unwrap_or(i32::MAX))
                .unwrap_or(Duration::MAX);
            self.start.checked_add_signed(offset).unwrap_or(DateTime::<Utc>::MAX_UTC)
        }
    }

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    #[must_use]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(test_epoch())
    }

    /// 2025-01-01 00:00:00 UTC.
    #[must_use]
    pub fn test_epoch() -> DateTime<Utc> {
        DateTime::<Utc>::from_timestamp(1_735_689_600, 0).unwrap_or_default()
    }
}

/// Common inputs and test setup.
pub mod fixtures {
    use ticketmaster_core::NewTicket;

    /// The reference creation payload: `{id, title: "Test Ticket", status: "Open"}`.
    #[must_use]
    pub fn new_ticket(id: &str) -> NewTicket {
        NewTicket::new("Test Ticket", "Open").with_id(id)
    }

    /// Install a test-friendly `tracing` subscriber.
    ///
    /// Safe to call from every test; only the first call installs.
    pub fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .try_init();
    }
}

// Re-export commonly used items
pub use memory_store::{InMemoryStore, StoreCall};
pub use mocks::{FixedClock, StepClock, test_clock, test_epoch};
