//! Application state for Axum handlers.

use ticketmaster_core::{KeyValueStore, TicketService};

/// Application state shared across all HTTP handlers.
///
/// Holds the lifecycle service, which in turn holds the single store handle
/// opened at startup. Cloning is cheap (reference counted).
pub struct AppState<S> {
    /// Ticket lifecycle operations
    pub tickets: TicketService<S>,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            tickets: self.tickets.clone(),
        }
    }
}

impl<S: KeyValueStore> AppState<S> {
    /// Create a new application state.
    #[must_use]
    pub const fn new(tickets: TicketService<S>) -> Self {
        Self { tickets }
    }
}
