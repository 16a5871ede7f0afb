//! Ticketmaster HTTP router.
//!
//! Composes all ticket handlers into a single Axum router.

use crate::handlers::{self, health};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::{Router, routing::get};
use ticketmaster_core::KeyValueStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Create the service router with all endpoints.
///
/// # Routes
///
/// - `GET /` - Greeting
/// - `GET /health` - Liveness
/// - `GET /ready` - Readiness (pings the store)
/// - `POST /tickets/` - Create a ticket
/// - `GET /tickets/` - List tickets
/// - `GET /tickets/:id/` - Get a ticket
/// - `PUT /tickets/:id/` - Update a ticket
/// - `DELETE /tickets/:id/` - Delete a ticket
/// - `GET /summary/?date=YYYY-MM-DD` - Open tickets for a day, by status
///
/// Every ticket route also answers without the trailing slash.
///
/// # Example
///
/// ```rust,ignore
/// let service = TicketService::new(store, Arc::new(SystemClock), config);
/// let app = build_router(AppState::new(service));
/// axum::serve(listener, app).await?;
/// ```
pub fn build_router<S: KeyValueStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check::<S>))
        .route(
            "/tickets",
            get(handlers::tickets::list_tickets::<S>).post(handlers::tickets::create_ticket::<S>),
        )
        .route(
            "/tickets/",
            get(handlers::tickets::list_tickets::<S>).post(handlers::tickets::create_ticket::<S>),
        )
        .route(
            "/tickets/:id",
            get(handlers::tickets::get_ticket::<S>)
                .put(handlers::tickets::update_ticket::<S>)
                .delete(handlers::tickets::delete_ticket::<S>),
        )
        .route(
            "/tickets/:id/",
            get(handlers::tickets::get_ticket::<S>)
                .put(handlers::tickets::update_ticket::<S>)
                .delete(handlers::tickets::delete_ticket::<S>),
        )
        .route("/summary", get(handlers::tickets::ticket_summary::<S>))
        .route("/summary/", get(handlers::tickets::ticket_summary::<S>))
        .with_state(state)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
