//! Ticketmaster HTTP server.
//!
//! # Usage
//!
//! ```bash
//! REDIS_URL=redis://localhost:6379 cargo run --bin ticketmaster
//! ```
//!
//! # API Endpoints
//!
//! - `POST /tickets/` - Create a ticket
//! - `GET /tickets/` - List tickets
//! - `GET /tickets/:id/` - Get a ticket
//! - `PUT /tickets/:id/` - Update a ticket
//! - `DELETE /tickets/:id/` - Delete a ticket
//! - `GET /summary/` - Today's open tickets by status
//! - `GET /health`, `GET /ready` - Probes

use anyhow::Context;
use std::future::IntoFuture;
use std::sync::Arc;
use ticketmaster::{Config, telemetry};
use ticketmaster_core::{TicketService, environment::SystemClock};
use ticketmaster_redis::RedisStore;
use ticketmaster_web::{AppState, build_router};
use tokio::signal;
use tokio::sync::Notify;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if present)
    let _ = dotenvy::dotenv();

    telemetry::init_tracing();

    info!("Starting Ticketmaster HTTP Server");

    let config = Config::from_env();
    info!(
        redis_url = %config.redis.url,
        ticket_ttl_seconds = config.tickets.expiration,
        update_mode = %config.tickets.update_mode,
        "Configuration loaded"
    );

    if let Some(addr) = config.metrics_address() {
        telemetry::install_metrics(addr).context("Failed to install Prometheus exporter")?;
    }

    // Fail fast if the store is unreachable
    info!("Connecting to Redis...");
    let store = RedisStore::connect(&config.redis.url)
        .await
        .context("Failed to connect to Redis")?;
    ticketmaster_core::KeyValueStore::ping(&store)
        .await
        .context("Redis did not answer PING")?;
    info!("Redis connected");

    let service = TicketService::new(Arc::new(store), Arc::new(SystemClock), config.lifecycle());
    let app = build_router(AppState::new(service));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("Server listening on http://{}", addr);

    let shutdown_started = Arc::new(Notify::new());
    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let shutdown_started = Arc::clone(&shutdown_started);
            async move {
                shutdown_signal().await;
                shutdown_started.notify_one();
            }
        })
        .into_future();

    let timeout = config.shutdown_timeout();
    tokio::select! {
        result = server => result.context("Server error")?,
        () = async {
            shutdown_started.notified().await;
            tokio::time::sleep(timeout).await;
        } => {
            warn!(timeout_seconds = timeout.as_secs(), "In-flight requests did not finish in time");
        }
    }

    info!("Server stopped");
    info!("Store connection closed");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM (in production environments)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, shutting down gracefully...");
        },
        () = terminate => {
            info!("Received SIGTERM signal, shutting down gracefully...");
        },
    }
}
