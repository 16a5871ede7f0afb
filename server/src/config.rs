//! Configuration management for the Ticketmaster service.
//!
//! Loads configuration from environment variables with sensible defaults.
//! Values that fail to parse fall back to the default.

use serde::{Deserialize, Serialize};
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use ticketmaster_core::{DEFAULT_TICKET_TTL, LifecycleConfig, UpdateMode};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Redis configuration
    pub redis: RedisConfig,
    /// Ticket lifecycle configuration
    pub tickets: TicketConfig,
    /// HTTP server configuration
    pub server: ServerConfig,
}

/// Redis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    /// Redis connection URL
    pub url: String,
}

/// Ticket lifecycle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketConfig {
    /// Seconds a ticket lives after creation
    pub expiration: u64,
    /// How absent update fields are handled
    pub update_mode: UpdateMode,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,
    /// Port to bind to
    pub port: u16,
    /// Prometheus exporter port; no exporter when unset
    pub metrics_port: Option<u16>,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Config {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which returns the raw value of a
    /// variable if set.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            redis: RedisConfig {
                url: lookup("REDIS_URL").unwrap_or_else(|| "redis://localhost:6379".to_string()),
            },
            tickets: TicketConfig {
                expiration: parsed(&lookup, "TICKET_EXPIRATION")
                    .map_or(DEFAULT_TICKET_TTL.as_secs(), check_expiration),
                update_mode: lookup("TICKET_UPDATE_MODE")
                    .map_or_else(UpdateMode::default, |raw| parse_update_mode(&raw)),
            },
            server: ServerConfig {
                host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                port: parsed(&lookup, "PORT").unwrap_or(8000),
                metrics_port: parsed(&lookup, "METRICS_PORT"),
                shutdown_timeout: parsed(&lookup, "SHUTDOWN_TIMEOUT").unwrap_or(30),
            },
        }
    }

    /// Lifecycle settings for [`ticketmaster_core::TicketService`].
    #[must_use]
    pub fn lifecycle(&self) -> LifecycleConfig {
        LifecycleConfig::default()
            .with_ticket_ttl(Duration::from_secs(self.tickets.expiration))
            .with_update_mode(self.tickets.update_mode)
    }

    /// Address the HTTP server binds to.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Address of the Prometheus exporter, if enabled.
    #[must_use]
    pub fn metrics_address(&self) -> Option<SocketAddr> {
        self.server
            .metrics_port
            .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    }

    /// How long to wait for in-flight requests once shutdown starts.
    #[must_use]
    pub const fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.server.shutdown_timeout)
    }
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|s| s.trim().parse().ok())
}

/// A zero expiry makes Redis drop the key as soon as it is written.
fn check_expiration(seconds: u64) -> u64 {
    if seconds == 0 {
        let default_seconds = DEFAULT_TICKET_TTL.as_secs();
        tracing::warn!(default_seconds, "TICKET_EXPIRATION must be positive, using default");
        return default_seconds;
    }
    seconds
}

fn parse_update_mode(raw: &str) -> UpdateMode {
    raw.parse().unwrap_or_else(|err: String| {
        tracing::warn!(value = raw, error = %err, "Unknown TICKET_UPDATE_MODE, using overwrite");
        UpdateMode::Overwrite
    })
}
