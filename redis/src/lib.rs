//! Redis-backed key-value store for Ticketmaster.
//!
//! Each ticket is a Redis hash keyed by the ticket id:
//!
//! ```text
//! HSET 123455 id 123455 title "Test Ticket" status Open details "" \
//!      created_date "2025-01-01 00:00:00" updated_date "2025-01-01 00:00:00"
//! EXPIRE 123455 1209600
//! ```
//!
//! The store holds one [`ConnectionManager`], opened once at startup and
//! cloned per command. The manager reconnects on its own after a dropped
//! connection; individual commands are never retried here.
//!
//! # Example
//!
//! ```no_run
//! use ticketmaster_redis::RedisStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RedisStore::connect("redis://127.0.0.1:6379").await?;
//! # Ok(())
//! # }
//! ```

use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, RedisError};
use ticketmaster_core::{Fields, KeyValueStore, StoreError};

/// Key-value store over a single Redis endpoint.
#[derive(Clone)]
pub struct RedisStore {
    /// Connection manager (cheap to clone, shares one multiplexed connection).
    conn_manager: ConnectionManager,
}

impl RedisStore {
    /// Connect to Redis.
    ///
    /// # Arguments
    ///
    /// * `redis_url` - Redis connection URL (e.g., "redis://127.0.0.1:6379")
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Connection`] if the URL is invalid or the server
    /// cannot be reached.
    pub async fn connect(redis_url: &str) -> Result<Self, StoreError> {
        let client = Client::open(redis_url).map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis client: {e}"))
        })?;

        let conn_manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::Connection(format!("Failed to create Redis connection manager: {e}"))
        })?;

        tracing::info!("Redis connection established");
        Ok(Self { conn_manager })
    }

    fn conn(&self) -> ConnectionManager {
        self.conn_manager.clone()
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore").finish_non_exhaustive()
    }
}

/// Classify a Redis failure.
fn store_error(command: &str, err: &RedisError) -> StoreError {
    if err.is_io_error()
        || err.is_connection_refusal()
        || err.is_connection_dropped()
        || err.is_timeout()
    {
        StoreError::Connection(format!("{command}: {err}"))
    } else {
        StoreError::Command(format!("{command}: {err}"))
    }
}

impl KeyValueStore for RedisStore {
    async fn fields_get_all(&self, key: &str) -> Result<Fields, StoreError> {
        let mut conn = self.conn();
        conn.hgetall(key)
            .await
            .map_err(|e| store_error("HGETALL", &e))
    }

    async fn fields_set(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError> {
        if fields.is_empty() {
            return Ok(());
        }

        let mut conn = self.conn();
        let _: () = conn
            .hset_multiple(key, fields)
            .await
            .map_err(|e| store_error("HSET", &e))?;

        tracing::trace!(key = %key, field_count = fields.len(), "HSET");
        Ok(())
    }

    async fn key_delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn();
        let removed: usize = conn.del(key).await.map_err(|e| store_error("DEL", &e))?;
        Ok(removed > 0)
    }

    async fn key_exists(&self, key: &str) -> Result<bool, StoreError> {
        let mut conn = self.conn();
        conn.exists(key)
            .await
            .map_err(|e| store_error("EXISTS", &e))
    }

    async fn keys_list(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let mut conn = self.conn();
        conn.keys(pattern)
            .await
            .map_err(|e| store_error("KEYS", &e))
    }

    async fn key_set_expiry(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let seconds = i64::try_from(ttl_seconds).unwrap_or(i64::MAX);
        let _: () = conn
            .expire(key, seconds)
            .await
            .map_err(|e| store_error("EXPIRE", &e))?;

        tracing::trace!(key = %key, ttl_seconds, "EXPIRE");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.conn();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| store_error("PING", &e))?;
        Ok(())
    }
}
