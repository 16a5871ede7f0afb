//! Key-value store boundary.
//!
//! The lifecycle service talks to its backing store through this trait only.
//! The command set mirrors a hash-oriented key-value engine: every ticket is a
//! key holding a flat field → value mapping, and keys may carry an expiry.
//!
//! Implementations:
//! - `RedisStore` (crate `ticketmaster-redis`) for production
//! - `InMemoryStore` (crate `ticketmaster-testing`) for tests

use std::collections::HashMap;
use std::future::Future;
use thiserror::Error;

/// Field mapping held under one key.
pub type Fields = HashMap<String, String>;

/// Failures reported by a store implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("Store connection failed: {0}")]
    Connection(String),

    /// The store was reached but rejected or failed the command.
    #[error("Store command failed: {0}")]
    Command(String),
}

/// Command set consumed from the external key-value store.
///
/// # Implementation Notes
///
/// - `fields_set` is a merge-write: fields not named in the call keep their
///   current value
/// - `fields_get_all` returns an empty mapping for an absent key, never an error
/// - No method retries; failures surface immediately as [`StoreError`]
pub trait KeyValueStore: Send + Sync {
    /// Read every field stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn fields_get_all(&self, key: &str) -> impl Future<Output = Result<Fields, StoreError>> + Send;

    /// Merge `fields` into the mapping stored under `key`, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn fields_set(
        &self,
        key: &str,
        fields: &[(&str, &str)],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete `key`, returning whether it existed.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn key_delete(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// Check whether `key` exists.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn key_exists(&self, key: &str) -> impl Future<Output = Result<bool, StoreError>> + Send;

    /// List keys matching a glob-style `pattern` (`*` lists everything).
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn keys_list(&self, pattern: &str)
    -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;

    /// Expire `key` after `ttl_seconds`.
    ///
    /// # Errors
    ///
    /// Returns error if the store is unreachable or the command fails.
    fn key_set_expiry(
        &self,
        key: &str,
        ttl_seconds: u64,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Round-trip check used by readiness probes.
    ///
    /// # Errors
    ///
    /// Returns error if the store does not answer.
    fn ping(&self) -> impl Future<Output = Result<(), StoreError>> + Send;
}
