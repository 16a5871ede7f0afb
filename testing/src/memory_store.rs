//! In-memory key-value store for tests.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use ticketmaster_core::{Fields, KeyValueStore, StoreError};

/// A store command as observed by [`InMemoryStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    /// `fields_get_all(key)`
    FieldsGetAll(String),
    /// `fields_set(key, field names)`
    FieldsSet(String, Vec<String>),
    /// `key_delete(key)`
    KeyDelete(String),
    /// `key_exists(key)`
    KeyExists(String),
    /// `keys_list(pattern)`
    KeysList(String),
    /// `key_set_expiry(key, ttl_seconds)`
    KeySetExpiry(String, u64),
    /// `ping()`
    Ping,
}

impl StoreCall {
    /// Whether the command changes stored data.
    #[must_use]
    pub const fn is_mutation(&self) -> bool {
        matches!(
            self,
            Self::FieldsSet(..) | Self::KeyDelete(_) | Self::KeySetExpiry(..)
        )
    }
}

#[derive(Debug, Default)]
struct Inner {
    hashes: HashMap<String, Fields>,
    expiries: HashMap<String, u64>,
    calls: Vec<StoreCall>,
    vanish_before_delete: HashSet<String>,
    failures_remaining: usize,
    unavailable: bool,
}

/// In-memory `KeyValueStore`.
///
/// Behaves like a hash-oriented key-value engine with two simplifications:
/// expiries are recorded but never elapse on their own (use
/// [`InMemoryStore::expire_now`]), and key enumeration order is the
/// `HashMap` order. An expiry of zero seconds removes the key at once, as
/// Redis does. Every command is recorded for later inspection.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `call` and apply any injected failure.
    fn begin(&self, call: StoreCall) -> Result<MutexGuard<'_, Inner>, StoreError> {
        let mut inner = self.lock();
        inner.calls.push(call);

        if inner.unavailable {
            return Err(StoreError::Connection("store unavailable".into()));
        }
        if inner.failures_remaining > 0 {
            inner.failures_remaining -= 1;
            return Err(StoreError::Command("injected failure".into()));
        }
        Ok(inner)
    }

    /// Make the next `count` commands fail with [`StoreError::Command`].
    pub fn fail_next(&self, count: usize) {
        self.lock().failures_remaining = count;
    }

    /// Make every command fail with [`StoreError::Connection`] until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.lock().unavailable = unavailable;
    }

    /// Drop `key` as if its expiry had elapsed.
    pub fn expire_now(&self, key: &str) {
        let mut inner = self.lock();
        inner.hashes.remove(key);
        inner.expiries.remove(key);
    }

    /// Drop `key` just before the next `key_delete` on it runs, as if it
    /// expired between an existence check and the delete.
    pub fn vanish_before_delete(&self, key: &str) {
        self.lock().vanish_before_delete.insert(key.to_string());
    }

    /// Remaining expiry recorded for `key`, in seconds.
    #[must_use]
    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.lock().expiries.get(key).copied()
    }

    /// Raw fields stored under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<Fields> {
        self.lock().hashes.get(key).cloned()
    }

    /// Store `fields` under `key` directly, bypassing call recording.
    pub fn insert_raw(&self, key: &str, fields: Fields) {
        self.lock().hashes.insert(key.to_string(), fields);
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().hashes.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().hashes.is_empty()
    }

    /// Commands issued so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<StoreCall> {
        self.lock().calls.clone()
    }

    /// Forget recorded commands.
    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }
}

/// Glob match supporting `*` wildcards.
fn matches_pattern(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return key.is_empty();
    };
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        // No wildcard: exact match.
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}

impl KeyValueStore for InMemoryStore {
    async fn fields_get_all(&self, key: &str) -> Result<Fields, StoreError> {
        let inner = self.begin(StoreCall::FieldsGetAll(key.to_string()))?;
        Ok(inner.hashes.get(key).cloned().unwrap_or_default())
    }

    async fn fields_set(&self, key: &str, fields: &[(&str, &str)]) -> Result<(), StoreError> {
        let names = fields.iter().map(|(name, _)| (*name).to_string()).collect();
        let mut inner = self.begin(StoreCall::FieldsSet(key.to_string(), names))?;

        let hash = inner.hashes.entry(key.to_string()).or_default();
        for (name, value) in fields {
            hash.insert((*name).to_string(), (*value).to_string());
        }
        Ok(())
    }

    async fn key_delete(&self, key: &str) -> Result<bool, StoreError> {
        let mut inner = self.begin(StoreCall::KeyDelete(key.to_string()))?;
        if inner.vanish_before_delete.remove(key) {
            inner.hashes.remove(key);
        }
        inner.expiries.remove(key);
        Ok(inner.hashes.remove(key).is_some())
    }

    async fn key_exists(&self, key: &str) -> Result<bool, StoreError> {
        let inner = self.begin(StoreCall::KeyExists(key.to_string()))?;
        Ok(inner.hashes.contains_key(key))
    }

    async fn keys_list(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let inner = self.begin(StoreCall::KeysList(pattern.to_string()))?;
        Ok(inner
            .hashes
            .keys()
            .filter(|key| matches_pattern(pattern, key))
            .cloned()
            .collect())
    }

    async fn key_set_expiry(&self, key: &str, ttl_seconds: u64) -> Result<(), StoreError> {
        let mut inner = self.begin(StoreCall::KeySetExpiry(key.to_string(), ttl_seconds))?;
        if ttl_seconds == 0 {
            inner.hashes.remove(key);
            inner.expiries.remove(key);
        } else if inner.hashes.contains_key(key) {
            inner.expiries.insert(key.to_string(), ttl_seconds);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.begin(StoreCall::Ping).map(drop)
    }
}
