//! Ticket lifecycle service.
//!
//! Implements create, update, get, list and delete against a
//! [`KeyValueStore`]. Each call touches a single ticket key (except `list`)
//! and issues its existence check before any mutating command, so a failed
//! call never leaves a partial record behind.
//!
//! # Store calls per operation
//!
//! | Operation | Calls |
//! |---|---|
//! | `create` | set all fields, set expiry, read back |
//! | `update` | exists, read (audit), set changed fields, read back |
//! | `get` | read |
//! | `list` | list keys, read each |
//! | `delete` | exists, read (audit), delete |
//!
//! Concurrent writers on the same id are not serialised here; the store's
//! last write wins.

use crate::environment::Clock;
use crate::error::{Result, TicketError};
use crate::store::KeyValueStore;
use crate::summary::TicketSummary;
use crate::ticket::{NewTicket, Ticket, TicketUpdate, TicketUpdateRequest, format_timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Default ticket expiry: two weeks.
pub const DEFAULT_TICKET_TTL: Duration = Duration::from_secs(14 * 24 * 60 * 60);

/// How absent update fields are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateMode {
    /// Absent fields are written as `""`.
    #[default]
    Overwrite,
    /// Absent fields keep their stored value.
    Sparse,
}

impl fmt::Display for UpdateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overwrite => f.write_str("overwrite"),
            Self::Sparse => f.write_str("sparse"),
        }
    }
}

impl FromStr for UpdateMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "overwrite" => Ok(Self::Overwrite),
            "sparse" => Ok(Self::Sparse),
            other => Err(format!("unknown update mode `{other}`")),
        }
    }
}

/// Lifecycle settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Expiry applied to every newly created ticket
    pub ticket_ttl: Duration,
    /// Treatment of absent update fields
    pub update_mode: UpdateMode,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            ticket_ttl: DEFAULT_TICKET_TTL,
            update_mode: UpdateMode::default(),
        }
    }
}

impl LifecycleConfig {
    /// Set the ticket expiry.
    #[must_use]
    pub const fn with_ticket_ttl(mut self, ticket_ttl: Duration) -> Self {
        self.ticket_ttl = ticket_ttl;
        self
    }

    /// Set the update mode.
    #[must_use]
    pub const fn with_update_mode(mut self, update_mode: UpdateMode) -> Self {
        self.update_mode = update_mode;
        self
    }
}

/// Ticket lifecycle operations over an injected store handle.
pub struct TicketService<S> {
    store: Arc<S>,
    clock: Arc<dyn Clock>,
    config: LifecycleConfig,
}

impl<S> Clone for TicketService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            clock: Arc::clone(&self.clock),
            config: self.config,
        }
    }
}

impl<S: KeyValueStore> TicketService<S> {
    /// Create a service over `store`.
    pub fn new(store: Arc<S>, clock: Arc<dyn Clock>, config: LifecycleConfig) -> Self {
        Self {
            store,
            clock,
            config,
        }
    }

    /// The injected store handle.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Create a ticket, overwriting any ticket already stored under the same id.
    ///
    /// # Errors
    ///
    /// - [`TicketError::Validation`] if `title` or `status` is empty
    /// - [`TicketError::Store`] if any store call fails
    pub async fn create(&self, input: NewTicket) -> Result<Ticket> {
        input.validate()?;

        let id = if input.id.is_empty() {
            Uuid::new_v4().to_string()
        } else {
            input.id
        };
        let now = format_timestamp(self.clock.now());

        let ticket = Ticket {
            id,
            title: input.title,
            status: input.status,
            details: input.details.unwrap_or_default(),
            created_date: now.clone(),
            updated_date: now,
        };

        self.store.fields_set(&ticket.id, &ticket.to_fields()).await?;
        self.store
            .key_set_expiry(&ticket.id, self.config.ticket_ttl.as_secs())
            .await?;

        let created = self
            .fetch(&ticket.id)
            .await?
            .ok_or_else(|| TicketError::not_found(&ticket.id))?;

        tracing::info!(
            ticket_id = %created.id,
            ttl_seconds = self.config.ticket_ttl.as_secs(),
            ticket = ?created,
            "Created ticket"
        );

        Ok(created)
    }

    /// Apply `request` to an existing ticket.
    ///
    /// `id` and `created_date` are never written and the expiry is left as set
    /// at creation.
    ///
    /// # Errors
    ///
    /// - [`TicketError::NotFound`] if no ticket is stored under `id`
    /// - [`TicketError::Store`] if any store call fails
    pub async fn update(&self, id: &str, request: TicketUpdateRequest) -> Result<Ticket> {
        if !self.store.key_exists(id).await? {
            return Err(TicketError::not_found(id));
        }

        let changes = TicketUpdate::resolve(
            request,
            self.config.update_mode,
            format_timestamp(self.clock.now()),
        );
        let original = self.store.fields_get_all(id).await?;

        self.store.fields_set(id, &changes.to_fields()).await?;

        let updated = self
            .fetch(id)
            .await?
            .ok_or_else(|| TicketError::not_found(id))?;

        tracing::info!(
            ticket_id = %id,
            original = ?original,
            updated = ?updated,
            "Updated ticket"
        );

        Ok(updated)
    }

    /// Read one ticket.
    ///
    /// # Errors
    ///
    /// - [`TicketError::NotFound`] if no fields are stored under `id`
    /// - [`TicketError::Decode`] if the stored record is incomplete
    /// - [`TicketError::Store`] if the store call fails
    pub async fn get(&self, id: &str) -> Result<Ticket> {
        let ticket = self
            .fetch(id)
            .await?
            .ok_or_else(|| TicketError::not_found(id))?;

        tracing::debug!(ticket_id = %id, "Fetched ticket");
        Ok(ticket)
    }

    /// Snapshot of every stored ticket, in store enumeration order.
    ///
    /// Keys that expire between enumeration and read are skipped.
    ///
    /// # Errors
    ///
    /// - [`TicketError::Decode`] if a stored record is incomplete
    /// - [`TicketError::Store`] if any store call fails
    pub async fn list(&self) -> Result<Vec<Ticket>> {
        let keys = self.store.keys_list("*").await?;
        let mut tickets = Vec::with_capacity(keys.len());

        for key in &keys {
            if let Some(ticket) = self.fetch(key).await? {
                tickets.push(ticket);
            }
        }

        tracing::debug!(
            key_count = keys.len(),
            ticket_count = tickets.len(),
            "Listed tickets"
        );

        Ok(tickets)
    }

    /// Delete a ticket outright.
    ///
    /// # Errors
    ///
    /// - [`TicketError::NotFound`] if no ticket is stored under `id`
    /// - [`TicketError::Store`] if any store call fails
    pub async fn delete(&self, id: &str) -> Result<()> {
        if !self.store.key_exists(id).await? {
            return Err(TicketError::not_found(id));
        }

        let ticket = self.store.fields_get_all(id).await?;

        if !self.store.key_delete(id).await? {
            // Expired between the existence check and the delete.
            return Err(TicketError::not_found(id));
        }

        tracing::info!(ticket_id = %id, ticket = ?ticket, "Deleted ticket");
        Ok(())
    }

    /// Open tickets created on `date`, grouped by status.
    ///
    /// # Errors
    ///
    /// Same as [`TicketService::list`].
    pub async fn summary(&self, date: NaiveDate) -> Result<TicketSummary> {
        let tickets = self.list().await?;
        Ok(TicketSummary::from_tickets(date, &tickets))
    }

    /// [`TicketService::summary`] for the current day.
    ///
    /// # Errors
    ///
    /// Same as [`TicketService::list`].
    pub async fn summary_today(&self) -> Result<TicketSummary> {
        self.summary(self.clock.now().date_naive()).await
    }

    async fn fetch(&self, id: &str) -> Result<Option<Ticket>> {
        let stored = self.store.fields_get_all(id).await?;
        if stored.is_empty() {
            return Ok(None);
        }
        Ticket::from_fields(id, &stored).map(Some)
    }
}
