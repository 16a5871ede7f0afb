//! Daily status summary.
//!
//! Counts the tickets created on one calendar day that are still open,
//! grouped by status. Statuses `complete` and `resolved` (any case) count as
//! closed and are left out.

use crate::ticket::Ticket;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statuses treated as closed.
pub const CLOSED_STATUSES: [&str; 2] = ["complete", "resolved"];

/// Open tickets created on `date`, counted by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSummary {
    /// Day summarised
    pub date: NaiveDate,
    /// Number of open tickets created that day
    pub total: usize,
    /// Count per status, as stored
    pub by_status: BTreeMap<String, usize>,
}

impl TicketSummary {
    /// Summarise `tickets` for `date`.
    #[must_use]
    pub fn from_tickets<'a>(date: NaiveDate, tickets: impl IntoIterator<Item = &'a Ticket>) -> Self {
        let day = date.format("%Y-%m-%d").to_string();
        let mut by_status = BTreeMap::new();

        for ticket in tickets
            .into_iter()
            .filter(|t| t.created_date.starts_with(&day) && is_open(&t.status))
        {
            *by_status.entry(ticket.status.clone()).or_insert(0) += 1;
        }

        Self {
            date,
            total: by_status.values().sum(),
            by_status,
        }
    }
}

fn is_open(status: &str) -> bool {
    !CLOSED_STATUSES
        .iter()
        .any(|closed| status.eq_ignore_ascii_case(closed))
}
