//! Error types for ticket lifecycle operations.

use crate::store::StoreError;
use thiserror::Error;

/// Result type alias for lifecycle operations.
pub type Result<T> = std::result::Result<T, TicketError>;

/// Typed outcome of a failed lifecycle operation.
///
/// Every failure is local to a single operation. `Validation` and `NotFound`
/// are raised before any mutating store call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TicketError {
    /// Required creation fields are missing or empty.
    #[error("Invalid ticket: {0}")]
    Validation(String),

    /// No ticket is stored under the requested id.
    #[error("Ticket not found")]
    NotFound {
        /// Requested ticket id
        id: String,
    },

    /// A stored record is missing a required field.
    #[error("Stored ticket {id} is missing field `{field}`")]
    Decode {
        /// Key of the malformed record
        id: String,
        /// Name of the missing field
        field: &'static str,
    },

    /// The backing store is unreachable or failed a command.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl TicketError {
    /// Build a [`TicketError::NotFound`] for `id`.
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    /// Returns `true` if the caller is at fault (bad input or unknown id).
    ///
    /// # Examples
    ///
    /// ```
    /// # use ticketmaster_core::{StoreError, TicketError};
    /// assert!(TicketError::not_found("42").is_client_error());
    /// assert!(!TicketError::Store(StoreError::Connection("refused".into())).is_client_error());
    /// ```
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_hides_id() {
        let err = TicketError::not_found("does-not-exist");
        assert_eq!(err.to_string(), "Ticket not found");
    }

    #[test]
    fn store_errors_pass_through_display() {
        let err = TicketError::from(StoreError::Command("WRONGTYPE".into()));
        assert_eq!(err.to_string(), "Store command failed: WRONGTYPE");
        assert!(!err.is_client_error());
    }

    #[test]
    fn decode_names_the_field() {
        let err = TicketError::Decode {
            id: "7".into(),
            field: "title",
        };
        assert_eq!(err.to_string(), "Stored ticket 7 is missing field `title`");
    }
}
