//! Ticket record model.
//!
//! Four shapes flow through the lifecycle:
//!
//! | Shape | Used for |
//! |---|---|
//! | [`NewTicket`] | creation input |
//! | [`TicketUpdateRequest`] | update input as received from the caller |
//! | [`TicketUpdate`] | exact field set written on update (adds `updated_date`) |
//! | [`Ticket`] | canonical stored and returned form |
//!
//! Stored records are flat string hashes. [`Ticket::from_fields`] decodes them
//! field by field and fails on the first missing required field.

use crate::error::{Result, TicketError};
use crate::lifecycle::UpdateMode;
use crate::store::Fields;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format of `created_date` and `updated_date`.
///
/// Fixed width, so lexicographic order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `at` in [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Stored field names.
pub mod fields {
    /// Ticket id (also the store key)
    pub const ID: &str = "id";
    /// Ticket title
    pub const TITLE: &str = "title";
    /// Free-form status
    pub const STATUS: &str = "status";
    /// Free-form details
    pub const DETAILS: &str = "details";
    /// Creation timestamp
    pub const CREATED_DATE: &str = "created_date";
    /// Last update timestamp
    pub const UPDATED_DATE: &str = "updated_date";
}

/// A ticket as stored and returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique id; the store key
    pub id: String,
    /// Ticket title
    pub title: String,
    /// Free-form status
    pub status: String,
    /// Free-form details
    pub details: String,
    /// Set once at creation
    pub created_date: String,
    /// Set at creation and on every update
    pub updated_date: String,
}

impl Ticket {
    /// Decode a stored field mapping.
    ///
    /// Unknown fields are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Decode`] naming the first missing field.
    pub fn from_fields(key: &str, stored: &Fields) -> Result<Self> {
        let field = |name: &'static str| {
            stored.get(name).cloned().ok_or_else(|| TicketError::Decode {
                id: key.to_string(),
                field: name,
            })
        };

        Ok(Self {
            id: field(fields::ID)?,
            title: field(fields::TITLE)?,
            status: field(fields::STATUS)?,
            details: field(fields::DETAILS)?,
            created_date: field(fields::CREATED_DATE)?,
            updated_date: field(fields::UPDATED_DATE)?,
        })
    }

    /// Every field, in write order.
    #[must_use]
    pub fn to_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            (fields::ID, self.id.as_str()),
            (fields::TITLE, self.title.as_str()),
            (fields::STATUS, self.status.as_str()),
            (fields::DETAILS, self.details.as_str()),
            (fields::CREATED_DATE, self.created_date.as_str()),
            (fields::UPDATED_DATE, self.updated_date.as_str()),
        ]
    }
}

/// Creation input.
///
/// `title` and `status` are required; `details` defaults to `""` and an empty
/// `id` means the caller did not supply one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    /// Ticket title
    pub title: String,
    /// Initial status
    pub status: String,
    /// Optional details (`null` is accepted)
    #[serde(default)]
    pub details: Option<String>,
    /// Caller-chosen id; empty to generate one
    #[serde(default)]
    pub id: String,
}

impl NewTicket {
    /// Creation input with no details and a generated id.
    pub fn new(title: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            status: status.into(),
            details: None,
            id: String::new(),
        }
    }

    /// Use `id` instead of a generated one.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach details.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`TicketError::Validation`] if `title` or `status` is empty.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_empty() {
            return Err(TicketError::Validation("title must not be empty".into()));
        }
        if self.status.is_empty() {
            return Err(TicketError::Validation("status must not be empty".into()));
        }
        Ok(())
    }
}

/// Update input as received from the caller.
///
/// `None` means the field was absent from the request. How absent fields are
/// treated depends on the configured [`UpdateMode`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUpdateRequest {
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New status
    #[serde(default)]
    pub status: Option<String>,
    /// New details
    #[serde(default)]
    pub details: Option<String>,
}

/// Field set written on update.
///
/// Fields left as `None` are not written. `id` and `created_date` are never
/// part of an update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketUpdate {
    /// Title to write
    pub title: Option<String>,
    /// Status to write
    pub status: Option<String>,
    /// Details to write
    pub details: Option<String>,
    /// Always written
    pub updated_date: String,
}

impl TicketUpdate {
    /// Resolve a request into the fields to write.
    ///
    /// In [`UpdateMode::Overwrite`] absent fields become `""`, which blanks the
    /// stored value. In [`UpdateMode::Sparse`] absent fields are left out.
    #[must_use]
    pub fn resolve(request: TicketUpdateRequest, mode: UpdateMode, updated_date: String) -> Self {
        let resolve = |value: Option<String>| match mode {
            UpdateMode::Overwrite => Some(value.unwrap_or_default()),
            UpdateMode::Sparse => value,
        };

        Self {
            title: resolve(request.title),
            status: resolve(request.status),
            details: resolve(request.details),
            updated_date,
        }
    }

    /// Fields to write, in write order.
    #[must_use]
    pub fn to_fields(&self) -> Vec<(&'static str, &str)> {
        [
            (fields::TITLE, self.title.as_deref()),
            (fields::STATUS, self.status.as_deref()),
            (fields::DETAILS, self.details.as_deref()),
            (fields::UPDATED_DATE, Some(self.updated_date.as_str())),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
        .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn stored(ticket: &Ticket) -> Fields {
        ticket
            .to_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample() -> Ticket {
        Ticket {
            id: "123455".into(),
            title: "Test Ticket".into(),
            status: "Open".into(),
            details: String::new(),
            created_date: "2025-01-01 00:00:00".into(),
            updated_date: "2025-01-01 00:00:00".into(),
        }
    }

    #[test]
    fn timestamp_uses_fixed_width_format() {
        let at = Utc.with_ymd_and_hms(2024, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(format_timestamp(at), "2024-03-07 09:05:01");
    }

    #[test]
    fn decodes_stored_fields() {
        let ticket = sample();
        assert_eq!(Ticket::from_fields("123455", &stored(&ticket)).unwrap(), ticket);
    }

    #[test]
    fn decode_ignores_unknown_fields() {
        let mut map = stored(&sample());
        map.insert("priority".into(), "high".into());
        assert!(Ticket::from_fields("123455", &map).is_ok());
    }

    #[test]
    fn decode_reports_missing_field() {
        let mut map = stored(&sample());
        map.remove(fields::CREATED_DATE);

        let err = Ticket::from_fields("123455", &map).unwrap_err();
        assert_eq!(
            err,
            TicketError::Decode {
                id: "123455".into(),
                field: fields::CREATED_DATE,
            }
        );
    }

    #[test]
    fn new_ticket_defaults_optional_fields() {
        let input: NewTicket =
            serde_json::from_str(r#"{"title":"Test Ticket","status":"Open"}"#).unwrap();
        assert_eq!(input.details, None);
        assert_eq!(input.id, "");
    }

    #[test]
    fn new_ticket_accepts_null_details() {
        let input: NewTicket =
            serde_json::from_str(r#"{"title":"a","status":"b","details":null}"#).unwrap();
        assert_eq!(input.details, None);
    }

    #[test]
    fn new_ticket_requires_title_and_status() {
        assert!(serde_json::from_str::<NewTicket>(r#"{"status":"Open"}"#).is_err());
        assert!(serde_json::from_str::<NewTicket>(r#"{"title":"x"}"#).is_err());
    }

    #[test]
    fn validate_rejects_empty_fields() {
        assert!(NewTicket::new("", "Open").validate().is_err());
        assert!(NewTicket::new("Title", "").validate().is_err());
        assert!(NewTicket::new("Title", "Open").validate().is_ok());
    }

    #[test]
    fn validate_accepts_whitespace_only_fields() {
        assert!(NewTicket::new(" ", "Open").validate().is_ok());
        assert!(NewTicket::new("Title", "\t").validate().is_ok());
    }

    #[test]
    fn overwrite_mode_blanks_absent_fields() {
        let request = TicketUpdateRequest {
            status: Some("Closed".into()),
            ..TicketUpdateRequest::default()
        };
        let update = TicketUpdate::resolve(request, UpdateMode::Overwrite, "now".into());

        assert_eq!(
            update.to_fields(),
            vec![
                (fields::TITLE, ""),
                (fields::STATUS, "Closed"),
                (fields::DETAILS, ""),
                (fields::UPDATED_DATE, "now"),
            ]
        );
    }

    #[test]
    fn sparse_mode_skips_absent_fields_but_keeps_explicit_empty() {
        let request = TicketUpdateRequest {
            title: None,
            status: Some("Closed".into()),
            details: Some(String::new()),
        };
        let update = TicketUpdate::resolve(request, UpdateMode::Sparse, "now".into());

        assert_eq!(
            update.to_fields(),
            vec![
                (fields::STATUS, "Closed"),
                (fields::DETAILS, ""),
                (fields::UPDATED_DATE, "now"),
            ]
        );
    }

    #[test]
    fn update_never_writes_identity_fields() {
        let update =
            TicketUpdate::resolve(TicketUpdateRequest::default(), UpdateMode::Overwrite, "t".into());
        let names: Vec<_> = update.to_fields().into_iter().map(|(k, _)| k).collect();
        assert!(!names.contains(&fields::ID));
        assert!(!names.contains(&fields::CREATED_DATE));
    }
}
