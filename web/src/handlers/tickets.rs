//! Ticket endpoints.
//!
//! | Method + Path | Handler | Success |
//! |---|---|---|
//! | `POST /tickets/` | [`create_ticket`] | 200 + ticket |
//! | `GET /tickets/` | [`list_tickets`] | 200 + tickets |
//! | `GET /tickets/{id}/` | [`get_ticket`] | 200 + ticket |
//! | `PUT /tickets/{id}/` | [`update_ticket`] | 200 + ticket |
//! | `DELETE /tickets/{id}/` | [`delete_ticket`] | 200 + `{"status":"success"}` |
//! | `GET /summary/` | [`ticket_summary`] | 200 + summary |
//!
//! Unknown ids answer `404 {"detail":"Ticket not found"}`.

use crate::error::AppError;
use crate::extractors::{TicketJson, TicketQuery};
use crate::state::AppState;
use crate::WebResult;
use axum::{
    Json,
    extract::{Path, State},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ticketmaster_core::{
    KeyValueStore, NewTicket, Ticket, TicketError, TicketSummary, TicketUpdateRequest,
};

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    /// Always `"success"`
    pub status: String,
}

/// Query parameters for the summary endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SummaryQuery {
    /// Day to summarise (`YYYY-MM-DD`); defaults to today
    pub date: Option<NaiveDate>,
}

/// Count a lifecycle call by operation and outcome.
fn record<T>(operation: &'static str, result: &Result<T, TicketError>) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(err) if err.is_client_error() => "client_error",
        Err(_) => "error",
    };
    metrics::counter!("tickets.operations.total", "operation" => operation, "outcome" => outcome)
        .increment(1);
}

/// Create a ticket.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8000/tickets/ \
///   -H "Content-Type: application/json" \
///   -d '{"id":"123455","title":"Test Ticket","status":"Open"}'
/// ```
///
/// # Errors
///
/// 422 for a missing or empty `title`/`status`, 503 if the store fails.
pub async fn create_ticket<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    TicketJson(input): TicketJson<NewTicket>,
) -> WebResult<Json<Ticket>> {
    let result = state.tickets.create(input).await;
    record("create", &result);
    Ok(Json(result?))
}

/// List every ticket.
///
/// # Errors
///
/// 500 for a malformed stored record, 503 if the store fails.
pub async fn list_tickets<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
) -> WebResult<Json<Vec<Ticket>>> {
    let result = state.tickets.list().await;
    record("list", &result);
    Ok(Json(result?))
}

/// Fetch one ticket.
///
/// # Errors
///
/// 404 for an unknown id, 503 if the store fails.
pub async fn get_ticket<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ticket_id): Path<String>,
) -> WebResult<Json<Ticket>> {
    let result = state.tickets.get(&ticket_id).await;
    record("get", &result);
    Ok(Json(result?))
}

/// Update a ticket.
///
/// # Example
///
/// ```bash
/// curl -X PUT http://localhost:8000/tickets/123455/ \
///   -H "Content-Type: application/json" \
///   -d '{"title":"Test Ticket Updated","status":"Updated","details":""}'
/// ```
///
/// # Errors
///
/// 404 for an unknown id, 422 for a malformed body, 503 if the store fails.
pub async fn update_ticket<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ticket_id): Path<String>,
    TicketJson(request): TicketJson<TicketUpdateRequest>,
) -> WebResult<Json<Ticket>> {
    let result = state.tickets.update(&ticket_id, request).await;
    record("update", &result);
    Ok(Json(result?))
}

/// Delete a ticket.
///
/// # Errors
///
/// 404 for an unknown id, 503 if the store fails.
pub async fn delete_ticket<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    Path(ticket_id): Path<String>,
) -> WebResult<Json<DeleteResponse>> {
    let result = state.tickets.delete(&ticket_id).await;
    record("delete", &result);
    result?;

    Ok(Json(DeleteResponse {
        status: "success".to_string(),
    }))
}

/// Open tickets created on one day, grouped by status.
///
/// # Example
///
/// ```bash
/// curl http://localhost:8000/summary/?date=2025-01-01
/// ```
///
/// # Errors
///
/// 400 for a malformed `date`, 500 for a malformed stored record, 503 if the
/// store fails.
pub async fn ticket_summary<S: KeyValueStore + 'static>(
    State(state): State<AppState<S>>,
    TicketQuery(query): TicketQuery<SummaryQuery>,
) -> Result<Json<TicketSummary>, AppError> {
    let result = match query.date {
        Some(date) => state.tickets.summary(date).await,
        None => state.tickets.summary_today().await,
    };
    record("summary", &result);
    Ok(Json(result?))
}
