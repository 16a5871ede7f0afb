//! End-to-end HTTP tests against the in-memory store.

#![allow(clippy::unwrap_used, clippy::expect_used)] // Test code can use unwrap/expect

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use std::sync::Arc;
use ticketmaster_core::{LifecycleConfig, Ticket, TicketService, TicketSummary, UpdateMode};
use ticketmaster_testing::{InMemoryStore, test_clock};
use ticketmaster_web::{AppState, build_router};

fn server_with(store: &Arc<InMemoryStore>, config: LifecycleConfig) -> TestServer {
    let service = TicketService::new(Arc::clone(store), Arc::new(test_clock()), config);
    TestServer::new(build_router(AppState::new(service))).expect("test server")
}

fn server(store: &Arc<InMemoryStore>) -> TestServer {
    server_with(store, LifecycleConfig::default())
}

async fn create(server: &TestServer, id: &str) -> Ticket {
    server
        .post("/tickets/")
        .json(&json!({"id": id, "title": "Test Ticket", "status": "Open"}))
        .await
        .json::<Ticket>()
}

#[tokio::test]
async fn root_greets() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store).get("/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"message": "Hello World"}));
}

#[tokio::test]
async fn create_ticket() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .post("/tickets/")
        .json(&json!({"id": "123455", "title": "Test Ticket", "status": "Open"}))
        .await;

    response.assert_status_ok();
    let ticket = response.json::<Ticket>();
    assert_eq!(ticket.id, "123455");
    assert_eq!(ticket.title, "Test Ticket");
    assert_eq!(ticket.status, "Open");
    assert_eq!(ticket.details, "");
    assert_eq!(ticket.created_date, "2025-01-01 00:00:00");
    assert_eq!(ticket.updated_date, ticket.created_date);
}

#[tokio::test]
async fn create_without_id_generates_one() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .post("/tickets")
        .json(&json!({"title": "Printer", "status": "Open", "details": "jammed"}))
        .await;

    response.assert_status_ok();
    let ticket = response.json::<Ticket>();
    assert!(!ticket.id.is_empty());
    assert_eq!(ticket.details, "jammed");
    assert!(store.raw(&ticket.id).is_some());
}

#[tokio::test]
async fn create_missing_title_is_422() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .post("/tickets/")
        .json(&json!({"status": "Open"}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.json::<Value>()["detail"].is_string());
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_empty_status_is_422() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .post("/tickets/")
        .json(&json!({"title": "Test Ticket", "status": ""}))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert!(store.is_empty());
}

#[tokio::test]
async fn create_whitespace_title_is_accepted() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .post("/tickets/")
        .json(&json!({"id": "w", "title": " ", "status": "Open"}))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Ticket>().title, " ");
}

#[tokio::test]
async fn update_ticket() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    create(&server, "123455").await;

    let response = server
        .put("/tickets/123455/")
        .json(&json!({
            "title": "Test Ticket Updated",
            "status": "Updated",
            "details": "",
        }))
        .await;

    response.assert_status_ok();
    let ticket = response.json::<Ticket>();
    assert_eq!(ticket.id, "123455");
    assert_eq!(ticket.title, "Test Ticket Updated");
    assert_eq!(ticket.status, "Updated");
    assert_eq!(ticket.details, "");
}

#[tokio::test]
async fn update_overwrite_mode_blanks_absent_fields() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    create(&server, "t1").await;

    let ticket = server
        .put("/tickets/t1")
        .json(&json!({"status": "Closed"}))
        .await
        .json::<Ticket>();

    assert_eq!(ticket.status, "Closed");
    assert_eq!(ticket.title, "");
}

#[tokio::test]
async fn update_sparse_mode_keeps_absent_fields() {
    let store = Arc::new(InMemoryStore::new());
    let server = server_with(
        &store,
        LifecycleConfig::default().with_update_mode(UpdateMode::Sparse),
    );
    create(&server, "t1").await;

    let ticket = server
        .put("/tickets/t1/")
        .json(&json!({"status": "Closed"}))
        .await
        .json::<Ticket>();

    assert_eq!(ticket.status, "Closed");
    assert_eq!(ticket.title, "Test Ticket");
}

#[tokio::test]
async fn update_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .put("/tickets/missing/")
        .json(&json!({"title": "x", "status": "y"}))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"detail": "Ticket not found"}));
    assert!(store.is_empty());
}

#[tokio::test]
async fn get_ticket() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    let created = create(&server, "123455").await;

    let response = server.get("/tickets/123455/").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Ticket>(), created);
}

#[tokio::test]
async fn get_ticket_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store).get("/tickets/nonexistent_id/").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"detail": "Ticket not found"}));
}

#[tokio::test]
async fn delete_ticket() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    create(&server, "123455").await;

    let response = server.delete("/tickets/123455/").await;

    response.assert_status_ok();
    response.assert_json(&json!({"status": "success"}));
    server
        .get("/tickets/123455/")
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_ticket_not_found() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store).delete("/tickets/nonexistent_id").await;

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_json(&json!({"detail": "Ticket not found"}));
}

#[tokio::test]
async fn list_tickets() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    create(&server, "123455").await;
    create(&server, "123456").await;

    let response = server.get("/tickets/").await;

    response.assert_status_ok();
    let mut ids: Vec<String> = response
        .json::<Vec<Ticket>>()
        .into_iter()
        .map(|t| t.id)
        .collect();
    ids.sort();
    assert_eq!(ids, ["123455", "123456"]);
}

#[tokio::test]
async fn list_empty_store() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store).get("/tickets/").await;

    response.assert_status_ok();
    response.assert_json(&json!([]));
}

#[tokio::test]
async fn list_with_malformed_record_is_500() {
    let store = Arc::new(InMemoryStore::new());
    store.insert_raw(
        "broken",
        [("title".to_string(), "only a title".to_string())]
            .into_iter()
            .collect(),
    );

    let response = server(&store).get("/tickets/").await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn store_outage_is_503() {
    let store = Arc::new(InMemoryStore::new());
    store.set_unavailable(true);

    let response = server(&store).get("/tickets/any/").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn ready_reflects_store() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);

    server.get("/ready").await.assert_status_ok();

    store.set_unavailable(true);
    server
        .get("/ready")
        .await
        .assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn health_is_independent_of_store() {
    let store = Arc::new(InMemoryStore::new());
    store.set_unavailable(true);

    server(&store).get("/health").await.assert_status_ok();
}

#[tokio::test]
async fn summary_groups_open_tickets_by_status() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    for (id, status) in [("a", "Open"), ("b", "Open"), ("c", "In Progress"), ("d", "Resolved")] {
        server
            .post("/tickets/")
            .json(&json!({"id": id, "title": "T", "status": status}))
            .await
            .assert_status_ok();
    }

    let response = server.get("/summary/").add_query_param("date", "2025-01-01").await;

    response.assert_status_ok();
    let summary = response.json::<TicketSummary>();
    assert_eq!(summary.total, 3);
    assert_eq!(summary.by_status.get("Open"), Some(&2));
    assert_eq!(summary.by_status.get("In Progress"), Some(&1));
    assert!(!summary.by_status.contains_key("Resolved"));
}

#[tokio::test]
async fn summary_defaults_to_today() {
    let store = Arc::new(InMemoryStore::new());
    let server = server(&store);
    create(&server, "a").await;

    let summary = server.get("/summary").await.json::<TicketSummary>();
    assert_eq!(summary.date.to_string(), "2025-01-01");
    assert_eq!(summary.total, 1);
}

#[tokio::test]
async fn summary_rejects_bad_date() {
    let store = Arc::new(InMemoryStore::new());
    let response = server(&store)
        .get("/summary/")
        .add_query_param("date", "not-a-date")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert!(response.json::<Value>()["detail"].is_string());
}
