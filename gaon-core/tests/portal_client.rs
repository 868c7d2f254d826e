use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde_json::{Value, json};

use gaon_core::calendar::{CalendarWidget, LayoutBody, ViewMode};
use gaon_core::chat::{ChatWidget, ERROR_REPLY};
use gaon_core::client::PortalClient;
use gaon_core::error::GaonError;
use gaon_core::profile::ProfileEditor;
use gaon_core::storage::MemoryStorage;

#[derive(Clone, Default)]
struct Hits {
    timetable: Arc<AtomicUsize>,
}

async fn school_event(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    let month = params.get("month").cloned().unwrap_or_default();
    let compact = month.replace('-', "");
    Json(json!({
        "month": month,
        "schoolName": "Test High School",
        "items": [
            {
                "title": "Opening ceremony",
                "startDate": format!("{compact}02"),
                "endDate": format!("{compact}02"),
                "description": "Second term opening ceremony"
            },
            { "title": "Broken", "startDate": "2025", "endDate": "", "description": "" }
        ]
    }))
}

async fn user_me() -> Json<Value> {
    Json(json!({ "nickname": "guest1234", "gender": null, "language": "ko", "instructions": null }))
}

async fn user_config(Json(body): Json<Value>) -> Json<Value> {
    Json(json!({ "nickname": body["nickname"], "gender": null, "language": "ko", "instructions": null }))
}

async fn chat(Json(body): Json<Value>) -> Json<Value> {
    let message = body["message"].as_str().unwrap_or_default();
    Json(json!({ "response": format!("You said: {message}") }))
}

async fn meal(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "date": params.get("day").cloned().unwrap_or_default(),
        "schoolName": "Test High School",
        "items": [
            { "dish": "Rice, seaweed soup", "calories": "750 Kcal", "nutrients": "protein 30g", "type": "breakfast" },
            { "dish": "Curry rice", "calories": "800 Kcal", "nutrients": "protein 25g", "type": "dinner" }
        ]
    }))
}

async fn timetable(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "date": params.get("day").cloned().unwrap_or_default(),
        "schoolName": "Test High School",
        "items": [
            { "period": "1", "subject": "Korean", "teacher": "Teacher 1", "classroom": "1-1" },
            { "period": "2", "subject": "Math", "teacher": "Teacher 2", "classroom": "1-2" }
        ]
    }))
}

async fn api_timetable(State(hits): State<Hits>) -> StatusCode {
    hits.timetable.fetch_add(1, Ordering::SeqCst);
    StatusCode::OK
}

async fn spawn_server() -> (PortalClient, Hits) {
    let hits = Hits::default();
    let app = Router::new()
        .route("/school/event", get(school_event))
        .route("/school/meal", get(meal))
        .route("/school/timetable", get(timetable))
        .route("/user/me", get(user_me))
        .route("/user/config", get(user_me).put(user_config))
        .route("/api/chat", post(chat))
        .route("/api/timetable", get(api_timetable))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (PortalClient::new(&format!("http://{addr}/")), hits)
}

/// A client pointed at a port nobody listens on.
async fn dead_client() -> PortalClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    PortalClient::new(&format!("http://{addr}"))
}

#[tokio::test]
async fn fetches_and_normalizes_school_events() {
    let (client, _) = spawn_server().await;
    assert!(!client.base_url().ends_with('/'));

    let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
    let mut widget = CalendarWidget::new(Arc::new(MemoryStorage::new()), client, today);
    widget.load().await;

    let events = widget.school_events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].date, "2025-09-02");
    assert_eq!(events[0].id, "school_20250902Opening ceremony");

    widget.navigate(1).await;
    assert_eq!(widget.school_events()[0].date, "2025-10-02");

    widget.switch_view(ViewMode::Week);
    widget.navigate(-5).await;
    assert_eq!(widget.school_events()[0].date, "2025-09-02");
}

#[tokio::test]
async fn unreachable_server_leaves_school_events_unchanged() {
    let client = dead_client().await;
    let today = NaiveDate::from_ymd_opt(2025, 9, 10).unwrap();
    let mut widget = CalendarWidget::new(Arc::new(MemoryStorage::new()), client, today);

    widget.load().await;
    assert!(widget.school_events().is_empty());

    let LayoutBody::Month(grid) = widget.render(today).body else {
        panic!("expected month layout");
    };
    assert_eq!(grid.cells.len(), 42);
}

#[tokio::test]
async fn chat_round_trip_and_failure_bubble() {
    let (client, _) = spawn_server().await;
    let mut widget = ChatWidget::load(Arc::new(MemoryStorage::new()), client).unwrap();
    let reply = widget.send_message("hello").await.unwrap();
    assert_eq!(reply.as_deref(), Some("You said: hello"));

    let mut offline = ChatWidget::load(Arc::new(MemoryStorage::new()), dead_client().await).unwrap();
    let reply = offline.send_message("hello").await.unwrap();
    assert_eq!(reply.as_deref(), Some(ERROR_REPLY));
}

#[tokio::test]
async fn profile_loads_and_saves_nickname() {
    let (client, _) = spawn_server().await;
    let mut profile = ProfileEditor::load(Arc::new(MemoryStorage::new()), client).await;
    assert_eq!(profile.display_name(), "guest1234");

    let saved = profile.save(" Minji ").await.unwrap();
    assert_eq!(saved, "Minji");
}

#[tokio::test]
async fn meal_and_timetable_decode() {
    let (client, _) = spawn_server().await;

    let meal = client.school_meal("2025-09-10").await.unwrap();
    assert_eq!(meal.date, "2025-09-10");
    assert_eq!(meal.items[1].kind, "dinner");

    let timetable = client.school_timetable("2025-09-10").await.unwrap();
    assert_eq!(timetable.items.len(), 2);
    assert_eq!(timetable.items[1].subject, "Math");
}

#[tokio::test]
async fn error_status_is_reported_with_path() {
    let (client, _) = spawn_server().await;
    let misrouted = PortalClient::new(&format!("{}/v2", client.base_url()));

    match misrouted.me().await {
        Err(GaonError::Api { status, path }) => {
            assert_eq!(status, 404);
            assert_eq!(path, "/user/me");
        }
        other => panic!("expected API error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn timetable_ping_is_fire_and_forget() {
    let (client, hits) = spawn_server().await;
    client.ping_timetable().await.unwrap();
    assert_eq!(hits.timetable.load(Ordering::SeqCst), 1);

    dead_client().await.ping_timetable().await.unwrap();
}
