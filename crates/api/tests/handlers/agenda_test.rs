use agenda_core::models::time_slot::{
    CacheReloadResponse, FreeHoursResponse, SlotGridResponse, SlotStatus,
};
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;
use uuid::Uuid;

use crate::test_utils::{TestContext, at, day};

#[tokio::test]
async fn test_slot_grid_marks_booked_slots() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;

    let response = ctx
        .server
        .get(&format!("/api/professionals/{}/slots", ctx.professional.id))
        .add_query_param("date", "2026-10-19")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let grid: SlotGridResponse = response.json();
    assert_eq!(grid.date, day());
    assert_eq!(grid.slots.len(), 22);
    assert_eq!(grid.skipped_records, 0);

    let occupied: Vec<_> = grid
        .slots
        .iter()
        .filter(|s| s.status == SlotStatus::Occupied)
        .collect();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].start_time, at(9, 0));
    assert_eq!(occupied[0].occupying_client.as_deref(), Some("Ana"));
}

#[tokio::test]
async fn test_slot_grid_counts_malformed_records() {
    let ctx = TestContext::new();
    ctx.store.add_raw_booking(
        ctx.client.id,
        ctx.consult.id,
        ctx.professional.id,
        day(),
        "nine",
    );

    let grid: SlotGridResponse = ctx
        .server
        .get(&format!("/api/professionals/{}/slots", ctx.professional.id))
        .add_query_param("date", "2026-10-19")
        .await
        .json();

    assert_eq!(grid.skipped_records, 1);
    assert!(grid.slots.iter().all(|s| s.status == SlotStatus::Free));
}

#[tokio::test]
async fn test_slot_grid_for_unknown_professional_is_not_found() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/professionals/{}/slots", Uuid::new_v4()))
        .add_query_param("date", "2026-10-19")
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_slot_grid_requires_a_date() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .get(&format!("/api/professionals/{}/slots", ctx.professional.id))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_free_hours_excludes_exact_starts_only() {
    let ctx = TestContext::new();
    for start in ["09:00:00", "10:30:00"] {
        ctx.server
            .post("/api/bookings")
            .json(&ctx.booking_body(start))
            .await;
    }

    let response = ctx
        .server
        .get("/api/free-hours")
        .add_query_param("date", "2026-10-19")
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let hours: FreeHoursResponse = response.json();
    assert_eq!(hours.professional_id, None);
    assert_eq!(hours.free_hours.len(), 10);
    assert!(!hours.free_hours.contains(&at(9, 0)));
    assert!(hours.free_hours.contains(&at(10, 0)));
}

#[tokio::test]
async fn test_free_hours_for_one_professional() {
    let ctx = TestContext::new();
    let colleague = ctx.store.add_professional("Dr. Souza");
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;

    let hours: FreeHoursResponse = ctx
        .server
        .get("/api/free-hours")
        .add_query_param("date", "2026-10-19")
        .add_query_param("professional_id", colleague.id)
        .await
        .json();

    assert_eq!(hours.professional_id, Some(colleague.id));
    assert_eq!(hours.free_hours.len(), 11);
}

#[tokio::test]
async fn test_cache_reload_reports_counts() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;
    ctx.store.add_client("Bruno");

    let response = ctx.server.post("/api/cache/reload").await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let reload: CacheReloadResponse = response.json();
    assert_eq!(reload.clients, 2);
    assert_eq!(reload.services, 1);
    assert_eq!(reload.professionals, 1);
    assert_eq!(reload.bookings, 1);
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: Value = ctx.server.get("/health").await.json();
    assert_eq!(health["status"], "ok");
    assert_eq!(health["directory_loaded"], false);

    ctx.server.post("/api/cache/reload").await;
    let health: Value = ctx.server.get("/health").await.json();
    assert_eq!(health["directory_loaded"], true);

    let version: Value = ctx.server.get("/version").await.json();
    assert_eq!(version["name"], "agenda-api");
    assert!(version["version"].is_string());
}
