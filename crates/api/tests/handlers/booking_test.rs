use std::sync::Arc;

use agenda_api::ApiState;
use agenda_core::{
    errors::AgendaError,
    models::{
        booking::{BookingListResponse, BookingResponse},
        directory::{Client, Professional, Service},
    },
    scheduler::SlotGrid,
    store::MemoryStore,
};
use agenda_db::mock::store::MockStore;
use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{TestContext, at, day, server_for};

#[tokio::test]
async fn test_create_booking_returns_created() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let booking: BookingResponse = response.json();
    assert_eq!(booking.date, day());
    assert_eq!(booking.start_time, at(9, 0));
    assert_eq!(booking.end_time, at(9, 30));
    assert_eq!(booking.professional_id, ctx.professional.id);
    assert_eq!(booking.status.as_str(), "scheduled");
    assert_eq!(ctx.store.booking_count(), 1);
}

#[tokio::test]
async fn test_overlapping_booking_returns_conflict() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:15:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(
        body["error"],
        json!("Conflict with Consultation from 09:00 to 09:30")
    );
    assert_eq!(body["conflict"]["start_time"], json!("09:00:00"));
    assert_eq!(body["conflict"]["client_name"], json!("Ana"));
    assert_eq!(ctx.store.booking_count(), 1);
}

#[tokio::test]
async fn test_back_to_back_booking_is_created() {
    let ctx = TestContext::new();
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:30:00"))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    assert_eq!(ctx.store.booking_count(), 2);
}

#[tokio::test]
async fn test_booking_without_registries_is_bad_request() {
    let store = Arc::new(MemoryStore::new());
    let server = server_for(ApiState::new(store.clone(), SlotGrid::default()));

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "client_id": Uuid::new_v4(),
            "service_id": Uuid::new_v4(),
            "professional_id": Uuid::new_v4(),
            "date": "2026-10-19",
            "start_time": "09:00:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("clients"));
    assert_eq!(store.booking_count(), 0);
}

#[tokio::test]
async fn test_incomplete_payload_is_rejected() {
    let ctx = TestContext::new();

    let response = ctx
        .server
        .post("/api/bookings")
        .json(&json!({ "client_id": ctx.client.id, "date": "2026-10-19" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.store.booking_count(), 0);
}

fn mock_with_registries() -> MockStore {
    let mut store = MockStore::new();
    store.expect_clients().returning(|| {
        Ok(vec![Client {
            id: Uuid::new_v4(),
            name: "Ana".to_string(),
        }])
    });
    store.expect_services().returning(|| {
        Ok(vec![Service {
            id: Uuid::new_v4(),
            name: "Consultation".to_string(),
            duration_minutes: Some(30),
        }])
    });
    store.expect_professionals().returning(|| {
        Ok(vec![Professional {
            id: Uuid::new_v4(),
            name: "Dr. Lima".to_string(),
            active: true,
        }])
    });
    store.expect_all_bookings().returning(|| Ok(vec![]));
    store
}

#[tokio::test]
async fn test_store_failure_is_internal_error_and_nothing_is_inserted() {
    let mut store = mock_with_registries();
    store
        .expect_bookings_for_day()
        .times(1)
        .returning(|_, _| Err(AgendaError::Database(eyre::eyre!("connection reset"))));
    store.expect_insert_booking().never();
    let server = server_for(ApiState::new(Arc::new(store), SlotGrid::default()));

    let response = server
        .post("/api/bookings")
        .json(&json!({
            "client_id": Uuid::new_v4(),
            "service_id": Uuid::new_v4(),
            "professional_id": Uuid::new_v4(),
            "date": "2026-10-19",
            "start_time": "09:00:00",
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], json!("Database error: connection reset"));
}

#[tokio::test]
async fn test_list_bookings_with_filters() {
    let ctx = TestContext::new();
    let colleague = ctx.store.add_professional("Dr. Souza");
    ctx.server
        .post("/api/bookings")
        .json(&ctx.booking_body("09:00:00"))
        .await;
    let mut theirs = ctx.booking_body("09:00:00");
    theirs["professional_id"] = json!(colleague.id);
    ctx.server.post("/api/bookings").json(&theirs).await;

    let response = ctx.server.get("/api/bookings").await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let all: BookingListResponse = response.json();
    assert_eq!(all.count, 2);
    assert_eq!(all.bookings.len(), 2);

    let mine: BookingListResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("date", "2026-10-19")
        .add_query_param("professional_id", ctx.professional.id)
        .await
        .json();
    assert_eq!(mine.count, 1);
    assert_eq!(mine.date, Some(day()));
    let row = &mine.bookings[0];
    assert_eq!(row.start_time, "09:00:00");
    assert_eq!(row.client_name.as_deref(), Some("Ana"));
    assert_eq!(row.service_name.as_deref(), Some("Consultation"));
    assert_eq!(row.professional_name.as_deref(), Some("Dr. Lima"));

    let other_day: BookingListResponse = ctx
        .server
        .get("/api/bookings")
        .add_query_param("date", "2026-10-20")
        .await
        .json();
    assert_eq!(other_day.count, 0);
}

#[tokio::test]
async fn test_booking_past_calendar_end_is_bad_request() {
    let ctx = TestContext::new();
    let mut body = ctx.booking_body("23:50:00");
    body["date"] = json!("+262142-12-31");

    let response = ctx.server.post("/api/bookings").json(&body).await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.store.booking_count(), 0);
}
