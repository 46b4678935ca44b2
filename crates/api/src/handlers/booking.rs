//! # Booking Handlers
//!
//! A rejected booking is answered with `409 Conflict` and the colliding
//! appointment, so the caller can offer another time.

use agenda_core::{
    models::booking::{BookingListResponse, BookingResponse, CreateBookingRequest},
    scheduler::{BookingDecision, Conflict},
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

/// Body returned with `409 Conflict`.
#[derive(Debug, Serialize)]
pub struct ConflictResponse {
    pub error: String,
    pub conflict: Conflict,
}

/// Books an appointment for a client with a professional.
///
/// # Endpoint
///
/// ```text
/// POST /api/bookings
/// ```
#[axum::debug_handler]
pub async fn create_booking(
    State(state): State<Arc<ApiState>>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<Response, AppError> {
    let decision = state.scheduler.book(&payload).await?;

    let response = match decision {
        BookingDecision::Booked { booking, end_time } => {
            let body = BookingResponse {
                id: booking.id,
                client_id: booking.client_id,
                service_id: booking.service_id,
                professional_id: booking.professional_id,
                date: booking.date,
                start_time: booking.start_time,
                end_time,
                status: booking.status,
                created_at: booking.created_at,
            };
            (StatusCode::CREATED, Json(body)).into_response()
        }
        BookingDecision::Rejected(conflict) => {
            let body = ConflictResponse {
                error: conflict.to_string(),
                conflict,
            };
            (StatusCode::CONFLICT, Json(body)).into_response()
        }
    };

    Ok(response)
}

/// Optional filters for the agenda listing
#[derive(Debug, Deserialize)]
pub struct BookingListQuery {
    pub date: Option<NaiveDate>,
    pub professional_id: Option<Uuid>,
}

/// Lists bookings with resolved names and a count, read from the cached
/// directory snapshot.
///
/// ```text
/// GET /api/bookings?date=2026-10-19&professional_id=...
/// ```
#[axum::debug_handler]
pub async fn list_bookings(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<BookingListQuery>,
) -> Result<Json<BookingListResponse>, AppError> {
    let listing = state
        .scheduler
        .list_bookings(query.date, query.professional_id)
        .await?;
    Ok(Json(listing))
}
