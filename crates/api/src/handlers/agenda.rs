use agenda_core::models::time_slot::{FreeHoursResponse, SlotGridResponse};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::{ApiState, middleware::error_handling::AppError};

#[derive(Debug, Deserialize)]
pub struct SlotQuery {
    pub date: NaiveDate,
}

/// Query parameters for the free-hours view
///
/// * `date` - Day to inspect, `YYYY-MM-DD`
/// * `professional_id` - Restricts the view to one professional; all when absent
#[derive(Debug, Deserialize)]
pub struct FreeHoursQuery {
    pub date: NaiveDate,
    pub professional_id: Option<Uuid>,
}

/// Display grid of one professional's day.
///
/// ```text
/// GET /api/professionals/:id/slots?date=2026-10-19
/// ```
#[axum::debug_handler]
pub async fn get_slot_grid(
    State(state): State<Arc<ApiState>>,
    Path(professional_id): Path<Uuid>,
    Query(query): Query<SlotQuery>,
) -> Result<Json<SlotGridResponse>, AppError> {
    let grid = state.scheduler.slot_grid(professional_id, query.date).await?;
    Ok(Json(grid))
}

/// Whole hours with no booking starting on them.
///
/// ```text
/// GET /api/free-hours?date=2026-10-19&professional_id=...
/// ```
#[axum::debug_handler]
pub async fn get_free_hours(
    State(state): State<Arc<ApiState>>,
    Query(query): Query<FreeHoursQuery>,
) -> Result<Json<FreeHoursResponse>, AppError> {
    let hours = state
        .scheduler
        .free_hours(query.date, query.professional_id)
        .await?;
    Ok(Json(hours))
}
