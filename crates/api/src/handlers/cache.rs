use agenda_core::models::time_slot::CacheReloadResponse;
use axum::{Json, extract::State};
use std::sync::Arc;

use crate::{ApiState, middleware::error_handling::AppError};

/// Forces a reload of the directory snapshot after registries change.
#[axum::debug_handler]
pub async fn reload_cache(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<CacheReloadResponse>, AppError> {
    let snapshot = state.scheduler.cache().reload().await?;

    Ok(Json(CacheReloadResponse {
        clients: snapshot.clients.len(),
        services: snapshot.services.len(),
        professionals: snapshot.professionals.len(),
        bookings: snapshot.bookings.len(),
        loaded_at: snapshot.loaded_at,
    }))
}
