use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::{ApiState, handlers};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/professionals/:id/slots",
            get(handlers::agenda::get_slot_grid),
        )
        .route("/api/free-hours", get(handlers::agenda::get_free_hours))
        .route("/api/cache/reload", post(handlers::cache::reload_cache))
}
