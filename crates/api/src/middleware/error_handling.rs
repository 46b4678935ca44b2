//! # Error Handling Middleware
//!
//! Maps `AgendaError` to HTTP status codes and JSON error bodies so every
//! handler reports failures the same way.

use agenda_core::errors::AgendaError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use agenda_api::middleware::error_handling::AppError;
/// use agenda_core::errors::AgendaError;
///
/// async fn handler(name: String) -> Result<Json<String>, AppError> {
///     if name.is_empty() {
///         return Err(AppError(AgendaError::Validation("Name is required".into())));
///     }
///     Ok(Json(name))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub AgendaError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            AgendaError::NotFound(_) => StatusCode::NOT_FOUND,
            AgendaError::Validation(_) => StatusCode::BAD_REQUEST,
            AgendaError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AgendaError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:?}", self.0);
        }

        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows `?` on `AgendaResult` inside handlers returning `Result<T, AppError>`.
impl From<AgendaError> for AppError {
    fn from(err: AgendaError) -> Self {
        AppError(err)
    }
}

/// Wraps a bare eyre report as a database failure.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(AgendaError::Database(err))
    }
}

/// Maps an AgendaError to an HTTP response
pub fn map_error(err: AgendaError) -> Response {
    AppError(err).into_response()
}
