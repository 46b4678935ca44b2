use agenda_api::middleware::error_handling::{AppError, map_error};
use agenda_core::errors::AgendaError;
use axum::{http::StatusCode, response::IntoResponse};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(AgendaError::NotFound("professional".into()), StatusCode::NOT_FOUND)]
#[case(AgendaError::Validation("bad date".into()), StatusCode::BAD_REQUEST)]
#[case(AgendaError::Database(eyre::eyre!("pool timed out")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    AgendaError::Internal(Box::new(std::io::Error::other("disk"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: AgendaError, #[case] expected: StatusCode) {
    let response = map_error(error);

    assert_eq!(response.status(), expected);
}

#[tokio::test]
async fn test_error_body_carries_message() {
    let response = AppError(AgendaError::Validation("Invalid date".into())).into_response();

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(body["error"], "Validation error: Invalid date");
}

#[test]
fn test_eyre_report_becomes_database_error() {
    let error = AppError::from(eyre::eyre!("connection refused"));

    assert!(matches!(error.0, AgendaError::Database(_)));
}
