use axum::http::StatusCode;
use rstest::rstest;
use rota_api::middleware::error_handling::{map_error, AppError};
use rota_core::errors::RotaError;

#[rstest]
#[case(RotaError::NotFound("Schedule not found".to_string()), StatusCode::NOT_FOUND)]
#[case(RotaError::Validation("title is required".to_string()), StatusCode::BAD_REQUEST)]
#[case(RotaError::IndexOutOfRange { index: 3, len: 1 }, StatusCode::BAD_REQUEST)]
#[case(RotaError::InvalidTransition("the form is closed".to_string()), StatusCode::CONFLICT)]
#[case(RotaError::Storage(eyre::eyre!("disk full")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(RotaError::Internal("lock poisoned".to_string()), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status_mapping(#[case] error: RotaError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[test]
fn test_map_error_builds_response() {
    let response = map_error(RotaError::NotFound("Resource not found".to_string()));
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[test]
fn test_from_rota_error() {
    let error: AppError = RotaError::Validation("Invalid input".to_string()).into();
    assert_eq!(error.status(), StatusCode::BAD_REQUEST);
}
