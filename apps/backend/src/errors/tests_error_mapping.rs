// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use actix_web::ResponseError;

use crate::error::OPAQUE_STORE_DETAIL;
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, ValidationKind};
use crate::{AppError, ErrorCode};

#[test]
fn maps_auth_to_403() {
    let app: AppError = DomainError::auth("bad token").into();
    assert_eq!(app.code(), ErrorCode::InvalidToken);
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_validation_kinds_to_400() {
    let cases = [
        (ValidationKind::MissingId, ErrorCode::MissingId),
        (ValidationKind::InvalidId, ErrorCode::InvalidId),
        (ValidationKind::InvalidGroup, ErrorCode::InvalidGroup),
        (ValidationKind::InvalidDirection, ErrorCode::InvalidDirection),
        (ValidationKind::Mismatch, ErrorCode::RegistrationMismatch),
        (
            ValidationKind::UnknownParticipant,
            ErrorCode::UnknownParticipant,
        ),
    ];
    for (kind, expected) in cases {
        let app: AppError = DomainError::validation(kind, "nope").into();
        assert_eq!(app.code(), expected);
        assert_eq!(app.status().as_u16(), 400);
    }
}

#[test]
fn maps_duplicate_registration_to_409() {
    let app: AppError =
        DomainError::conflict(ConflictKind::AlreadyRegistered, "already there").into();
    assert_eq!(app.code().as_str(), "ALREADY_REGISTERED");
    assert_eq!(app.status().as_u16(), 409);
}

#[test]
fn maps_infra_to_opaque_500() {
    let contention: AppError =
        DomainError::infra(InfraErrorKind::Contention, "gave up after 32 attempts").into();
    assert_eq!(contention.code(), ErrorCode::CounterContention);
    assert_eq!(contention.status().as_u16(), 500);

    let down: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(down.code(), ErrorCode::DbUnavailable);
    assert_eq!(down.status().as_u16(), 500);

    let other: AppError =
        DomainError::infra(InfraErrorKind::Other("io".into()), "connection reset").into();
    assert_eq!(other.code(), ErrorCode::DbError);
}

#[actix_web::test]
async fn store_errors_do_not_leak_detail() {
    let err: AppError =
        DomainError::infra(InfraErrorKind::Other("io".into()), "password=hunter2").into();
    let resp = err.error_response();
    assert_eq!(resp.status().as_u16(), 500);

    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["detail"], OPAQUE_STORE_DETAIL);
    assert!(!String::from_utf8_lossy(&body).contains("hunter2"));
}

#[actix_web::test]
async fn problem_details_shape() {
    let err = AppError::invalid(ErrorCode::InvalidGroup, "group 'x' is not valid");
    let resp = err.error_response();
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/problem+json"
    );
    assert!(resp.headers().get("x-trace-id").is_some());

    let body = actix_web::body::to_bytes(resp.into_body()).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["code"], "INVALID_GROUP");
    assert_eq!(json["title"], "Invalid Group");
    assert_eq!(json["status"], 400);
    assert_eq!(json["detail"], "group 'x' is not valid");
}
