mod common;
mod support;

use actix_web::http::{Method, StatusCode};
use actix_web::test;
use backend_test_support::problem_details::assert_problem_details;
use backend_test_support::unique::participant_id;
use cohort_backend::domain::Group;
use cohort_backend::entities::participants::ParticipantStatus;
use serde_json::json;

use common::{bearer, json_body, register_request, register_request_with_token};
use support::{count_of, create_test_app, participant_row, sqlite_state};

#[actix_web::test]
async fn register_creates_pending_record() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).await;

    let resp = test::call_service(&app, register_request("abc-123", "TestGroup1", "left")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(
        body,
        json!({"status": "created", "id": "abc-123", "group": "TestGroup1", "direction": "left"})
    );

    let row = participant_row(&state, "abc-123").await.expect("row exists");
    assert_eq!(row.status, ParticipantStatus::Pending);
    assert_eq!(row.group_name, "TestGroup1");
    assert_eq!(row.direction, "left");
    assert!(row.used_at.is_none());
}

#[actix_web::test]
async fn second_registration_conflicts_and_keeps_first() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).await;
    let id = participant_id("dup");

    let first = test::call_service(&app, register_request(&id, "TestGroup2", "right")).await;
    assert_eq!(first.status(), StatusCode::OK);

    let second = test::call_service(&app, register_request(&id, "TestGroup3", "left")).await;
    assert_problem_details(second, StatusCode::CONFLICT, "ALREADY_REGISTERED").await;

    let row = participant_row(&state, &id).await.expect("row exists");
    assert_eq!(row.group_name, "TestGroup2");
    assert_eq!(row.direction, "right");
}

#[actix_web::test]
async fn registration_never_touches_counters() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).await;

    for i in 0..3 {
        let id = format!("reg-{i}");
        let resp = test::call_service(&app, register_request(&id, "TestGroup1", "left")).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
    for group in Group::ALL {
        assert_eq!(count_of(&state, group).await, 0);
    }
}

#[actix_web::test]
async fn bad_token_is_forbidden_and_writes_nothing() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).await;

    let resp = test::call_service(
        &app,
        register_request_with_token("abc-123", "TestGroup1", "left", "wrong"),
    )
    .await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "INVALID_TOKEN").await;
    assert!(participant_row(&state, "abc-123").await.is_none());
}

#[actix_web::test]
async fn token_is_checked_before_fields() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let resp = test::call_service(
        &app,
        register_request_with_token("", "NoSuchGroup", "up", "wrong"),
    )
    .await;
    assert_problem_details(resp, StatusCode::FORBIDDEN, "INVALID_TOKEN").await;
}

#[actix_web::test]
async fn bearer_header_carries_token() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/register")
        .insert_header(bearer(common::TOKEN))
        .set_json(json!({"id": "hdr-1", "group": "TestGroup3", "direction": "right"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn field_validation_order_and_codes() {
    let state = sqlite_state().await;
    let app = create_test_app(state.clone()).await;

    let cases = [
        ("", "NoSuchGroup", "up", "MISSING_ID"),
        ("   ", "TestGroup1", "left", "MISSING_ID"),
        ("v-1", "NoSuchGroup", "up", "INVALID_GROUP"),
        ("v-1", "testgroup1", "left", "INVALID_GROUP"),
        ("v-1", "TestGroup1", "up", "INVALID_DIRECTION"),
        ("v-1", "TestGroup1", "Left", "INVALID_DIRECTION"),
    ];
    for (id, group, direction, code) in cases {
        let resp = test::call_service(&app, register_request(id, group, direction)).await;
        assert_problem_details(resp, StatusCode::BAD_REQUEST, code).await;
    }
    assert!(participant_row(&state, "v-1").await.is_none());

    let too_long = "x".repeat(129);
    let resp = test::call_service(&app, register_request(&too_long, "TestGroup1", "left")).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "INVALID_ID").await;
}

#[actix_web::test]
async fn malformed_body_is_bad_request() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let req = test::TestRequest::post()
        .uri("/api/register")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"id\": ")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_problem_details(resp, StatusCode::BAD_REQUEST, "BAD_REQUEST").await;
}

#[actix_web::test]
async fn preflight_and_method_rules() {
    let state = sqlite_state().await;
    let app = create_test_app(state).await;

    let preflight = test::TestRequest::default()
        .method(Method::OPTIONS)
        .uri("/api/register")
        .to_request();
    let resp = test::call_service(&app, preflight).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert_eq!(
        resp.headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let get = test::TestRequest::get().uri("/api/register").to_request();
    let resp = test::call_service(&app, get).await;
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
}
