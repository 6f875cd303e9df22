#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::http::header;
use actix_web::test;
use serde_json::{json, Value};

pub const TOKEN: &str = "integration-shared-token";

#[ctor::ctor]
fn init_logging() {
    backend_test_support::logging::init();
}

/// `POST /api/register` with the token in the body.
pub fn register_request(id: &str, group: &str, direction: &str) -> Request {
    register_request_with_token(id, group, direction, TOKEN)
}

pub fn register_request_with_token(id: &str, group: &str, direction: &str, token: &str) -> Request {
    test::TestRequest::post()
        .uri("/api/register")
        .set_json(json!({
            "id": id,
            "group": group,
            "direction": direction,
            "token": token,
        }))
        .to_request()
}

/// `GET /api/finalize` with every parameter in the query string.
pub fn finalize_query_request(id: &str, group: &str, direction: &str) -> Request {
    finalize_query_request_with_token(id, group, direction, TOKEN)
}

pub fn finalize_query_request_with_token(
    id: &str,
    group: &str,
    direction: &str,
    token: &str,
) -> Request {
    test::TestRequest::get()
        .uri(&format!(
            "/api/finalize?token={token}&id={id}&group={group}&direction={direction}"
        ))
        .to_request()
}

pub fn counts_request(group: &str) -> Request {
    test::TestRequest::get()
        .uri(&format!("/api/counts/{group}"))
        .to_request()
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

pub async fn json_body<B: MessageBody>(resp: ServiceResponse<B>) -> Value {
    let body = test::read_body(resp).await;
    serde_json::from_slice(&body).unwrap_or_else(|e| {
        panic!("expected JSON ({e}): {}", String::from_utf8_lossy(&body))
    })
}
