//! Finalize parameters gathered from the query string and the body.
//!
//! The relay may send `token, group, id, direction` as query parameters, as
//! a JSON body, as a form body, or split across both. Body values take
//! precedence over query values; the token may also arrive as a bearer
//! header, consulted only when no parameter carries it.

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, FromRequest, HttpRequest};
use serde::Deserialize;
use tracing::debug;

use super::auth_token::bearer_token;
use super::body::{describe_json_error, read_body};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::FinalizeRequest;
use crate::web::trace_ctx;

#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RawParams {
    pub token: Option<String>,
    pub id: Option<String>,
    pub group: Option<String>,
    pub direction: Option<String>,
}

impl RawParams {
    /// Field-wise merge; `self` wins where both are present.
    fn or(self, fallback: RawParams) -> RawParams {
        RawParams {
            token: self.token.or(fallback.token),
            id: self.id.or(fallback.id),
            group: self.group.or(fallback.group),
            direction: self.direction.or(fallback.direction),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyFormat {
    Json,
    Form,
    Unspecified,
}

fn body_format(req: &HttpRequest) -> BodyFormat {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|ct| ct.to_str().ok())
        .unwrap_or("")
        .to_ascii_lowercase();
    if content_type.starts_with("application/json") {
        BodyFormat::Json
    } else if content_type.starts_with("application/x-www-form-urlencoded") {
        BodyFormat::Form
    } else {
        BodyFormat::Unspecified
    }
}

fn parse_query(raw: &str) -> Result<RawParams, AppError> {
    web::Query::<RawParams>::from_query(raw)
        .map(web::Query::into_inner)
        .map_err(|_| AppError::bad_request(ErrorCode::BadRequest, "Malformed query string"))
}

fn parse_json(body: &[u8]) -> Result<RawParams, AppError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!(
            trace_id = %trace_ctx::trace_id(),
            category = ?e.classify(),
            "finalize_body_rejected"
        );
        AppError::bad_request(ErrorCode::BadRequest, describe_json_error(&e))
    })
}

fn parse_form(body: &[u8]) -> Result<RawParams, AppError> {
    let text = std::str::from_utf8(body).map_err(|_| {
        AppError::bad_request(ErrorCode::BadRequest, "Form body is not valid UTF-8")
    })?;
    web::Query::<RawParams>::from_query(text)
        .map(web::Query::into_inner)
        .map_err(|_| AppError::bad_request(ErrorCode::BadRequest, "Malformed form body"))
}

fn parse_body(format: BodyFormat, body: &[u8]) -> Result<RawParams, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(RawParams::default());
    }
    match format {
        BodyFormat::Json => parse_json(body),
        BodyFormat::Form => parse_form(body),
        // Relays that omit a content type send JSON more often than forms.
        BodyFormat::Unspecified => parse_json(body).or_else(|_| parse_form(body)),
    }
}

/// Merged finalize parameters, ready to hand to the submission gate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionParams(pub RawParams);

impl SubmissionParams {
    pub fn into_request(self) -> FinalizeRequest {
        let RawParams {
            token,
            id,
            group,
            direction,
        } = self.0;
        FinalizeRequest {
            token,
            id,
            group,
            direction,
        }
    }
}

impl FromRequest for SubmissionParams {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let query = parse_query(req.query_string());
        let format = body_format(req);
        let bearer = bearer_token(req);
        let payload = payload.take();

        Box::pin(async move {
            let query = query?;
            let body = read_body(payload).await?;
            let mut merged = parse_body(format, &body)?.or(query);
            if merged.token.is_none() {
                merged.token = bearer;
            }
            Ok(SubmissionParams(merged))
        })
    }
}
