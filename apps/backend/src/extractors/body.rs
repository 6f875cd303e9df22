//! Shared request-body reading for the hand-rolled extractors.

use actix_web::dev::Payload;
use bytes::BytesMut;
use futures_util::StreamExt;
use serde_json::error::Category;
use tracing::warn;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// Largest body any endpoint accepts. Requests carry four short strings.
pub const MAX_BODY_BYTES: usize = 16 * 1024;

pub async fn read_body(mut payload: Payload) -> Result<BytesMut, AppError> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|e| {
            warn!(
                trace_id = %trace_ctx::trace_id(),
                error = %e,
                "body_read_failed"
            );
            AppError::bad_request(ErrorCode::BadRequest, "Failed to read request body")
        })?;
        if body.len() + chunk.len() > MAX_BODY_BYTES {
            return Err(AppError::bad_request(
                ErrorCode::BadRequest,
                format!("Request body exceeds {MAX_BODY_BYTES} bytes"),
            ));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body)
}

/// Client-safe description of a JSON parse failure.
pub fn describe_json_error(error: &serde_json::Error) -> String {
    match error.classify() {
        Category::Syntax => format!("Invalid JSON at line {}", error.line()),
        Category::Eof => "Invalid JSON: unexpected end of input".to_string(),
        Category::Data => "Invalid JSON: fields must be strings".to_string(),
        Category::Io => "Invalid JSON: I/O error while reading body".to_string(),
    }
}
