use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::body::{describe_json_error, read_body};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::web::trace_ctx;

/// JSON body extractor whose parse failures render as `BAD_REQUEST` problem
/// details instead of actix's plain-text default.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for ValidatedJson<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> FromRequest for ValidatedJson<T>
where
    T: DeserializeOwned + 'static,
{
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let payload = payload.take();

        Box::pin(async move {
            let body = read_body(payload).await?;

            let parsed = serde_json::from_slice::<T>(&body).map_err(|e| {
                debug!(
                    trace_id = %trace_ctx::trace_id(),
                    body_size = body.len(),
                    category = ?e.classify(),
                    "json_body_rejected"
                );
                AppError::bad_request(ErrorCode::BadRequest, describe_json_error(&e))
            })?;

            Ok(ValidatedJson(parsed))
        })
    }
}
