use actix_web::http::Method;
use actix_web::{web, HttpResponse};

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::SubmissionParams;
use crate::middleware::cors::preflight;
use crate::services::SubmissionGate;
use crate::state::app_state::AppState;

/// GET|POST /api/finalize
///
/// Both success variants answer 200; the body's `status` tells them apart.
async fn finalize(
    app_state: web::Data<AppState>,
    params: SubmissionParams,
) -> Result<HttpResponse, AppError> {
    let conn = require_db(&app_state)?;

    let outcome = SubmissionGate::new(&app_state.security, &app_state.counts)
        .finalize(conn, params.into_request())
        .await?;

    Ok(HttpResponse::Ok().json(outcome))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/finalize")
            .route(web::get().to(finalize))
            .route(web::post().to(finalize))
            .route(web::method(Method::OPTIONS).to(preflight)),
    );
}
