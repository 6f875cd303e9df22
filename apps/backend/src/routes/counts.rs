use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::domain::Group;
use crate::error::AppError;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct CountResponse {
    group: Group,
    count: u64,
}

/// GET /api/counts/{group}
///
/// Unauthenticated: counts carry no participant data and the balancer runs
/// before a participant has anything to authenticate with.
async fn group_count(
    app_state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let group = Group::parse(&path.into_inner())?;
    let conn = require_db(&app_state)?;
    let count = app_state.counts.read(conn, group).await?;
    Ok(HttpResponse::Ok().json(CountResponse { group, count }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/counts/{group}", web::get().to(group_count));
}
