use actix_web::http::Method;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::db::require_db;
use crate::domain::{Direction, Group, ParticipantId};
use crate::error::AppError;
use crate::extractors::{BearerToken, ValidatedJson};
use crate::middleware::cors::preflight;
use crate::services::{IdentityRegistry, RegisterRequest};
use crate::state::app_state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterBody {
    pub id: Option<String>,
    pub direction: Option<String>,
    pub group: Option<String>,
    pub token: Option<String>,
}

#[derive(Debug, Serialize)]
struct RegisterResponse {
    status: &'static str,
    id: ParticipantId,
    group: Group,
    direction: Direction,
}

/// POST /api/register
async fn register(
    app_state: web::Data<AppState>,
    bearer: BearerToken,
    body: ValidatedJson<RegisterBody>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let conn = require_db(&app_state)?;

    let request = RegisterRequest {
        token: body.token.or(bearer.into_inner()),
        id: body.id,
        direction: body.direction,
        group: body.group,
    };

    let record = IdentityRegistry::new(&app_state.security)
        .register(conn, request)
        .await?;

    Ok(HttpResponse::Ok().json(RegisterResponse {
        status: "created",
        id: record.id,
        group: record.group,
        direction: record.direction,
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .route(web::post().to(register))
            .route(web::method(Method::OPTIONS).to(preflight)),
    );
}
