use actix_web::{web, App, HttpServer};
use cohort_backend::config::db::{DbKind, DbProfile};
use cohort_backend::config::server::ServerConfig;
use cohort_backend::infra::state::build_state;
use cohort_backend::middleware::cors::cors_headers;
use cohort_backend::middleware::request_trace::RequestTrace;
use cohort_backend::middleware::structured_logger::StructuredLogger;
use cohort_backend::middleware::trace_span::TraceSpan;
use cohort_backend::routes;
use cohort_backend::state::security_config::SecurityConfig;
use tracing::{error, info};

mod telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    telemetry::init_tracing();

    // Environment variables come from the runtime (env_file, --env-file, or
    // a sourced .env); nothing is loaded from disk here.
    let server = match ServerConfig::from_env() {
        Ok(server) => server,
        Err(e) => {
            error!(error = %e, "invalid server configuration");
            std::process::exit(1);
        }
    };
    let security = match SecurityConfig::from_env() {
        Ok(security) => security,
        Err(e) => {
            error!(error = %e, "invalid security configuration");
            std::process::exit(1);
        }
    };
    let db_kind = match DbKind::from_env() {
        Ok(kind) => kind,
        Err(e) => {
            error!(error = %e, "invalid database configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_db(db_kind, DbProfile::Prod)
        .with_security(security)
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %server.host, port = server.port, db = ?db_kind, "cohort backend starting");

    let data = web::Data::new(app_state);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .bind((server.host.as_str(), server.port))?
    .run()
    .await
}
