use actix_http::Request;
use actix_web::body::BoxBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use cohort_backend::middleware::cors::cors_headers;
use cohort_backend::middleware::{RequestTrace, StructuredLogger, TraceSpan};
use cohort_backend::routes;
use cohort_backend::state::app_state::AppState;

/// Initialize a test service with the production middleware stack and routes.
pub async fn create_test_app(
    state: AppState,
) -> impl Service<Request, Response = ServiceResponse<BoxBody>, Error = Error> {
    test::init_service(
        App::new()
            .wrap(cors_headers())
            .wrap(StructuredLogger)
            .wrap(TraceSpan)
            .wrap(RequestTrace)
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await
}
