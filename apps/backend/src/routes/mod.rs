use actix_web::web;

pub mod counts;
pub mod finalize;
pub mod health;
pub mod participants;

/// Register every route. `main.rs` and the integration tests share this so
/// both exercise the same surface.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes);
    cfg.service(
        web::scope("/api")
            .configure(participants::configure_routes)
            .configure(finalize::configure_routes)
            .configure(counts::configure_routes),
    );
}
