//! The balancer client against a real listening backend.

mod common;
mod support;

use actix_web::{web, App, HttpServer};
use cohort_backend::balancer::{CountSource, GroupAssignment, GroupBalancer, HttpCountSource};
use cohort_backend::domain::Group;
use cohort_backend::middleware::RequestTrace;
use cohort_backend::routes;
use cohort_backend::services::{FinalizeRequest, IdentityRegistry, RegisterRequest, SubmissionGate};
use cohort_backend::state::app_state::AppState;

use common::TOKEN;
use support::sqlite_state;

async fn seed(state: &AppState, id: &str, group: Group) {
    let conn = state.db().expect("db");
    IdentityRegistry::new(&state.security)
        .register(
            conn,
            RegisterRequest {
                token: Some(TOKEN.to_string()),
                id: Some(id.to_string()),
                direction: Some("left".to_string()),
                group: Some(group.as_str().to_string()),
            },
        )
        .await
        .expect("register");
    SubmissionGate::new(&state.security, &state.counts)
        .finalize(
            conn,
            FinalizeRequest {
                token: Some(TOKEN.to_string()),
                id: Some(id.to_string()),
                group: Some(group.as_str().to_string()),
                direction: Some("left".to_string()),
            },
        )
        .await
        .expect("finalize");
}

fn serve(state: AppState) -> std::io::Result<(String, actix_web::dev::ServerHandle)> {
    let data = web::Data::new(state);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(RequestTrace)
            .app_data(data.clone())
            .configure(routes::configure)
    })
    .workers(1)
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);
    Ok((format!("http://{addr}"), handle))
}

#[actix_web::test]
async fn assigns_the_least_populated_group_over_http() {
    let state = sqlite_state().await;
    seed(&state, "g1-a", Group::One).await;
    seed(&state, "g1-b", Group::One).await;
    seed(&state, "g3-a", Group::Three).await;

    let (base, handle) = serve(state).expect("bind");
    let source = HttpCountSource::new(base).expect("client");

    assert_eq!(source.group_count(Group::One).await.expect("count"), 2);
    assert_eq!(source.group_count(Group::Two).await.expect("count"), 0);

    let balancer = GroupBalancer::new(source);
    assert_eq!(
        balancer.assign_group().await,
        GroupAssignment::Assigned(Group::Two)
    );

    handle.stop(false).await;
}

#[actix_web::test]
async fn unreachable_backend_falls_back() {
    // Nothing listens on the discard port.
    let source = HttpCountSource::with_timeout(
        "http://127.0.0.1:9",
        std::time::Duration::from_millis(500),
    )
    .expect("client");
    let assignment = GroupBalancer::new(source).assign_group().await;
    assert_eq!(assignment, GroupAssignment::Fallback);
    assert_eq!(assignment.slot(), 0);
}
