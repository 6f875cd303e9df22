use cohort_backend::adapters::participants_sea;
use cohort_backend::config::db::{DbKind, DbProfile};
use cohort_backend::domain::Group;
use cohort_backend::entities::participants;
use cohort_backend::infra::state::build_state;
use cohort_backend::state::app_state::AppState;
use cohort_backend::state::security_config::SecurityConfig;

use crate::common::TOKEN;

/// Fresh, migrated, private in-memory database per call.
pub async fn sqlite_state() -> AppState {
    build_state()
        .with_db(DbKind::SqliteMemory, DbProfile::Test)
        .with_security(SecurityConfig::new(TOKEN))
        .build()
        .await
        .expect("build sqlite-memory state")
}

pub async fn count_of(state: &AppState, group: Group) -> u64 {
    let conn = state.db().expect("state has a database");
    state.counts.read(conn, group).await.expect("read count")
}

pub async fn participant_row(state: &AppState, id: &str) -> Option<participants::Model> {
    let conn = state.db().expect("state has a database");
    participants_sea::find_by_id(conn, id)
        .await
        .expect("read participant")
}
