use crate::config::db::{DbKind, DbProfile};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::services::counts::CountStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db: Option<(DbKind, DbProfile)>,
    count_store: CountStore,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db: None,
            count_store: CountStore::default(),
        }
    }

    pub fn with_db(mut self, kind: DbKind, profile: DbProfile) -> Self {
        self.db = Some((kind, profile));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_count_store(mut self, count_store: CountStore) -> Self {
        self.count_store = count_store;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        let state = match self.db {
            Some((kind, profile)) => {
                // single entrypoint: connect + migrate
                let conn = bootstrap_db(kind, profile).await?;
                AppState::new(conn, self.security_config)
            }
            None => AppState::new_without_db(self.security_config),
        };
        Ok(state.with_count_store(self.count_store))
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_succeeds_without_db_option() {
        let state = build_state().build().await.unwrap();
        assert!(state.db().is_none());
    }

    #[tokio::test]
    async fn test_build_with_sqlite_memory_migrates() {
        let state = build_state()
            .with_db(DbKind::SqliteMemory, DbProfile::Test)
            .build()
            .await
            .unwrap();
        let db = state.db().unwrap();
        assert_eq!(migration::count_applied_migrations(db).await.unwrap(), 1);
    }
}
