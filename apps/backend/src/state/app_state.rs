use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::services::counts::CountStore;

/// Application state containing shared resources.
///
/// Built once per process; handlers receive it through `web::Data`. Holds no
/// mutable state of its own.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for test scenarios)
    db: Option<DatabaseConnection>,
    /// Shared-token configuration
    pub security: SecurityConfig,
    /// Counter increment policy
    pub counts: CountStore,
}

impl AppState {
    /// Create a new AppState with the given database connection and security config
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self {
            db: Some(db),
            security,
            counts: CountStore::default(),
        }
    }

    /// Create a new AppState without a database connection
    pub fn new_without_db(security: SecurityConfig) -> Self {
        Self {
            db: None,
            security,
            counts: CountStore::default(),
        }
    }

    pub fn with_count_store(mut self, counts: CountStore) -> Self {
        self.counts = counts;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
