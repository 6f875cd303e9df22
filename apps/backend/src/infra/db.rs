use std::future::Future;
use std::time::Duration;

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{info, warn};

use crate::config::db::{db_url, DbKind, DbProfile};
use crate::error::AppError;

const CONNECT_ATTEMPTS: u32 = 5;
const CONNECT_INTERVAL_MS: u64 = 500;
/// An in-memory SQLite database lives exactly as long as its connection, so
/// that connection must never be recycled by the pool.
const MEMORY_DB_LIFETIME: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

/// Retry a connection attempt with fixed interval delays.
/// Returns the result of the last attempt after all retries are exhausted.
async fn retry_connection<T, F, Fut>(
    mut connect_fn: F,
    max_attempts: u32,
    interval_ms: u64,
) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 1;
    loop {
        match connect_fn().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempts = attempt, "connection_retry=success");
                }
                return Ok(result);
            }
            Err(e) if attempt >= max_attempts => return Err(e),
            Err(_) => {
                warn!(attempt, max_attempts, interval_ms, "connection_retry=failed");
                tokio::time::sleep(Duration::from_millis(interval_ms)).await;
                attempt += 1;
            }
        }
    }
}

fn connect_options(kind: DbKind, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10));

    match kind {
        // SQLite serializes writers anyway; one pooled connection avoids
        // SQLITE_BUSY.
        DbKind::SqliteFile => {
            opts.max_connections(1).min_connections(1);
        }
        // The single connection holds the whole database; a recycled
        // connection would come back empty and unmigrated.
        DbKind::SqliteMemory => {
            opts.max_connections(1)
                .min_connections(1)
                .max_lifetime(MEMORY_DB_LIFETIME)
                .idle_timeout(MEMORY_DB_LIFETIME);
        }
        DbKind::Postgres => {
            opts.max_connections(16).min_connections(1);
        }
    }
    opts
}

/// Open a connection pool. Does NOT run any migrations.
pub async fn connect_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(kind, profile)?;
    retry_connection(
        || {
            let opts = connect_options(kind, url.clone());
            async move { Database::connect(opts).await.map_err(AppError::from) }
        },
        if kind == DbKind::SqliteMemory { 1 } else { CONNECT_ATTEMPTS },
        CONNECT_INTERVAL_MS,
    )
    .await
}

/// Single entrypoint used by state building: connect, then migrate up.
pub async fn bootstrap_db(kind: DbKind, profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(kind, profile).await?;
    migrate(&conn, MigrationCommand::Up).await?;
    info!(db_kind = ?kind, profile = ?profile, "database_ready");
    Ok(conn)
}
