use clap::{Parser, ValueEnum};
use cohort_backend::config::db::{DbKind, DbProfile};
use cohort_backend::infra::db::connect_db;
use migration::{migrate, MigrationCommand};
use tracing::{error, info};

#[derive(Clone, Copy, ValueEnum)]
enum Profile {
    Prod,
    Test,
}

/// In-memory SQLite is not offered: the database would vanish when the
/// command exits.
#[derive(Clone, Copy, ValueEnum)]
enum Db {
    Postgres,
    SqliteFile,
}

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Schema migrations for the cohort backend database")]
struct Args {
    /// up | down | fresh | reset | refresh | status
    #[arg(value_parser = parse_command)]
    command: MigrationCommand,

    /// Which database name to use (PROD_DB or TEST_DB)
    #[arg(short, long, value_enum, default_value = "test")]
    profile: Profile,

    /// Storage engine
    #[arg(short, long, value_enum, default_value = "postgres")]
    db: Db,
}

fn parse_command(raw: &str) -> Result<MigrationCommand, String> {
    raw.parse()
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stdout)
        .without_time()
        .with_target(false)
        .with_env_filter("migration=info,migration_cli=info,sqlx=warn")
        .init();

    let args = Args::parse();

    let profile = match args.profile {
        Profile::Prod => DbProfile::Prod,
        Profile::Test => DbProfile::Test,
    };
    let kind = match args.db {
        Db::Postgres => DbKind::Postgres,
        Db::SqliteFile => DbKind::SqliteFile,
    };

    let conn = match connect_db(kind, profile).await {
        Ok(conn) => conn,
        Err(e) => {
            error!(error = %e, "could not connect");
            std::process::exit(1);
        }
    };

    if let Err(e) = migrate(&conn, args.command).await {
        error!(error = %e, command = ?args.command, "migration failed");
        std::process::exit(1);
    }
    info!(command = ?args.command, "migration finished");
}
