//! Drop every managed and legacy table and recreate the UUID-keyed schema.
//!
//! Destroys all data. Refuses to run without `--confirm-destroy`.

use std::process::ExitCode;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use parlour::config;
use parlour::migrate;

const CONFIRM_FLAG: &str = "--confirm-destroy";

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !std::env::args().skip(1).any(|arg| arg == CONFIRM_FLAG) {
        eprintln!(
            "This drops every table and recreates the schema; all data is lost.\n\
             Re-run with {CONFIRM_FLAG} to proceed."
        );
        return ExitCode::from(2);
    }

    let database_url = match config::database_url_from_env() {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Invalid database configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to database: {e}");
            return ExitCode::FAILURE;
        }
    };

    match migrate::recreate_schema(&pool).await {
        Ok(report) => {
            tracing::info!(
                dropped = report.dropped.len(),
                missing = report.missing.len(),
                created = report.created.len(),
                "Migration complete"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Migration aborted: {e}");
            ExitCode::FAILURE
        }
    }
}
