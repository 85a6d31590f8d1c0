//! Report expected tables missing from the current schema.

use std::process::ExitCode;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use parlour::config;
use parlour::migrate;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

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

    match migrate::check_tables(&pool).await {
        Ok(check) if check.is_complete() => ExitCode::SUCCESS,
        Ok(check) => {
            tracing::error!("{} expected table(s) missing", check.missing.len());
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!("Table check failed: {e}");
            ExitCode::FAILURE
        }
    }
}
