use std::net::IpAddr;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub host: IpAddr,
    pub port: u16,
    pub max_body_size: usize,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let database_url = database_url_from_env()?;
        let jwt_secret = env_required("PARLOUR_JWT_SECRET")?;

        if jwt_secret.len() < 16 {
            return Err("PARLOUR_JWT_SECRET must be at least 16 characters".to_string());
        }

        let db_max_connections: u32 = env_or("PARLOUR_DB_MAX_CONNECTIONS", "10")
            .parse()
            .map_err(|e| format!("Invalid PARLOUR_DB_MAX_CONNECTIONS: {e}"))?;

        let token_ttl_minutes: i64 = env_or("PARLOUR_TOKEN_TTL_MINUTES", "60")
            .parse()
            .map_err(|e| format!("Invalid PARLOUR_TOKEN_TTL_MINUTES: {e}"))?;

        let host: IpAddr = env_or("PARLOUR_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid PARLOUR_HOST: {e}"))?;

        let port: u16 = env_or("PARLOUR_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid PARLOUR_PORT: {e}"))?;

        let max_body_size: usize = env_or("PARLOUR_MAX_BODY_SIZE", "1048576")
            .parse()
            .map_err(|e| format!("Invalid PARLOUR_MAX_BODY_SIZE: {e}"))?;

        let log_level = env_or("PARLOUR_LOG_LEVEL", "info");

        Ok(Config {
            database_url,
            db_max_connections,
            jwt_secret,
            token_ttl_minutes,
            host,
            port,
            max_body_size,
            log_level,
        })
    }
}

/// Connection string for the server and the maintenance binaries.
///
/// `DATABASE_URL` wins when set. Otherwise the URL is assembled from the
/// individual `PARLOUR_DB_*` variables, each falling back to a local
/// development default.
pub fn database_url_from_env() -> Result<String, String> {
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }

    let host = env_or("PARLOUR_DB_HOST", "localhost");
    let port: u16 = env_or("PARLOUR_DB_PORT", "5432")
        .parse()
        .map_err(|e| format!("Invalid PARLOUR_DB_PORT: {e}"))?;
    let user = env_or("PARLOUR_DB_USER", "postgres");
    let password = env_or("PARLOUR_DB_PASSWORD", "");
    let database = env_or("PARLOUR_DB_NAME", "parlour");

    Ok(build_database_url(&host, port, &user, &password, &database))
}

pub fn build_database_url(
    host: &str,
    port: u16,
    user: &str,
    password: &str,
    database: &str,
) -> String {
    if password.is_empty() {
        format!("postgres://{user}@{host}:{port}/{database}")
    } else {
        format!("postgres://{user}:{password}@{host}:{port}/{database}")
    }
}

fn env_required(key: &str) -> Result<String, String> {
    std::env::var(key).map_err(|_| format!("Missing required environment variable: {key}"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
