use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Unauthorized(String),
    Forbidden(String),
    BadRequest(String),
    Conflict(String),
    RateLimited(String),
    Internal(String),
    Database(sqlx::Error),
}

impl AppError {
    pub fn not_found(entity: &str) -> AppError {
        AppError::NotFound(format!("{entity} not found"))
    }

    /// Unique violations on a write become a 409 carrying `message`.
    /// Anything else goes through the usual `sqlx::Error` mapping.
    pub fn conflict_on_constraint(err: sqlx::Error, message: &str) -> AppError {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::from(err),
        }
    }

    /// Foreign-key violations on a delete (the row is still referenced)
    /// become a 409 carrying `message`.
    pub fn conflict_on_reference(err: sqlx::Error, message: &str) -> AppError {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                AppError::Conflict(message.to_string())
            }
            _ => AppError::from(err),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::RateLimited(_) => StatusCode::TOO_MANY_REQUESTS,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::RateLimited(msg)
            | AppError::Internal(msg) => write!(f, "{}: {msg}", self.status()),
            AppError::Database(err) => write!(f, "{}: {err}", self.status()),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                "Internal server error".to_string()
            }
            AppError::Database(err) => {
                tracing::error!("Database error: {err}");
                "Internal server error".to_string()
            }
            AppError::NotFound(msg)
            | AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::RateLimited(msg) => msg,
        };

        (status, axum::Json(json!({ "error": message }))).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        // CHECK constraints back up request validation (share ranges,
        // booking windows, asset statuses). A foreign-key failure outside a
        // delete means the referenced parent does not exist.
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_check_violation() {
                return AppError::BadRequest(format!(
                    "Constraint violated: {}",
                    db_err.constraint().unwrap_or("check")
                ));
            }
            if db_err.is_foreign_key_violation() {
                return AppError::NotFound("Referenced record not found".to_string());
            }
        }
        AppError::Database(err)
    }
}
