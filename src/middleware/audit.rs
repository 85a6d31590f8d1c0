use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;

/// Record a mutation in the acting tenant's audit log. Called explicitly by
/// handlers after the write succeeds; a failed insert is logged, not raised.
pub async fn record(
    pool: &PgPool,
    auth: &AuthUser,
    action: &str,
    resource_type: &str,
    resource_id: Option<Uuid>,
    details: Option<serde_json::Value>,
) {
    log_event(
        pool,
        auth.tenant_id(),
        Some(auth.user_id),
        action,
        resource_type,
        resource_id,
        details,
    )
    .await;
}

pub async fn log_event(
    pool: &PgPool,
    tenant_id: Uuid,
    user_id: Option<Uuid>,
    action: &str,
    resource_type: &str,
    resource_id: Option<Uuid>,
    details: Option<serde_json::Value>,
) {
    if let Err(e) = crate::db::audit::log_event(
        pool,
        tenant_id,
        user_id,
        action,
        resource_type,
        resource_id,
        details,
    )
    .await
    {
        tracing::error!(action, resource_type, "Failed to log audit event: {e}");
    }
}
