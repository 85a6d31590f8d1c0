use sqlx::PgPool;
use uuid::Uuid;

use crate::models::TenantSetting;

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<TenantSetting>, sqlx::Error> {
    sqlx::query_as::<_, TenantSetting>(
        "SELECT * FROM tenant_settings WHERE tenant_id = $1 ORDER BY setting_key",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn upsert(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    key: &str,
    value: &str,
) -> Result<TenantSetting, sqlx::Error> {
    sqlx::query_as::<_, TenantSetting>(
        "INSERT INTO tenant_settings (id, tenant_id, setting_key, setting_value, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $5)
         ON CONFLICT (tenant_id, setting_key) DO UPDATE
         SET setting_value = EXCLUDED.setting_value, updated_by = EXCLUDED.updated_by, updated_at = now()
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(key)
    .bind(value)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn delete(pool: &PgPool, tenant_id: Uuid, key: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tenant_settings WHERE tenant_id = $1 AND setting_key = $2")
        .bind(tenant_id)
        .bind(key)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
