use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Permission;

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    actor: Option<Uuid>,
    name: &str,
    description: Option<&str>,
) -> Result<Permission, sqlx::Error> {
    sqlx::query_as::<_, Permission>(
        "INSERT INTO permissions (id, tenant_id, name, description, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(name)
    .bind(description)
    .bind(actor)
    .fetch_one(executor)
    .await
}

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE tenant_id = $1 ORDER BY name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>("SELECT * FROM permissions WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
    name: &str,
    description: Option<&str>,
) -> Result<Option<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>(
        "UPDATE permissions SET name = $3, description = $4, updated_by = $5, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(name)
    .bind(description)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM permissions WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
