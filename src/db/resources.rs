use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Resource, ResourceInput};

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE tenant_id = $1 ORDER BY name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &ResourceInput,
) -> Result<Resource, sqlx::Error> {
    sqlx::query_as::<_, Resource>(
        "INSERT INTO resources (id, tenant_id, name, resource_type, capacity, is_active, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.resource_type)
    .bind(input.capacity)
    .bind(input.is_active)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>("SELECT * FROM resources WHERE id = $1 AND tenant_id = $2")
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
    input: &ResourceInput,
) -> Result<Option<Resource>, sqlx::Error> {
    sqlx::query_as::<_, Resource>(
        "UPDATE resources SET
            name = $3, resource_type = $4, capacity = $5, is_active = $6,
            updated_by = $7, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.resource_type)
    .bind(input.capacity)
    .bind(input.is_active)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resources WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
