use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Policy, PolicyInput};

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Policy>, sqlx::Error> {
    sqlx::query_as::<_, Policy>("SELECT * FROM policies WHERE tenant_id = $1 ORDER BY name")
        .bind(tenant_id)
        .fetch_all(pool)
        .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &PolicyInput,
) -> Result<Policy, sqlx::Error> {
    sqlx::query_as::<_, Policy>(
        "INSERT INTO policies
            (id, tenant_id, name, description, coverage_amount, premium_amount, status,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'Active'), $8, $8)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.coverage_amount)
    .bind(input.premium_amount)
    .bind(&input.status)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Policy>, sqlx::Error> {
    sqlx::query_as::<_, Policy>("SELECT * FROM policies WHERE id = $1 AND tenant_id = $2")
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
    input: &PolicyInput,
) -> Result<Option<Policy>, sqlx::Error> {
    sqlx::query_as::<_, Policy>(
        "UPDATE policies SET
            name = $3, description = $4, coverage_amount = $5, premium_amount = $6,
            status = COALESCE($7, status), updated_by = $8, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.description)
    .bind(input.coverage_amount)
    .bind(input.premium_amount)
    .bind(&input.status)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM policies WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
