use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Claim, ClaimInput};

pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
    status: Option<&str>,
) -> Result<Vec<Claim>, sqlx::Error> {
    sqlx::query_as::<_, Claim>(
        "SELECT * FROM claims
         WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)
         ORDER BY created_at DESC",
    )
    .bind(tenant_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &ClaimInput,
) -> Result<Claim, sqlx::Error> {
    sqlx::query_as::<_, Claim>(
        "INSERT INTO claims
            (id, tenant_id, policy_id, member_id, claim_number, deceased_name, date_of_death, amount,
             status, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 0), COALESCE($9, 'Submitted'), $10, $10)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.policy_id)
    .bind(input.member_id)
    .bind(&input.claim_number)
    .bind(&input.deceased_name)
    .bind(input.date_of_death)
    .bind(input.amount)
    .bind(&input.status)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Claim>, sqlx::Error> {
    sqlx::query_as::<_, Claim>("SELECT * FROM claims WHERE id = $1 AND tenant_id = $2")
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
    input: &ClaimInput,
) -> Result<Option<Claim>, sqlx::Error> {
    sqlx::query_as::<_, Claim>(
        "UPDATE claims SET
            policy_id = $3, member_id = $4, claim_number = $5, deceased_name = $6,
            date_of_death = $7, amount = COALESCE($8, amount), status = COALESCE($9, status),
            updated_by = $10, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.policy_id)
    .bind(input.member_id)
    .bind(&input.claim_number)
    .bind(&input.deceased_name)
    .bind(input.date_of_death)
    .bind(input.amount)
    .bind(&input.status)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM claims WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
