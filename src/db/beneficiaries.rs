use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Beneficiary, BeneficiaryInput};

pub async fn list_by_member(
    pool: &PgPool,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<Beneficiary>, sqlx::Error> {
    sqlx::query_as::<_, Beneficiary>(
        "SELECT * FROM beneficiaries WHERE member_id = $1 AND tenant_id = $2 ORDER BY created_at",
    )
    .bind(member_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &BeneficiaryInput,
) -> Result<Beneficiary, sqlx::Error> {
    sqlx::query_as::<_, Beneficiary>(
        "INSERT INTO beneficiaries
            (id, tenant_id, member_id, full_name, relationship, id_number, phone, share_percentage,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 100), $9, $9)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.full_name)
    .bind(&input.relationship)
    .bind(&input.id_number)
    .bind(&input.phone)
    .bind(input.share_percentage)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Beneficiary>, sqlx::Error> {
    sqlx::query_as::<_, Beneficiary>("SELECT * FROM beneficiaries WHERE id = $1 AND tenant_id = $2")
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
    input: &BeneficiaryInput,
) -> Result<Option<Beneficiary>, sqlx::Error> {
    sqlx::query_as::<_, Beneficiary>(
        "UPDATE beneficiaries SET
            member_id = $3, full_name = $4, relationship = $5, id_number = $6, phone = $7,
            share_percentage = COALESCE($8, share_percentage), updated_by = $9, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.full_name)
    .bind(&input.relationship)
    .bind(&input.id_number)
    .bind(&input.phone)
    .bind(input.share_percentage)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM beneficiaries WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
