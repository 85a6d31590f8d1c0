use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Dependent, DependentInput};

pub async fn list_by_member(
    pool: &PgPool,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<Dependent>, sqlx::Error> {
    sqlx::query_as::<_, Dependent>(
        "SELECT * FROM dependents WHERE member_id = $1 AND tenant_id = $2 ORDER BY created_at",
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
    input: &DependentInput,
) -> Result<Dependent, sqlx::Error> {
    sqlx::query_as::<_, Dependent>(
        "INSERT INTO dependents
            (id, tenant_id, member_id, full_name, relationship, date_of_birth, id_number,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.full_name)
    .bind(&input.relationship)
    .bind(input.date_of_birth)
    .bind(&input.id_number)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Dependent>, sqlx::Error> {
    sqlx::query_as::<_, Dependent>("SELECT * FROM dependents WHERE id = $1 AND tenant_id = $2")
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
    input: &DependentInput,
) -> Result<Option<Dependent>, sqlx::Error> {
    sqlx::query_as::<_, Dependent>(
        "UPDATE dependents SET
            member_id = $3, full_name = $4, relationship = $5, date_of_birth = $6, id_number = $7,
            updated_by = $8, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.full_name)
    .bind(&input.relationship)
    .bind(input.date_of_birth)
    .bind(&input.id_number)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM dependents WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
