use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Member, MemberInput};

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "SELECT * FROM members WHERE tenant_id = $1 ORDER BY last_name, first_name",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &MemberInput,
) -> Result<Member, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "INSERT INTO members
            (id, tenant_id, first_name, last_name, id_number, date_of_birth, email, phone, address,
             status, join_date, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9,
                 COALESCE($10, 'Active'), COALESCE($11, CURRENT_DATE), $12, $12)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.id_number)
    .bind(input.date_of_birth)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.address)
    .bind(&input.status)
    .bind(input.join_date)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>("SELECT * FROM members WHERE id = $1 AND tenant_id = $2")
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
    input: &MemberInput,
) -> Result<Option<Member>, sqlx::Error> {
    sqlx::query_as::<_, Member>(
        "UPDATE members SET
            first_name = $3, last_name = $4, id_number = $5, date_of_birth = $6, email = $7,
            phone = $8, address = $9, status = COALESCE($10, status),
            join_date = COALESCE($11, join_date), updated_by = $12, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.first_name)
    .bind(&input.last_name)
    .bind(&input.id_number)
    .bind(input.date_of_birth)
    .bind(&input.email)
    .bind(&input.phone)
    .bind(&input.address)
    .bind(&input.status)
    .bind(input.join_date)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM members WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
