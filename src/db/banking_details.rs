use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{BankingDetail, BankingDetailInput};

pub async fn list_by_member(
    pool: &PgPool,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<BankingDetail>, sqlx::Error> {
    sqlx::query_as::<_, BankingDetail>(
        "SELECT * FROM banking_details WHERE member_id = $1 AND tenant_id = $2 ORDER BY created_at",
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
    input: &BankingDetailInput,
) -> Result<BankingDetail, sqlx::Error> {
    sqlx::query_as::<_, BankingDetail>(
        "INSERT INTO banking_details
            (id, tenant_id, member_id, bank_name, account_holder, account_number, branch_code,
             account_type, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.bank_name)
    .bind(&input.account_holder)
    .bind(&input.account_number)
    .bind(&input.branch_code)
    .bind(&input.account_type)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<BankingDetail>, sqlx::Error> {
    sqlx::query_as::<_, BankingDetail>(
        "SELECT * FROM banking_details WHERE id = $1 AND tenant_id = $2",
    )
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
    input: &BankingDetailInput,
) -> Result<Option<BankingDetail>, sqlx::Error> {
    sqlx::query_as::<_, BankingDetail>(
        "UPDATE banking_details SET
            member_id = $3, bank_name = $4, account_holder = $5, account_number = $6,
            branch_code = $7, account_type = $8, updated_by = $9, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(&input.bank_name)
    .bind(&input.account_holder)
    .bind(&input.account_number)
    .bind(&input.branch_code)
    .bind(&input.account_type)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM banking_details WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
