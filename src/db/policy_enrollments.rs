use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{PolicyEnrollment, PolicyEnrollmentInput};

/// All enrollments, or only one member's when `member_id` is given.
pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
    member_id: Option<Uuid>,
) -> Result<Vec<PolicyEnrollment>, sqlx::Error> {
    sqlx::query_as::<_, PolicyEnrollment>(
        "SELECT * FROM policy_enrollments
         WHERE tenant_id = $1 AND ($2::uuid IS NULL OR member_id = $2)
         ORDER BY enrollment_date DESC, created_at DESC",
    )
    .bind(tenant_id)
    .bind(member_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &PolicyEnrollmentInput,
) -> Result<PolicyEnrollment, sqlx::Error> {
    sqlx::query_as::<_, PolicyEnrollment>(
        "INSERT INTO policy_enrollments
            (id, tenant_id, member_id, policy_id, enrollment_date, status, created_by, updated_by)
         VALUES ($1, $2, $3, $4, COALESCE($5, CURRENT_DATE), COALESCE($6, 'Active'), $7, $7)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(input.policy_id)
    .bind(input.enrollment_date)
    .bind(&input.status)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<PolicyEnrollment>, sqlx::Error> {
    sqlx::query_as::<_, PolicyEnrollment>(
        "SELECT * FROM policy_enrollments WHERE id = $1 AND tenant_id = $2",
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
    input: &PolicyEnrollmentInput,
) -> Result<Option<PolicyEnrollment>, sqlx::Error> {
    sqlx::query_as::<_, PolicyEnrollment>(
        "UPDATE policy_enrollments SET
            member_id = $3, policy_id = $4, enrollment_date = COALESCE($5, enrollment_date),
            status = COALESCE($6, status), updated_by = $7, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.member_id)
    .bind(input.policy_id)
    .bind(input.enrollment_date)
    .bind(&input.status)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM policy_enrollments WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
