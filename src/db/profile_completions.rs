use sqlx::PgPool;
use uuid::Uuid;

use crate::models::MemberProfileCompletion;
use crate::onboarding::Completion;

pub async fn upsert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    actor: Uuid,
    member_id: Uuid,
    completion: &Completion,
) -> Result<MemberProfileCompletion, sqlx::Error> {
    sqlx::query_as::<_, MemberProfileCompletion>(
        "INSERT INTO member_profile_completions
            (id, tenant_id, member_id, required_fields, completed_fields, completion_percentage,
             is_complete, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
         ON CONFLICT (member_id) DO UPDATE SET
            required_fields = EXCLUDED.required_fields,
            completed_fields = EXCLUDED.completed_fields,
            completion_percentage = EXCLUDED.completion_percentage,
            is_complete = EXCLUDED.is_complete,
            updated_by = EXCLUDED.updated_by,
            updated_at = now()
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(member_id)
    .bind(completion.required_fields)
    .bind(completion.completed_fields)
    .bind(completion.completion_percentage)
    .bind(completion.is_complete)
    .bind(actor)
    .fetch_one(executor)
    .await
}

/// Members that already carry a completion record.
pub async fn member_ids<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
) -> Result<Vec<Uuid>, sqlx::Error> {
    sqlx::query_scalar("SELECT member_id FROM member_profile_completions WHERE tenant_id = $1")
        .bind(tenant_id)
        .fetch_all(executor)
        .await
}

pub async fn find_by_member(
    pool: &PgPool,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<MemberProfileCompletion>, sqlx::Error> {
    sqlx::query_as::<_, MemberProfileCompletion>(
        "SELECT * FROM member_profile_completions WHERE member_id = $1 AND tenant_id = $2",
    )
    .bind(member_id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
) -> Result<Vec<MemberProfileCompletion>, sqlx::Error> {
    sqlx::query_as::<_, MemberProfileCompletion>(
        "SELECT * FROM member_profile_completions WHERE tenant_id = $1
         ORDER BY completion_percentage, updated_at DESC",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}
