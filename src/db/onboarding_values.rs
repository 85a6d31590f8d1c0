use uuid::Uuid;

use crate::models::MemberOnboardingValue;

pub async fn list_by_member<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<MemberOnboardingValue>, sqlx::Error> {
    sqlx::query_as::<_, MemberOnboardingValue>(
        "SELECT * FROM member_onboarding_values WHERE member_id = $1 AND tenant_id = $2
         ORDER BY field_key",
    )
    .bind(member_id)
    .bind(tenant_id)
    .fetch_all(executor)
    .await
}

/// Every stored value in the tenant, grouped by member.
pub async fn list_by_tenant<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
) -> Result<Vec<MemberOnboardingValue>, sqlx::Error> {
    sqlx::query_as::<_, MemberOnboardingValue>(
        "SELECT * FROM member_onboarding_values WHERE tenant_id = $1
         ORDER BY member_id, field_key",
    )
    .bind(tenant_id)
    .fetch_all(executor)
    .await
}

pub async fn upsert<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    actor: Uuid,
    member_id: Uuid,
    field_key: &str,
    value: &serde_json::Value,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "INSERT INTO member_onboarding_values
            (id, tenant_id, member_id, field_key, value, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $6)
         ON CONFLICT (member_id, field_key) DO UPDATE
         SET value = EXCLUDED.value, updated_by = EXCLUDED.updated_by, updated_at = now()",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(member_id)
    .bind(field_key)
    .bind(value)
    .bind(actor)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn remove<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    member_id: Uuid,
    field_key: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        "DELETE FROM member_onboarding_values
         WHERE tenant_id = $1 AND member_id = $2 AND field_key = $3",
    )
    .bind(tenant_id)
    .bind(member_id)
    .bind(field_key)
    .execute(executor)
    .await?;
    Ok(())
}
