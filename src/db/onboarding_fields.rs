use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{FieldConfigurationInput, OnboardingFieldConfiguration};

pub async fn list<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
) -> Result<Vec<OnboardingFieldConfiguration>, sqlx::Error> {
    sqlx::query_as::<_, OnboardingFieldConfiguration>(
        "SELECT * FROM onboarding_field_configurations WHERE tenant_id = $1
         ORDER BY display_order, field_key",
    )
    .bind(tenant_id)
    .fetch_all(executor)
    .await
}

pub async fn list_enabled(
    pool: &PgPool,
    tenant_id: Uuid,
) -> Result<Vec<OnboardingFieldConfiguration>, sqlx::Error> {
    sqlx::query_as::<_, OnboardingFieldConfiguration>(
        "SELECT * FROM onboarding_field_configurations WHERE tenant_id = $1 AND is_enabled
         ORDER BY display_order, field_key",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    actor: Uuid,
    input: &FieldConfigurationInput,
) -> Result<OnboardingFieldConfiguration, sqlx::Error> {
    sqlx::query_as::<_, OnboardingFieldConfiguration>(
        "INSERT INTO onboarding_field_configurations
            (id, tenant_id, field_key, label, field_type, placeholder, options,
             is_required, is_enabled, display_order, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.field_key)
    .bind(&input.label)
    .bind(&input.field_type)
    .bind(&input.placeholder)
    .bind(&input.options)
    .bind(input.is_required)
    .bind(input.is_enabled)
    .bind(input.display_order)
    .bind(actor)
    .fetch_one(executor)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<OnboardingFieldConfiguration>, sqlx::Error> {
    sqlx::query_as::<_, OnboardingFieldConfiguration>(
        "SELECT * FROM onboarding_field_configurations WHERE id = $1 AND tenant_id = $2",
    )
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn update<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
    input: &FieldConfigurationInput,
) -> Result<Option<OnboardingFieldConfiguration>, sqlx::Error> {
    sqlx::query_as::<_, OnboardingFieldConfiguration>(
        "UPDATE onboarding_field_configurations SET
            field_key = $3, label = $4, field_type = $5, placeholder = $6, options = $7,
            is_required = $8, is_enabled = $9, display_order = $10,
            updated_by = $11, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.field_key)
    .bind(&input.label)
    .bind(&input.field_type)
    .bind(&input.placeholder)
    .bind(&input.options)
    .bind(input.is_required)
    .bind(input.is_enabled)
    .bind(input.display_order)
    .bind(actor)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "DELETE FROM onboarding_field_configurations WHERE id = $1 AND tenant_id = $2",
    )
    .bind(id)
    .bind(tenant_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
