use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{AssetInspectionLog, InspectionInput};

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &InspectionInput,
) -> Result<AssetInspectionLog, sqlx::Error> {
    sqlx::query_as::<_, AssetInspectionLog>(
        "INSERT INTO asset_inspection_logs
            (id, tenant_id, asset_id, inspected_at, inspector, condition, notes, created_by, updated_by)
         VALUES ($1, $2, $3, COALESCE($4, now()), $5, $6, $7, $8, $8)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.asset_id)
    .bind(input.inspected_at)
    .bind(&input.inspector)
    .bind(&input.condition)
    .bind(&input.notes)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn list_by_asset(
    pool: &PgPool,
    asset_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<AssetInspectionLog>, sqlx::Error> {
    sqlx::query_as::<_, AssetInspectionLog>(
        "SELECT * FROM asset_inspection_logs WHERE asset_id = $1 AND tenant_id = $2
         ORDER BY inspected_at DESC",
    )
    .bind(asset_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<AssetInspectionLog>, sqlx::Error> {
    sqlx::query_as::<_, AssetInspectionLog>(
        "SELECT * FROM asset_inspection_logs WHERE id = $1 AND tenant_id = $2",
    )
    .bind(id)
    .bind(tenant_id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM asset_inspection_logs WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
