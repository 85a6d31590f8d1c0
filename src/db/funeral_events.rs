use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{FuneralEvent, FuneralEventInput};

pub async fn list(pool: &PgPool, tenant_id: Uuid) -> Result<Vec<FuneralEvent>, sqlx::Error> {
    sqlx::query_as::<_, FuneralEvent>(
        "SELECT * FROM funeral_events WHERE tenant_id = $1 ORDER BY event_date",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn list_by_claim(
    pool: &PgPool,
    claim_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<FuneralEvent>, sqlx::Error> {
    sqlx::query_as::<_, FuneralEvent>(
        "SELECT * FROM funeral_events WHERE claim_id = $1 AND tenant_id = $2 ORDER BY event_date",
    )
    .bind(claim_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &FuneralEventInput,
) -> Result<FuneralEvent, sqlx::Error> {
    sqlx::query_as::<_, FuneralEvent>(
        "INSERT INTO funeral_events
            (id, tenant_id, claim_id, title, event_date, location, status,
             asset_ids, driver_ids, decorator_ids, notes, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, COALESCE($7, 'Scheduled'), $8, $9, $10, $11, $12, $12)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.claim_id)
    .bind(&input.title)
    .bind(input.event_date)
    .bind(&input.location)
    .bind(&input.status)
    .bind(Json(&input.asset_ids))
    .bind(Json(&input.driver_ids))
    .bind(Json(&input.decorator_ids))
    .bind(&input.notes)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<FuneralEvent>, sqlx::Error> {
    sqlx::query_as::<_, FuneralEvent>(
        "SELECT * FROM funeral_events WHERE id = $1 AND tenant_id = $2",
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
    input: &FuneralEventInput,
) -> Result<Option<FuneralEvent>, sqlx::Error> {
    sqlx::query_as::<_, FuneralEvent>(
        "UPDATE funeral_events SET
            claim_id = $3, title = $4, event_date = $5, location = $6,
            status = COALESCE($7, status), asset_ids = $8, driver_ids = $9, decorator_ids = $10,
            notes = $11, updated_by = $12, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.claim_id)
    .bind(&input.title)
    .bind(input.event_date)
    .bind(&input.location)
    .bind(&input.status)
    .bind(Json(&input.asset_ids))
    .bind(Json(&input.driver_ids))
    .bind(Json(&input.decorator_ids))
    .bind(&input.notes)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM funeral_events WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
