use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{ResourceBooking, ResourceBookingInput};

pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
    resource_id: Option<Uuid>,
) -> Result<Vec<ResourceBooking>, sqlx::Error> {
    sqlx::query_as::<_, ResourceBooking>(
        "SELECT * FROM resource_bookings
         WHERE tenant_id = $1 AND ($2::uuid IS NULL OR resource_id = $2)
         ORDER BY start_time",
    )
    .bind(tenant_id)
    .bind(resource_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &ResourceBookingInput,
) -> Result<ResourceBooking, sqlx::Error> {
    sqlx::query_as::<_, ResourceBooking>(
        "INSERT INTO resource_bookings
            (id, tenant_id, resource_id, booked_by, start_time, end_time, purpose, status,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, COALESCE($8, 'Confirmed'), $9, $9)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(input.resource_id)
    .bind(&input.booked_by)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(&input.purpose)
    .bind(&input.status)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<ResourceBooking>, sqlx::Error> {
    sqlx::query_as::<_, ResourceBooking>(
        "SELECT * FROM resource_bookings WHERE id = $1 AND tenant_id = $2",
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
    input: &ResourceBookingInput,
) -> Result<Option<ResourceBooking>, sqlx::Error> {
    sqlx::query_as::<_, ResourceBooking>(
        "UPDATE resource_bookings SET
            resource_id = $3, booked_by = $4, start_time = $5, end_time = $6, purpose = $7,
            status = COALESCE($8, status), updated_by = $9, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(input.resource_id)
    .bind(&input.booked_by)
    .bind(input.start_time)
    .bind(input.end_time)
    .bind(&input.purpose)
    .bind(&input.status)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM resource_bookings WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
