use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::assets::AssetStatus;
use crate::models::{Asset, AssetCheckout, AssetInput, CheckoutInput};

pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
    status: Option<&str>,
) -> Result<Vec<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "SELECT * FROM assets
         WHERE tenant_id = $1 AND ($2::text IS NULL OR status = $2)
         ORDER BY name",
    )
    .bind(tenant_id)
    .bind(status)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &AssetInput,
    status: AssetStatus,
) -> Result<Asset, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "INSERT INTO assets
            (id, tenant_id, name, asset_type, serial_number, location, purchase_date, status,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $9)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.asset_type)
    .bind(&input.serial_number)
    .bind(&input.location)
    .bind(input.purchase_date)
    .bind(status.as_str())
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>("SELECT * FROM assets WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .fetch_optional(executor)
        .await
}

/// Full-row update guarded on the status the caller validated against.
/// Returns `None` when the asset is missing or its status moved meanwhile.
pub async fn update(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
    input: &AssetInput,
    expected: AssetStatus,
    status: AssetStatus,
) -> Result<Option<Asset>, sqlx::Error> {
    sqlx::query_as::<_, Asset>(
        "UPDATE assets SET
            name = $3, asset_type = $4, serial_number = $5, location = $6, purchase_date = $7,
            status = $8, updated_by = $9, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 AND status = $10 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.name)
    .bind(&input.asset_type)
    .bind(&input.serial_number)
    .bind(&input.location)
    .bind(input.purchase_date)
    .bind(status.as_str())
    .bind(actor)
    .bind(expected.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM assets WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Move `from` -> `to` only if the asset is still in `from`. Returns false
/// when the asset is missing or in another state.
async fn transition(
    conn: &mut PgConnection,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
    from: AssetStatus,
    to: AssetStatus,
) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(
        "UPDATE assets SET status = $4, updated_by = $5, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 AND status = $3",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(from.as_str())
    .bind(to.as_str())
    .bind(actor)
    .execute(&mut *conn)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Mark an available asset as checked out and open a checkout record.
/// `None` means the asset was not available.
pub async fn check_out(
    conn: &mut PgConnection,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
    input: &CheckoutInput,
) -> Result<Option<AssetCheckout>, sqlx::Error> {
    if !transition(conn, id, tenant_id, actor, AssetStatus::Available, AssetStatus::CheckedOut).await? {
        return Ok(None);
    }

    let checkout = sqlx::query_as::<_, AssetCheckout>(
        "INSERT INTO asset_checkouts
            (id, tenant_id, asset_id, checked_out_to, expected_return_at, notes, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(id)
    .bind(&input.checked_out_to)
    .bind(input.expected_return_at)
    .bind(&input.notes)
    .bind(actor)
    .fetch_one(&mut *conn)
    .await?;

    Ok(Some(checkout))
}

/// Close the open checkout of a checked-out asset and make it available.
/// `None` means the asset was not checked out.
pub async fn return_asset(
    conn: &mut PgConnection,
    id: Uuid,
    tenant_id: Uuid,
    actor: Uuid,
) -> Result<Option<AssetCheckout>, sqlx::Error> {
    if !transition(conn, id, tenant_id, actor, AssetStatus::CheckedOut, AssetStatus::Available).await? {
        return Ok(None);
    }

    sqlx::query_as::<_, AssetCheckout>(
        "UPDATE asset_checkouts SET returned_at = now(), updated_by = $3, updated_at = now()
         WHERE asset_id = $1 AND tenant_id = $2 AND returned_at IS NULL
         RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(actor)
    .fetch_optional(&mut *conn)
    .await
}

pub async fn list_checkouts(
    pool: &PgPool,
    asset_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<AssetCheckout>, sqlx::Error> {
    sqlx::query_as::<_, AssetCheckout>(
        "SELECT * FROM asset_checkouts WHERE asset_id = $1 AND tenant_id = $2
         ORDER BY checked_out_at DESC",
    )
    .bind(asset_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}
