use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{DashboardWidgetSetting, WidgetSettingInput};

pub async fn list(
    pool: &PgPool,
    tenant_id: Uuid,
) -> Result<Vec<DashboardWidgetSetting>, sqlx::Error> {
    sqlx::query_as::<_, DashboardWidgetSetting>(
        "SELECT * FROM dashboard_widget_settings WHERE tenant_id = $1
         ORDER BY display_order, widget_key",
    )
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn create(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    input: &WidgetSettingInput,
) -> Result<DashboardWidgetSetting, sqlx::Error> {
    sqlx::query_as::<_, DashboardWidgetSetting>(
        "INSERT INTO dashboard_widget_settings
            (id, tenant_id, widget_key, title, is_visible, display_order, allowed_roles,
             created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
         RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(&input.widget_key)
    .bind(&input.title)
    .bind(input.is_visible)
    .bind(input.display_order)
    .bind(&input.allowed_roles)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn find_by_id(
    pool: &PgPool,
    id: Uuid,
    tenant_id: Uuid,
) -> Result<Option<DashboardWidgetSetting>, sqlx::Error> {
    sqlx::query_as::<_, DashboardWidgetSetting>(
        "SELECT * FROM dashboard_widget_settings WHERE id = $1 AND tenant_id = $2",
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
    input: &WidgetSettingInput,
) -> Result<Option<DashboardWidgetSetting>, sqlx::Error> {
    sqlx::query_as::<_, DashboardWidgetSetting>(
        "UPDATE dashboard_widget_settings SET
            widget_key = $3, title = $4, is_visible = $5, display_order = $6, allowed_roles = $7,
            updated_by = $8, updated_at = now()
         WHERE id = $1 AND tenant_id = $2 RETURNING *",
    )
    .bind(id)
    .bind(tenant_id)
    .bind(&input.widget_key)
    .bind(&input.title)
    .bind(input.is_visible)
    .bind(input.display_order)
    .bind(&input.allowed_roles)
    .bind(actor)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM dashboard_widget_settings WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
