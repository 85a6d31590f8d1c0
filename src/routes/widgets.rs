use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{DashboardWidgetSetting, WidgetSettingInput};
use crate::state::SharedState;
use crate::widgets;

#[derive(Deserialize)]
pub struct VisibleQuery {
    /// Comma-separated role names; the caller's own roles when absent.
    pub roles: Option<String>,
}

fn validate_widget(req: &WidgetSettingInput) -> Result<(), AppError> {
    if req.widget_key.trim().is_empty() || req.title.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Widget key and title are required".to_string(),
        ));
    }
    Ok(())
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<DashboardWidgetSetting>>, AppError> {
    let rows = db::widgets::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn get_visible(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(query): Query<VisibleQuery>,
) -> Result<Json<Vec<DashboardWidgetSetting>>, AppError> {
    let rows = db::widgets::list(&state.pool, auth.tenant_id()).await?;

    let visible = match query.roles.as_deref() {
        Some(raw) => widgets::visible_widgets(rows, &widgets::parse_roles(raw)),
        None => widgets::visible_widgets(rows, &auth.roles),
    };
    Ok(Json(visible))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<WidgetSettingInput>,
) -> Result<Json<DashboardWidgetSetting>, AppError> {
    auth.require_admin()?;
    validate_widget(&req)?;

    let row = db::widgets::create(&state.pool, auth.tenant_id(), auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A widget with this key already exists"))?;

    audit::record(
        &state.pool,
        &auth,
        "dashboard_widget.created",
        "dashboard_widget_setting",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DashboardWidgetSetting>, AppError> {
    let row = db::widgets::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Widget setting"))?;
    Ok(Json(row))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<WidgetSettingInput>,
) -> Result<Json<DashboardWidgetSetting>, AppError> {
    auth.require_admin()?;
    validate_widget(&req)?;

    let row = db::widgets::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A widget with this key already exists"))?
        .ok_or_else(|| AppError::not_found("Widget setting"))?;

    audit::record(
        &state.pool,
        &auth,
        "dashboard_widget.updated",
        "dashboard_widget_setting",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::widgets::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Widget setting"));
    }

    audit::record(
        &state.pool,
        &auth,
        "dashboard_widget.deleted",
        "dashboard_widget_setting",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
