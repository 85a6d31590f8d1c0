use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::db::tenants::NewAdmin;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Tenant, TenantInput, TenantSetting, TenantSettingInput, User};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenant {
    pub name: String,
    pub slug: Option<String>,
    pub admin: Option<InitialAdmin>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialAdmin {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTenant {
    pub tenant: Tenant,
    pub admin_role_id: Uuid,
    pub admin: Option<User>,
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Tenant>>, AppError> {
    auth.require_system_admin()?;
    let tenants = db::tenants::list(&state.pool).await?;
    Ok(Json(tenants))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateTenant>,
) -> Result<Json<CreatedTenant>, AppError> {
    auth.require_system_admin()?;

    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Tenant name is required".to_string()));
    }
    let slug = req.slug.clone().unwrap_or_else(|| slugify(&req.name));
    validate_slug(&slug)?;

    let pw_hash = match &req.admin {
        Some(admin) => {
            password::validate(&admin.password)?;
            Some(password::hash(&admin.password).map_err(AppError::Internal)?)
        }
        None => None,
    };

    let new_admin = match (&req.admin, &pw_hash) {
        (Some(admin), Some(hash)) => Some(NewAdmin {
            email: admin.email.trim(),
            password_hash: hash,
            name: admin.name.trim(),
            is_system_admin: false,
        }),
        _ => None,
    };

    let input = TenantInput {
        name: req.name.trim().to_string(),
        slug,
        is_active: true,
    };

    let mut tx = state.pool.begin().await?;
    let provisioned = db::tenants::provision(&mut *tx, &input, new_admin, Some(auth.user_id))
        .await
        .map_err(|e| {
            AppError::conflict_on_constraint(e, "A tenant with this slug or a user with this email already exists")
        })?;
    tx.commit().await?;

    tracing::info!(tenant_id = %provisioned.tenant.id, slug = %provisioned.tenant.slug, "Tenant created");

    audit::log_event(
        &state.pool,
        provisioned.tenant.id,
        Some(auth.user_id),
        "tenant.created",
        "tenant",
        Some(provisioned.tenant.id),
        None,
    )
    .await;

    Ok(Json(CreatedTenant {
        tenant: provisioned.tenant,
        admin_role_id: provisioned.admin_role.id,
        admin: provisioned.admin,
    }))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Tenant>, AppError> {
    if id != auth.tenant_id() {
        auth.require_system_admin()?;
    }
    let tenant = db::tenants::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found("Tenant"))?;
    Ok(Json(tenant))
}

/// The tenant the request is scoped to.
pub async fn current(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Tenant>, AppError> {
    let tenant = db::tenants::find_by_id(&state.pool, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Tenant"))?;
    Ok(Json(tenant))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TenantInput>,
) -> Result<Json<Tenant>, AppError> {
    auth.require_system_admin()?;
    validate_slug(&req.slug)?;

    let tenant = db::tenants::update(&state.pool, id, auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A tenant with this slug already exists"))?
        .ok_or_else(|| AppError::not_found("Tenant"))?;

    audit::log_event(
        &state.pool,
        tenant.id,
        Some(auth.user_id),
        "tenant.updated",
        "tenant",
        Some(tenant.id),
        None,
    )
    .await;

    Ok(Json(tenant))
}

pub async fn list_settings(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<TenantSetting>>, AppError> {
    let settings = db::tenant_settings::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(settings))
}

pub async fn upsert_setting(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<TenantSettingInput>,
) -> Result<Json<TenantSetting>, AppError> {
    auth.require_admin()?;

    let key = req.setting_key.trim();
    if key.is_empty() {
        return Err(AppError::BadRequest("Setting key is required".to_string()));
    }

    let setting = db::tenant_settings::upsert(
        &state.pool,
        auth.tenant_id(),
        auth.user_id,
        key,
        &req.setting_value,
    )
    .await?;

    audit::record(
        &state.pool,
        &auth,
        "tenant_setting.upserted",
        "tenant_setting",
        Some(setting.id),
        Some(serde_json::json!({ "key": key })),
    )
    .await;

    Ok(Json(setting))
}

pub async fn delete_setting(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(key): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::tenant_settings::delete(&state.pool, auth.tenant_id(), &key).await? {
        return Err(AppError::not_found("Setting"));
    }

    audit::record(
        &state.pool,
        &auth,
        "tenant_setting.deleted",
        "tenant_setting",
        None,
        Some(serde_json::json!({ "key": key })),
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if slug.is_empty() || slug.len() > 100 {
        return Err(AppError::BadRequest(
            "Slug must be between 1 and 100 characters".to_string(),
        ));
    }
    if !slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::BadRequest(
            "Slug must contain only lowercase letters, numbers, and hyphens".to_string(),
        ));
    }
    Ok(())
}
