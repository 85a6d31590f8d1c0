use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{CreateUserInput, UpdateUserInput, User};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub password: String,
}

fn validate_email(email: &str) -> Result<(), AppError> {
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("A valid email is required".to_string()));
    }
    Ok(())
}

/// Load the target user and refuse to let anyone but a system admin touch a
/// system-admin account.
async fn load_target(state: &SharedState, auth: &AuthUser, id: Uuid) -> Result<User, AppError> {
    let target = db::users::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    if target.is_system_admin && !auth.is_system_admin {
        return Err(AppError::Forbidden(
            "Only a system admin may modify a system admin account".to_string(),
        ));
    }
    Ok(target)
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<User>>, AppError> {
    auth.require_admin()?;
    let users = db::users::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(users))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUserInput>,
) -> Result<Json<User>, AppError> {
    auth.require_admin()?;

    let email = req.email.trim();
    validate_email(email)?;
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Name is required".to_string()));
    }
    password::validate(&req.password)?;
    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    let tenant_id = auth.tenant_id();
    for role_id in &req.role_ids {
        db::roles::find_by_id(&state.pool, *role_id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Role"))?;
    }

    let mut tx = state.pool.begin().await?;

    let user = db::users::create(
        &mut *tx,
        tenant_id,
        Some(auth.user_id),
        email,
        &pw_hash,
        req.name.trim(),
        false,
    )
    .await
    .map_err(|e| AppError::conflict_on_constraint(e, "A user with this email already exists"))?;

    for role_id in &req.role_ids {
        db::user_roles::assign(&mut *tx, tenant_id, Some(auth.user_id), user.id, *role_id)
            .await
            .map_err(|e| AppError::conflict_on_constraint(e, "Role listed more than once"))?;
    }

    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "user.created",
        "user",
        Some(user.id),
        Some(serde_json::json!({ "email": user.email, "roleIds": req.role_ids })),
    )
    .await;

    Ok(Json(user))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    if id != auth.user_id {
        auth.require_admin()?;
    }
    let user = db::users::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    Ok(Json(user))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateUserInput>,
) -> Result<Json<User>, AppError> {
    auth.require_admin()?;
    validate_email(req.email.trim())?;
    load_target(&state, &auth, id).await?;

    let user = db::users::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A user with this email already exists"))?
        .ok_or_else(|| AppError::not_found("User"))?;

    audit::record(&state.pool, &auth, "user.updated", "user", Some(user.id), None).await;

    Ok(Json(user))
}

pub async fn reset_password(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<Json<serde_json::Value>, AppError> {
    if id != auth.user_id {
        auth.require_admin()?;
    }
    load_target(&state, &auth, id).await?;
    password::validate(&req.password)?;
    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    if !db::users::update_password(&state.pool, id, auth.tenant_id(), auth.user_id, &pw_hash).await? {
        return Err(AppError::not_found("User"));
    }

    audit::record(&state.pool, &auth, "user.password_reset", "user", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Password updated" })))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if id == auth.user_id {
        return Err(AppError::BadRequest("You cannot delete your own account".to_string()));
    }
    load_target(&state, &auth, id).await?;

    let deleted = db::users::delete(&state.pool, id, auth.tenant_id())
        .await
        .map_err(|e| AppError::conflict_on_reference(e, "User is still referenced"))?;
    if !deleted {
        return Err(AppError::not_found("User"));
    }

    audit::record(&state.pool, &auth, "user.deleted", "user", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
