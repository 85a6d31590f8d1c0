use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{
    NamedInput, Permission, Role, RolePermission, RolePermissionInput, UserRole, UserRoleInput,
};
use crate::state::SharedState;

fn validate_name(input: &NamedInput) -> Result<&str, AppError> {
    let name = input.name.trim();
    if name.is_empty() || name.len() > 100 {
        return Err(AppError::BadRequest(
            "Name must be between 1 and 100 characters".to_string(),
        ));
    }
    Ok(name)
}

// Roles

pub async fn list_roles(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Role>>, AppError> {
    let roles = db::roles::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(roles))
}

pub async fn create_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<NamedInput>,
) -> Result<Json<Role>, AppError> {
    auth.require_admin()?;
    let name = validate_name(&req)?;

    let role = db::roles::create(
        &state.pool,
        auth.tenant_id(),
        Some(auth.user_id),
        name,
        req.description.as_deref(),
    )
    .await
    .map_err(|e| AppError::conflict_on_constraint(e, "A role with this name already exists"))?;

    audit::record(&state.pool, &auth, "role.created", "role", Some(role.id), None).await;

    Ok(Json(role))
}

pub async fn get_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Role>, AppError> {
    let role = db::roles::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Role"))?;
    Ok(Json(role))
}

pub async fn update_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NamedInput>,
) -> Result<Json<Role>, AppError> {
    auth.require_admin()?;
    let name = validate_name(&req)?;

    let role = db::roles::update(
        &state.pool,
        id,
        auth.tenant_id(),
        auth.user_id,
        name,
        req.description.as_deref(),
    )
    .await
    .map_err(|e| AppError::conflict_on_constraint(e, "A role with this name already exists"))?
    .ok_or_else(|| AppError::not_found("Role"))?;

    audit::record(&state.pool, &auth, "role.updated", "role", Some(role.id), None).await;

    Ok(Json(role))
}

pub async fn delete_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::roles::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Role"));
    }

    audit::record(&state.pool, &auth, "role.deleted", "role", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Permissions

pub async fn list_permissions(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Permission>>, AppError> {
    let permissions = db::permissions::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(permissions))
}

pub async fn create_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<NamedInput>,
) -> Result<Json<Permission>, AppError> {
    auth.require_admin()?;
    let name = validate_name(&req)?;

    let permission = db::permissions::create(
        &state.pool,
        auth.tenant_id(),
        Some(auth.user_id),
        name,
        req.description.as_deref(),
    )
    .await
    .map_err(|e| {
        AppError::conflict_on_constraint(e, "A permission with this name already exists")
    })?;

    audit::record(
        &state.pool,
        &auth,
        "permission.created",
        "permission",
        Some(permission.id),
        None,
    )
    .await;

    Ok(Json(permission))
}

pub async fn get_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Permission>, AppError> {
    let permission = db::permissions::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Permission"))?;
    Ok(Json(permission))
}

pub async fn update_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<NamedInput>,
) -> Result<Json<Permission>, AppError> {
    auth.require_admin()?;
    let name = validate_name(&req)?;

    let permission = db::permissions::update(
        &state.pool,
        id,
        auth.tenant_id(),
        auth.user_id,
        name,
        req.description.as_deref(),
    )
    .await
    .map_err(|e| {
        AppError::conflict_on_constraint(e, "A permission with this name already exists")
    })?
    .ok_or_else(|| AppError::not_found("Permission"))?;

    audit::record(
        &state.pool,
        &auth,
        "permission.updated",
        "permission",
        Some(permission.id),
        None,
    )
    .await;

    Ok(Json(permission))
}

pub async fn delete_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::permissions::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Permission"));
    }

    audit::record(&state.pool, &auth, "permission.deleted", "permission", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Grants

pub async fn grant_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<RolePermissionInput>,
) -> Result<Json<RolePermission>, AppError> {
    auth.require_admin()?;
    let tenant_id = auth.tenant_id();

    // Both sides must belong to the acting tenant.
    db::roles::find_by_id(&state.pool, req.role_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Role"))?;
    db::permissions::find_by_id(&state.pool, req.permission_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Permission"))?;

    let grant = db::role_permissions::grant(
        &state.pool,
        tenant_id,
        auth.user_id,
        req.role_id,
        req.permission_id,
    )
    .await
    .map_err(|e| AppError::conflict_on_constraint(e, "Permission already granted to this role"))?;

    audit::record(
        &state.pool,
        &auth,
        "role_permission.granted",
        "role_permission",
        Some(grant.id),
        Some(serde_json::json!({ "roleId": req.role_id, "permissionId": req.permission_id })),
    )
    .await;

    Ok(Json(grant))
}

pub async fn list_role_permissions(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<Vec<RolePermission>>, AppError> {
    let grants = db::role_permissions::list_by_role(&state.pool, role_id, auth.tenant_id()).await?;
    Ok(Json(grants))
}

pub async fn revoke_permission(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::role_permissions::revoke(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Role permission"));
    }

    audit::record(
        &state.pool,
        &auth,
        "role_permission.revoked",
        "role_permission",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Assignments

pub async fn assign_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<UserRoleInput>,
) -> Result<Json<UserRole>, AppError> {
    auth.require_admin()?;
    let tenant_id = auth.tenant_id();

    db::users::find_by_id(&state.pool, req.user_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("User"))?;
    db::roles::find_by_id(&state.pool, req.role_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Role"))?;

    let assignment = db::user_roles::assign(
        &state.pool,
        tenant_id,
        Some(auth.user_id),
        req.user_id,
        req.role_id,
    )
    .await
    .map_err(|e| AppError::conflict_on_constraint(e, "User already holds this role"))?;

    audit::record(
        &state.pool,
        &auth,
        "user_role.assigned",
        "user_role",
        Some(assignment.id),
        Some(serde_json::json!({ "userId": req.user_id, "roleId": req.role_id })),
    )
    .await;

    Ok(Json(assignment))
}

pub async fn list_user_roles(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Vec<UserRole>>, AppError> {
    let assignments = db::user_roles::list_by_user(&state.pool, user_id, auth.tenant_id()).await?;
    Ok(Json(assignments))
}

pub async fn remove_role(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    if !db::user_roles::remove(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("User role"));
    }

    audit::record(&state.pool, &auth, "user_role.removed", "user_role", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
