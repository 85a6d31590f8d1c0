use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{encode_token, Claims};
use crate::auth::password;
use crate::db;
use crate::db::tenants::NewAdmin;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Permission, TenantInput, User};
use crate::routes::tenants::{slugify, validate_slug};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub tenant_name: Option<String>,
    pub tenant_slug: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
    pub roles: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    pub user: User,
    pub tenant_id: Uuid,
    pub roles: Vec<String>,
    pub permissions: Vec<Permission>,
}

fn issue_token(
    state: &SharedState,
    user: User,
    roles: Vec<String>,
) -> Result<Json<AuthResponse>, AppError> {
    let ttl = state.config.token_ttl_minutes;
    let claims = Claims::for_user(&user, roles.clone(), ttl);
    let access_token = encode_token(&claims, &state.config.jwt_secret)?;

    Ok(Json(AuthResponse {
        access_token,
        token_type: "Bearer",
        expires_in: ttl * 60,
        user,
        roles,
    }))
}

/// Bootstrap the first tenant and its system administrator. Closed once any
/// user exists.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if req.email.trim().is_empty() || req.name.trim().is_empty() {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }
    password::validate(&req.password)?;

    let tenant_name = req
        .tenant_name
        .clone()
        .unwrap_or_else(|| format!("{}'s Organisation", req.name));
    let slug = req.tenant_slug.clone().unwrap_or_else(|| slugify(&tenant_name));
    validate_slug(&slug)?;

    let pw_hash = password::hash(&req.password).map_err(AppError::Internal)?;

    // Advisory lock prevents concurrent bootstrap registrations
    let mut tx = state.pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock(1)")
        .execute(&mut *tx)
        .await?;

    let count = db::users::count_all(&mut *tx).await?;
    if count > 0 {
        return Err(AppError::Forbidden(
            "Registration is disabled. Ask an administrator for an account.".to_string(),
        ));
    }

    let provisioned = db::tenants::provision(
        &mut *tx,
        &TenantInput {
            name: tenant_name,
            slug,
            is_active: true,
        },
        Some(NewAdmin {
            email: req.email.trim(),
            password_hash: &pw_hash,
            name: req.name.trim(),
            is_system_admin: true,
        }),
        None,
    )
    .await?;

    tx.commit().await?;

    let user = provisioned
        .admin
        .ok_or_else(|| AppError::Internal("Bootstrap user was not created".to_string()))?;

    tracing::info!(tenant_id = %provisioned.tenant.id, "Bootstrap tenant registered");

    audit::log_event(
        &state.pool,
        provisioned.tenant.id,
        Some(user.id),
        "user.registered",
        "user",
        Some(user.id),
        None,
    )
    .await;

    issue_token(&state, user, vec![provisioned.admin_role.name])
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = db::users::find_by_email(&state.pool, &req.email).await? else {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify(&req.password, &user.password_hash).map_err(AppError::Internal)?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    let tenant_active = db::tenants::find_by_id(&state.pool, user.tenant_id)
        .await?
        .is_some_and(|t| t.is_active);

    if !user.is_active || !tenant_active {
        return Err(AppError::Unauthorized("Account is disabled".to_string()));
    }

    state.login_limiter.clear(&req.email);

    let roles = db::user_roles::role_names_for_user(&state.pool, user.id, user.tenant_id).await?;

    audit::log_event(
        &state.pool,
        user.tenant_id,
        Some(user.id),
        "user.login",
        "user",
        Some(user.id),
        None,
    )
    .await;

    issue_token(&state, user, roles)
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = db::users::find_by_id(&state.pool, auth.user_id, auth.home_tenant_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".to_string()))?;

    let permissions =
        db::role_permissions::permissions_for_user(&state.pool, user.id, user.tenant_id).await?;

    Ok(Json(MeResponse {
        user,
        tenant_id: auth.tenant_id(),
        roles: auth.roles,
        permissions,
    }))
}
