use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{
    Claim, ClaimInput, Policy, PolicyEnrollment, PolicyEnrollmentInput, PolicyInput,
};
use crate::routes::members::ensure_member;
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentFilter {
    pub member_id: Option<Uuid>,
}

#[derive(Deserialize)]
pub struct ClaimFilter {
    pub status: Option<String>,
}

async fn ensure_policy(state: &SharedState, policy_id: Uuid, tenant_id: Uuid) -> Result<Policy, AppError> {
    db::policies::find_by_id(&state.pool, policy_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Policy"))
}

fn validate_policy(req: &PolicyInput) -> Result<(), AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("Policy name is required".to_string()));
    }
    if req.coverage_amount < 0.0 || req.premium_amount < 0.0 {
        return Err(AppError::BadRequest("Amounts must not be negative".to_string()));
    }
    Ok(())
}

// Policies

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Policy>>, AppError> {
    let policies = db::policies::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(policies))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<PolicyInput>,
) -> Result<Json<Policy>, AppError> {
    validate_policy(&req)?;

    let policy = db::policies::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "policy.created", "policy", Some(policy.id), None).await;

    Ok(Json(policy))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Policy>, AppError> {
    let policy = ensure_policy(&state, id, auth.tenant_id()).await?;
    Ok(Json(policy))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PolicyInput>,
) -> Result<Json<Policy>, AppError> {
    validate_policy(&req)?;

    let policy = db::policies::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Policy"))?;

    audit::record(&state.pool, &auth, "policy.updated", "policy", Some(policy.id), None).await;

    Ok(Json(policy))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::policies::delete(&state.pool, id, auth.tenant_id())
        .await
        .map_err(|e| AppError::conflict_on_reference(e, "Policy has enrollments or claims"))?;
    if !deleted {
        return Err(AppError::not_found("Policy"));
    }

    audit::record(&state.pool, &auth, "policy.deleted", "policy", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Enrollments

pub async fn list_enrollments(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(filter): Query<EnrollmentFilter>,
) -> Result<Json<Vec<PolicyEnrollment>>, AppError> {
    let rows = db::policy_enrollments::list(&state.pool, auth.tenant_id(), filter.member_id).await?;
    Ok(Json(rows))
}

pub async fn create_enrollment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<PolicyEnrollmentInput>,
) -> Result<Json<PolicyEnrollment>, AppError> {
    let tenant_id = auth.tenant_id();
    ensure_member(&state, req.member_id, tenant_id).await?;
    ensure_policy(&state, req.policy_id, tenant_id).await?;

    let row = db::policy_enrollments::create(&state.pool, tenant_id, auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "Member is already enrolled in this policy"))?;

    audit::record(
        &state.pool,
        &auth,
        "policy_enrollment.created",
        "policy_enrollment",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn get_enrollment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PolicyEnrollment>, AppError> {
    let row = db::policy_enrollments::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Policy enrollment"))?;
    Ok(Json(row))
}

pub async fn update_enrollment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<PolicyEnrollmentInput>,
) -> Result<Json<PolicyEnrollment>, AppError> {
    let tenant_id = auth.tenant_id();
    ensure_member(&state, req.member_id, tenant_id).await?;
    ensure_policy(&state, req.policy_id, tenant_id).await?;

    let row = db::policy_enrollments::update(&state.pool, id, tenant_id, auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "Member is already enrolled in this policy"))?
        .ok_or_else(|| AppError::not_found("Policy enrollment"))?;

    audit::record(
        &state.pool,
        &auth,
        "policy_enrollment.updated",
        "policy_enrollment",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn delete_enrollment(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::policy_enrollments::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Policy enrollment"));
    }

    audit::record(
        &state.pool,
        &auth,
        "policy_enrollment.deleted",
        "policy_enrollment",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Claims

fn validate_claim(req: &ClaimInput) -> Result<(), AppError> {
    if req.claim_number.trim().is_empty() || req.deceased_name.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Claim number and deceased name are required".to_string(),
        ));
    }
    if req.amount.is_some_and(|a| a < 0.0) {
        return Err(AppError::BadRequest("Amount must not be negative".to_string()));
    }
    Ok(())
}

pub async fn list_claims(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(filter): Query<ClaimFilter>,
) -> Result<Json<Vec<Claim>>, AppError> {
    let claims = db::claims::list(&state.pool, auth.tenant_id(), filter.status.as_deref()).await?;
    Ok(Json(claims))
}

pub async fn create_claim(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ClaimInput>,
) -> Result<Json<Claim>, AppError> {
    validate_claim(&req)?;
    let tenant_id = auth.tenant_id();
    ensure_member(&state, req.member_id, tenant_id).await?;
    ensure_policy(&state, req.policy_id, tenant_id).await?;

    let claim = db::claims::create(&state.pool, tenant_id, auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A claim with this number already exists"))?;

    audit::record(
        &state.pool,
        &auth,
        "claim.created",
        "claim",
        Some(claim.id),
        Some(serde_json::json!({ "claimNumber": claim.claim_number })),
    )
    .await;

    Ok(Json(claim))
}

pub async fn get_claim(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Claim>, AppError> {
    let claim = db::claims::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Claim"))?;
    Ok(Json(claim))
}

pub async fn update_claim(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ClaimInput>,
) -> Result<Json<Claim>, AppError> {
    validate_claim(&req)?;
    let tenant_id = auth.tenant_id();
    ensure_member(&state, req.member_id, tenant_id).await?;
    ensure_policy(&state, req.policy_id, tenant_id).await?;

    let claim = db::claims::update(&state.pool, id, tenant_id, auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A claim with this number already exists"))?
        .ok_or_else(|| AppError::not_found("Claim"))?;

    audit::record(&state.pool, &auth, "claim.updated", "claim", Some(claim.id), None).await;

    Ok(Json(claim))
}

pub async fn delete_claim(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::claims::delete(&state.pool, id, auth.tenant_id())
        .await
        .map_err(|e| AppError::conflict_on_reference(e, "Claim has scheduled funeral events"))?;
    if !deleted {
        return Err(AppError::not_found("Claim"));
    }

    audit::record(&state.pool, &auth, "claim.deleted", "claim", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
