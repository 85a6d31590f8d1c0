use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{
    BankingDetail, BankingDetailInput, Beneficiary, BeneficiaryInput, Dependent, DependentInput,
    Member, MemberInput,
};
use crate::state::SharedState;

fn required(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::BadRequest(format!("{field} is required")));
    }
    Ok(())
}

/// 404 unless the member exists in the acting tenant.
pub(crate) async fn ensure_member(
    state: &SharedState,
    member_id: Uuid,
    tenant_id: Uuid,
) -> Result<Member, AppError> {
    db::members::find_by_id(&state.pool, member_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Member"))
}

// Members

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Member>>, AppError> {
    let members = db::members::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(members))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<MemberInput>,
) -> Result<Json<Member>, AppError> {
    required(&req.first_name, "First name")?;
    required(&req.last_name, "Last name")?;

    let member = db::members::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "member.created", "member", Some(member.id), None).await;

    Ok(Json(member))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Member>, AppError> {
    let member = ensure_member(&state, id, auth.tenant_id()).await?;
    Ok(Json(member))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<MemberInput>,
) -> Result<Json<Member>, AppError> {
    required(&req.first_name, "First name")?;
    required(&req.last_name, "Last name")?;

    let member = db::members::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Member"))?;

    audit::record(&state.pool, &auth, "member.updated", "member", Some(member.id), None).await;

    Ok(Json(member))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    let deleted = db::members::delete(&state.pool, id, auth.tenant_id())
        .await
        .map_err(|e| AppError::conflict_on_reference(e, "Member is referenced by a claim"))?;
    if !deleted {
        return Err(AppError::not_found("Member"));
    }

    audit::record(&state.pool, &auth, "member.deleted", "member", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Beneficiaries

fn validate_beneficiary(req: &BeneficiaryInput) -> Result<(), AppError> {
    required(&req.full_name, "Full name")?;
    required(&req.relationship, "Relationship")?;
    if let Some(share) = req.share_percentage {
        if !(0.0..=100.0).contains(&share) {
            return Err(AppError::BadRequest(
                "Share percentage must be between 0 and 100".to_string(),
            ));
        }
    }
    Ok(())
}

pub async fn list_beneficiaries(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<Beneficiary>>, AppError> {
    ensure_member(&state, member_id, auth.tenant_id()).await?;
    let rows = db::beneficiaries::list_by_member(&state.pool, member_id, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn create_beneficiary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<BeneficiaryInput>,
) -> Result<Json<Beneficiary>, AppError> {
    validate_beneficiary(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::beneficiaries::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "beneficiary.created", "beneficiary", Some(row.id), None)
        .await;

    Ok(Json(row))
}

pub async fn get_beneficiary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Beneficiary>, AppError> {
    let row = db::beneficiaries::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Beneficiary"))?;
    Ok(Json(row))
}

pub async fn update_beneficiary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BeneficiaryInput>,
) -> Result<Json<Beneficiary>, AppError> {
    validate_beneficiary(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::beneficiaries::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Beneficiary"))?;

    audit::record(&state.pool, &auth, "beneficiary.updated", "beneficiary", Some(row.id), None)
        .await;

    Ok(Json(row))
}

pub async fn delete_beneficiary(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::beneficiaries::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Beneficiary"));
    }

    audit::record(&state.pool, &auth, "beneficiary.deleted", "beneficiary", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Dependents

fn validate_dependent(req: &DependentInput) -> Result<(), AppError> {
    required(&req.full_name, "Full name")?;
    required(&req.relationship, "Relationship")
}

pub async fn list_dependents(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<Dependent>>, AppError> {
    ensure_member(&state, member_id, auth.tenant_id()).await?;
    let rows = db::dependents::list_by_member(&state.pool, member_id, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn create_dependent(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<DependentInput>,
) -> Result<Json<Dependent>, AppError> {
    validate_dependent(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::dependents::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "dependent.created", "dependent", Some(row.id), None).await;

    Ok(Json(row))
}

pub async fn get_dependent(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Dependent>, AppError> {
    let row = db::dependents::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Dependent"))?;
    Ok(Json(row))
}

pub async fn update_dependent(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<DependentInput>,
) -> Result<Json<Dependent>, AppError> {
    validate_dependent(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::dependents::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Dependent"))?;

    audit::record(&state.pool, &auth, "dependent.updated", "dependent", Some(row.id), None).await;

    Ok(Json(row))
}

pub async fn delete_dependent(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::dependents::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Dependent"));
    }

    audit::record(&state.pool, &auth, "dependent.deleted", "dependent", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Banking details

fn validate_banking(req: &BankingDetailInput) -> Result<(), AppError> {
    required(&req.bank_name, "Bank name")?;
    required(&req.account_holder, "Account holder")?;
    if req.account_number.is_empty() || !req.account_number.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::BadRequest(
            "Account number must contain only digits".to_string(),
        ));
    }
    Ok(())
}

pub async fn list_banking_details(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<Vec<BankingDetail>>, AppError> {
    ensure_member(&state, member_id, auth.tenant_id()).await?;
    let rows = db::banking_details::list_by_member(&state.pool, member_id, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn create_banking_detail(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<BankingDetailInput>,
) -> Result<Json<BankingDetail>, AppError> {
    validate_banking(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::banking_details::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "banking_detail.created", "banking_detail", Some(row.id), None)
        .await;

    Ok(Json(row))
}

pub async fn get_banking_detail(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<BankingDetail>, AppError> {
    let row = db::banking_details::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Banking detail"))?;
    Ok(Json(row))
}

pub async fn update_banking_detail(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<BankingDetailInput>,
) -> Result<Json<BankingDetail>, AppError> {
    validate_banking(&req)?;
    ensure_member(&state, req.member_id, auth.tenant_id()).await?;

    let row = db::banking_details::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Banking detail"))?;

    audit::record(&state.pool, &auth, "banking_detail.updated", "banking_detail", Some(row.id), None)
        .await;

    Ok(Json(row))
}

pub async fn delete_banking_detail(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::banking_details::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Banking detail"));
    }

    audit::record(&state.pool, &auth, "banking_detail.deleted", "banking_detail", Some(id), None)
        .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
