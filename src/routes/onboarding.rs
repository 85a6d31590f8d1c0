use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::PgConnection;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{FieldConfigurationInput, MemberProfileCompletion, OnboardingFieldConfiguration};
use crate::onboarding::{self, fields};
use crate::routes::members::ensure_member;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct SaveMemberData {
    pub values: Map<String, Value>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOnboardingData {
    pub member_id: Uuid,
    pub values: Map<String, Value>,
    pub completion: onboarding::Completion,
}

fn validate_configuration(req: &FieldConfigurationInput) -> Result<(), AppError> {
    if req.label.trim().is_empty() {
        return Err(AppError::BadRequest("Label is required".to_string()));
    }
    fields::validate_definition(&req.field_key, &req.field_type, req.options.as_ref())
        .map_err(AppError::BadRequest)?;
    Ok(())
}

/// Recompute every stored completion in the tenant against the current
/// field configurations. Returns how many records were rewritten.
async fn refresh_completions(
    conn: &mut PgConnection,
    tenant_id: Uuid,
    actor: Uuid,
) -> Result<usize, sqlx::Error> {
    let configs = db::onboarding_fields::list(&mut *conn, tenant_id).await?;

    let mut by_member: HashMap<Uuid, HashMap<String, Value>> = HashMap::new();
    for row in db::onboarding_values::list_by_tenant(&mut *conn, tenant_id).await? {
        by_member
            .entry(row.member_id)
            .or_default()
            .insert(row.field_key, row.value);
    }

    let member_ids = db::profile_completions::member_ids(&mut *conn, tenant_id).await?;
    let empty = HashMap::new();
    for member_id in &member_ids {
        let values = by_member.get(member_id).unwrap_or(&empty);
        let completion = onboarding::compute(&configs, values);
        db::profile_completions::upsert(&mut *conn, tenant_id, actor, *member_id, &completion)
            .await?;
    }

    tracing::debug!(%tenant_id, members = member_ids.len(), "Profile completions refreshed");
    Ok(member_ids.len())
}

// Field configurations

pub async fn list_fields(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<OnboardingFieldConfiguration>>, AppError> {
    let rows = db::onboarding_fields::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(rows))
}

/// Enabled fields in display order, as rendered on the onboarding form.
pub async fn get_form(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<OnboardingFieldConfiguration>>, AppError> {
    let rows = db::onboarding_fields::list_enabled(&state.pool, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn create_field(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<FieldConfigurationInput>,
) -> Result<Json<OnboardingFieldConfiguration>, AppError> {
    auth.require_admin()?;
    validate_configuration(&req)?;

    let mut tx = state.pool.begin().await?;
    let row = db::onboarding_fields::create(&mut *tx, auth.tenant_id(), auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A field with this key already exists"))?;
    refresh_completions(&mut *tx, auth.tenant_id(), auth.user_id).await?;
    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "onboarding_field.created",
        "onboarding_field_configuration",
        Some(row.id),
        Some(serde_json::json!({ "fieldKey": row.field_key })),
    )
    .await;

    Ok(Json(row))
}

pub async fn get_field(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<OnboardingFieldConfiguration>, AppError> {
    let row = db::onboarding_fields::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Field configuration"))?;
    Ok(Json(row))
}

pub async fn update_field(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FieldConfigurationInput>,
) -> Result<Json<OnboardingFieldConfiguration>, AppError> {
    auth.require_admin()?;
    validate_configuration(&req)?;

    let mut tx = state.pool.begin().await?;
    let row = db::onboarding_fields::update(&mut *tx, id, auth.tenant_id(), auth.user_id, &req)
        .await
        .map_err(|e| AppError::conflict_on_constraint(e, "A field with this key already exists"))?
        .ok_or_else(|| AppError::not_found("Field configuration"))?;
    refresh_completions(&mut *tx, auth.tenant_id(), auth.user_id).await?;
    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "onboarding_field.updated",
        "onboarding_field_configuration",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn delete_field(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    auth.require_admin()?;

    let mut tx = state.pool.begin().await?;
    if !db::onboarding_fields::delete(&mut *tx, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Field configuration"));
    }
    refresh_completions(&mut *tx, auth.tenant_id(), auth.user_id).await?;
    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "onboarding_field.deleted",
        "onboarding_field_configuration",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Member data

/// Check every submitted value against its enabled field definition and
/// collect all problems.
fn validate_submission(
    configs: &[OnboardingFieldConfiguration],
    values: &Map<String, Value>,
) -> Result<(), AppError> {
    let mut errors = Vec::new();

    for (key, value) in values {
        let Some(config) = configs.iter().find(|c| c.is_enabled && &c.field_key == key) else {
            errors.push(format!("Unknown field: {key}"));
            continue;
        };
        if value.is_null() {
            continue;
        }
        let field_type = match config.field_type.parse::<fields::FieldType>() {
            Ok(t) => t,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        if let Err(e) = fields::validate_value(key, field_type, config.options.as_ref(), value) {
            errors.push(e);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::BadRequest(errors.join("; ")))
    }
}

pub async fn save_member_data(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
    Json(req): Json<SaveMemberData>,
) -> Result<Json<MemberOnboardingData>, AppError> {
    let tenant_id = auth.tenant_id();
    ensure_member(&state, member_id, tenant_id).await?;

    let mut tx = state.pool.begin().await?;

    let configs = db::onboarding_fields::list(&mut *tx, tenant_id).await?;
    validate_submission(&configs, &req.values)?;

    for (key, value) in &req.values {
        if value.is_null() {
            db::onboarding_values::remove(&mut *tx, tenant_id, member_id, key).await?;
        } else {
            db::onboarding_values::upsert(&mut *tx, tenant_id, auth.user_id, member_id, key, value)
                .await?;
        }
    }

    let stored = db::onboarding_values::list_by_member(&mut *tx, member_id, tenant_id).await?;
    let values: HashMap<String, Value> = stored
        .into_iter()
        .map(|v| (v.field_key, v.value))
        .collect();

    let completion = onboarding::compute(&configs, &values);
    db::profile_completions::upsert(&mut *tx, tenant_id, auth.user_id, member_id, &completion)
        .await?;

    tx.commit().await?;

    tracing::debug!(
        %member_id,
        completed = completion.completed_fields,
        required = completion.required_fields,
        "Onboarding data saved"
    );

    audit::record(
        &state.pool,
        &auth,
        "onboarding.saved",
        "member",
        Some(member_id),
        Some(serde_json::json!({
            "fields": req.values.keys().collect::<Vec<_>>(),
            "completionPercentage": completion.completion_percentage,
        })),
    )
    .await;

    Ok(Json(MemberOnboardingData {
        member_id,
        values: values.into_iter().collect(),
        completion,
    }))
}

pub async fn get_member_data(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MemberOnboardingData>, AppError> {
    let tenant_id = auth.tenant_id();
    ensure_member(&state, member_id, tenant_id).await?;

    let configs = db::onboarding_fields::list(&state.pool, tenant_id).await?;
    let values: HashMap<String, Value> =
        db::onboarding_values::list_by_member(&state.pool, member_id, tenant_id)
            .await?
            .into_iter()
            .map(|v| (v.field_key, v.value))
            .collect();
    // Computed on read so a member who never saved still gets a figure
    let completion = onboarding::compute(&configs, &values);

    Ok(Json(MemberOnboardingData {
        member_id,
        values: values.into_iter().collect(),
        completion,
    }))
}

// Profile completion

pub async fn get_completion(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(member_id): Path<Uuid>,
) -> Result<Json<MemberProfileCompletion>, AppError> {
    let record = db::profile_completions::find_by_member(&state.pool, member_id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Profile completion"))?;
    Ok(Json(record))
}

pub async fn list_completions(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<MemberProfileCompletion>>, AppError> {
    let rows = db::profile_completions::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(rows))
}
