use axum::extract::{Path, State};
use axum::Json;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{FuneralEvent, FuneralEventInput};
use crate::state::SharedState;

async fn ensure_claim(state: &SharedState, claim_id: Uuid, tenant_id: Uuid) -> Result<(), AppError> {
    db::claims::find_by_id(&state.pool, claim_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Claim"))?;
    Ok(())
}

fn validate_event(req: &FuneralEventInput) -> Result<(), AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::BadRequest("Title is required".to_string()));
    }
    Ok(())
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<FuneralEvent>>, AppError> {
    let events = db::funeral_events::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(events))
}

pub async fn list_by_claim(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(claim_id): Path<Uuid>,
) -> Result<Json<Vec<FuneralEvent>>, AppError> {
    ensure_claim(&state, claim_id, auth.tenant_id()).await?;
    let events = db::funeral_events::list_by_claim(&state.pool, claim_id, auth.tenant_id()).await?;
    Ok(Json(events))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<FuneralEventInput>,
) -> Result<Json<FuneralEvent>, AppError> {
    validate_event(&req)?;
    ensure_claim(&state, req.claim_id, auth.tenant_id()).await?;

    let event = db::funeral_events::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(
        &state.pool,
        &auth,
        "funeral_event.created",
        "funeral_event",
        Some(event.id),
        Some(serde_json::json!({ "claimId": event.claim_id })),
    )
    .await;

    Ok(Json(event))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FuneralEvent>, AppError> {
    let event = db::funeral_events::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Funeral event"))?;
    Ok(Json(event))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<FuneralEventInput>,
) -> Result<Json<FuneralEvent>, AppError> {
    validate_event(&req)?;
    ensure_claim(&state, req.claim_id, auth.tenant_id()).await?;

    let event = db::funeral_events::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Funeral event"))?;

    audit::record(
        &state.pool,
        &auth,
        "funeral_event.updated",
        "funeral_event",
        Some(event.id),
        None,
    )
    .await;

    Ok(Json(event))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::funeral_events::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Funeral event"));
    }

    audit::record(&state.pool, &auth, "funeral_event.deleted", "funeral_event", Some(id), None)
        .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
