use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::assets::AssetStatus;
use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{
    Asset, AssetCheckout, AssetInput, AssetInspectionLog, CheckoutInput, InspectionInput,
};
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct AssetFilter {
    pub status: Option<String>,
}

fn parse_status(raw: &str) -> Result<AssetStatus, AppError> {
    raw.parse().map_err(AppError::BadRequest)
}

fn validate_asset(req: &AssetInput) -> Result<(), AppError> {
    if req.name.trim().is_empty() || req.asset_type.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Asset name and type are required".to_string(),
        ));
    }
    Ok(())
}

async fn ensure_asset(state: &SharedState, id: Uuid, tenant_id: Uuid) -> Result<Asset, AppError> {
    db::assets::find_by_id(&state.pool, id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Asset"))
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(filter): Query<AssetFilter>,
) -> Result<Json<Vec<Asset>>, AppError> {
    if let Some(status) = &filter.status {
        parse_status(status)?;
    }
    let assets = db::assets::list(&state.pool, auth.tenant_id(), filter.status.as_deref()).await?;
    Ok(Json(assets))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<AssetInput>,
) -> Result<Json<Asset>, AppError> {
    validate_asset(&req)?;

    let status = match req.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => AssetStatus::Available,
    };
    if status == AssetStatus::CheckedOut {
        return Err(AppError::BadRequest(
            "Assets are checked out through Asset_Checkout".to_string(),
        ));
    }

    let asset = db::assets::create(&state.pool, auth.tenant_id(), auth.user_id, &req, status).await?;

    audit::record(&state.pool, &auth, "asset.created", "asset", Some(asset.id), None).await;

    Ok(Json(asset))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Asset>, AppError> {
    let asset = ensure_asset(&state, id, auth.tenant_id()).await?;
    Ok(Json(asset))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssetInput>,
) -> Result<Json<Asset>, AppError> {
    validate_asset(&req)?;
    let tenant_id = auth.tenant_id();

    let current = ensure_asset(&state, id, tenant_id).await?;
    let current_status = parse_status(&current.status)?;
    let next_status = match req.status.as_deref() {
        Some(raw) => parse_status(raw)?,
        None => current_status,
    };

    if !current_status.can_update_to(next_status) {
        return Err(AppError::Conflict(format!(
            "Asset cannot move from {current_status} to {next_status}"
        )));
    }

    let Some(asset) = db::assets::update(
        &state.pool,
        id,
        tenant_id,
        auth.user_id,
        &req,
        current_status,
        next_status,
    )
    .await?
    else {
        // Still there means a checkout or another update won the race
        ensure_asset(&state, id, tenant_id).await?;
        return Err(AppError::Conflict(
            "Asset status changed while updating; reload and retry".to_string(),
        ));
    };

    let details = (current_status != next_status).then(|| {
        serde_json::json!({ "from": current_status.as_str(), "to": next_status.as_str() })
    });
    audit::record(&state.pool, &auth, "asset.updated", "asset", Some(asset.id), details).await;

    Ok(Json(asset))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::assets::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Asset"));
    }

    audit::record(&state.pool, &auth, "asset.deleted", "asset", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

pub async fn check_out(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CheckoutInput>,
) -> Result<Json<AssetCheckout>, AppError> {
    if req.checked_out_to.trim().is_empty() {
        return Err(AppError::BadRequest("checkedOutTo is required".to_string()));
    }
    let tenant_id = auth.tenant_id();

    let mut tx = state.pool.begin().await?;
    let checkout = db::assets::check_out(&mut *tx, id, tenant_id, auth.user_id, &req).await?;

    let Some(checkout) = checkout else {
        let asset = db::assets::find_by_id(&mut *tx, id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))?;
        return Err(AppError::Conflict(format!(
            "Asset is {} and cannot be checked out",
            asset.status
        )));
    };
    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "asset.checked_out",
        "asset",
        Some(id),
        Some(serde_json::json!({ "checkoutId": checkout.id, "to": checkout.checked_out_to })),
    )
    .await;

    Ok(Json(checkout))
}

pub async fn return_asset(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssetCheckout>, AppError> {
    let tenant_id = auth.tenant_id();

    let mut tx = state.pool.begin().await?;
    let returned = db::assets::return_asset(&mut *tx, id, tenant_id, auth.user_id).await?;

    let Some(checkout) = returned else {
        let asset = db::assets::find_by_id(&mut *tx, id, tenant_id)
            .await?
            .ok_or_else(|| AppError::not_found("Asset"))?;
        return Err(AppError::Conflict(format!(
            "Asset is {} and cannot be returned",
            asset.status
        )));
    };
    tx.commit().await?;

    audit::record(
        &state.pool,
        &auth,
        "asset.returned",
        "asset",
        Some(id),
        Some(serde_json::json!({ "checkoutId": checkout.id })),
    )
    .await;

    Ok(Json(checkout))
}

pub async fn list_checkouts(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<AssetCheckout>>, AppError> {
    ensure_asset(&state, id, auth.tenant_id()).await?;
    let rows = db::assets::list_checkouts(&state.pool, id, auth.tenant_id()).await?;
    Ok(Json(rows))
}

// Inspections

pub async fn create_inspection(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<InspectionInput>,
) -> Result<Json<AssetInspectionLog>, AppError> {
    if req.inspector.trim().is_empty() || req.condition.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Inspector and condition are required".to_string(),
        ));
    }
    ensure_asset(&state, req.asset_id, auth.tenant_id()).await?;

    let log = db::asset_inspections::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(
        &state.pool,
        &auth,
        "asset_inspection.created",
        "asset_inspection_log",
        Some(log.id),
        None,
    )
    .await;

    Ok(Json(log))
}

pub async fn list_inspections(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(asset_id): Path<Uuid>,
) -> Result<Json<Vec<AssetInspectionLog>>, AppError> {
    ensure_asset(&state, asset_id, auth.tenant_id()).await?;
    let rows = db::asset_inspections::list_by_asset(&state.pool, asset_id, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn get_inspection(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssetInspectionLog>, AppError> {
    let log = db::asset_inspections::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Inspection log"))?;
    Ok(Json(log))
}

pub async fn delete_inspection(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::asset_inspections::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Inspection log"));
    }

    audit::record(
        &state.pool,
        &auth,
        "asset_inspection.deleted",
        "asset_inspection_log",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
