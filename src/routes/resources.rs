use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::db;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{Resource, ResourceBooking, ResourceBookingInput, ResourceInput};
use crate::state::SharedState;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingFilter {
    pub resource_id: Option<Uuid>,
}

fn validate_resource(req: &ResourceInput) -> Result<(), AppError> {
    if req.name.trim().is_empty() || req.resource_type.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Resource name and type are required".to_string(),
        ));
    }
    if req.capacity.is_some_and(|c| c < 0) {
        return Err(AppError::BadRequest("Capacity must not be negative".to_string()));
    }
    Ok(())
}

pub async fn list(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<Vec<Resource>>, AppError> {
    let rows = db::resources::list(&state.pool, auth.tenant_id()).await?;
    Ok(Json(rows))
}

pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ResourceInput>,
) -> Result<Json<Resource>, AppError> {
    validate_resource(&req)?;

    let row = db::resources::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(&state.pool, &auth, "resource.created", "resource", Some(row.id), None).await;

    Ok(Json(row))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Resource>, AppError> {
    let row = db::resources::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Resource"))?;
    Ok(Json(row))
}

pub async fn update(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResourceInput>,
) -> Result<Json<Resource>, AppError> {
    validate_resource(&req)?;

    let row = db::resources::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Resource"))?;

    audit::record(&state.pool, &auth, "resource.updated", "resource", Some(row.id), None).await;

    Ok(Json(row))
}

pub async fn delete(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::resources::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Resource"));
    }

    audit::record(&state.pool, &auth, "resource.deleted", "resource", Some(id), None).await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}

// Bookings

async fn validate_booking(
    state: &SharedState,
    tenant_id: Uuid,
    req: &ResourceBookingInput,
) -> Result<(), AppError> {
    if req.booked_by.trim().is_empty() {
        return Err(AppError::BadRequest("bookedBy is required".to_string()));
    }
    if req.start_time >= req.end_time {
        return Err(AppError::BadRequest(
            "Booking must start before it ends".to_string(),
        ));
    }
    db::resources::find_by_id(&state.pool, req.resource_id, tenant_id)
        .await?
        .ok_or_else(|| AppError::not_found("Resource"))?;
    Ok(())
}

pub async fn list_bookings(
    auth: AuthUser,
    State(state): State<SharedState>,
    Query(filter): Query<BookingFilter>,
) -> Result<Json<Vec<ResourceBooking>>, AppError> {
    let rows = db::resource_bookings::list(&state.pool, auth.tenant_id(), filter.resource_id).await?;
    Ok(Json(rows))
}

pub async fn create_booking(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<ResourceBookingInput>,
) -> Result<Json<ResourceBooking>, AppError> {
    validate_booking(&state, auth.tenant_id(), &req).await?;

    let row = db::resource_bookings::create(&state.pool, auth.tenant_id(), auth.user_id, &req).await?;

    audit::record(
        &state.pool,
        &auth,
        "resource_booking.created",
        "resource_booking",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn get_booking(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResourceBooking>, AppError> {
    let row = db::resource_bookings::find_by_id(&state.pool, id, auth.tenant_id())
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;
    Ok(Json(row))
}

pub async fn update_booking(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
    Json(req): Json<ResourceBookingInput>,
) -> Result<Json<ResourceBooking>, AppError> {
    validate_booking(&state, auth.tenant_id(), &req).await?;

    let row = db::resource_bookings::update(&state.pool, id, auth.tenant_id(), auth.user_id, &req)
        .await?
        .ok_or_else(|| AppError::not_found("Booking"))?;

    audit::record(
        &state.pool,
        &auth,
        "resource_booking.updated",
        "resource_booking",
        Some(row.id),
        None,
    )
    .await;

    Ok(Json(row))
}

pub async fn delete_booking(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<Uuid>,
) -> Result<Json<serde_json::Value>, AppError> {
    if !db::resource_bookings::delete(&state.pool, id, auth.tenant_id()).await? {
        return Err(AppError::not_found("Booking"));
    }

    audit::record(
        &state.pool,
        &auth,
        "resource_booking.deleted",
        "resource_booking",
        Some(id),
        None,
    )
    .await;

    Ok(Json(serde_json::json!({ "message": "Deleted" })))
}
