use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// Scheduling record for a claim. The id arrays are stored as JSON and are
/// not checked against the asset or user tables.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuneralEvent {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub claim_id: Uuid,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: String,
    pub asset_ids: Json<Vec<Uuid>>,
    pub driver_ids: Json<Vec<Uuid>>,
    pub decorator_ids: Json<Vec<Uuid>>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuneralEventInput {
    pub claim_id: Uuid,
    pub title: String,
    pub event_date: DateTime<Utc>,
    pub location: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub asset_ids: Vec<Uuid>,
    #[serde(default)]
    pub driver_ids: Vec<Uuid>,
    #[serde(default)]
    pub decorator_ids: Vec<Uuid>,
    pub notes: Option<String>,
}
