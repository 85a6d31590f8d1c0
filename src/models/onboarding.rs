use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tenant-defined field on the member onboarding form.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingFieldConfiguration {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub placeholder: Option<String>,
    pub options: Option<serde_json::Value>,
    pub is_required: bool,
    pub is_enabled: bool,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

/// A value a member submitted for one onboarding field.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberOnboardingValue {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub field_key: String,
    pub value: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberProfileCompletion {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub required_fields: i32,
    pub completed_fields: i32,
    pub completion_percentage: f64,
    pub is_complete: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfigurationInput {
    pub field_key: String,
    pub label: String,
    pub field_type: String,
    pub placeholder: Option<String>,
    pub options: Option<serde_json::Value>,
    #[serde(default)]
    pub is_required: bool,
    #[serde(default = "default_true")]
    pub is_enabled: bool,
    #[serde(default)]
    pub display_order: i32,
}

fn default_true() -> bool {
    true
}
