use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardWidgetSetting {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub widget_key: String,
    pub title: String,
    pub is_visible: bool,
    pub display_order: i32,
    /// Comma-separated role names; `None` or blank means every role.
    pub allowed_roles: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSettingInput {
    pub widget_key: String,
    pub title: String,
    #[serde(default = "default_true")]
    pub is_visible: bool,
    #[serde(default)]
    pub display_order: i32,
    pub allowed_roles: Option<String>,
}

fn default_true() -> bool {
    true
}
