use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub coverage_amount: f64,
    pub premium_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEnrollment {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub policy_id: Uuid,
    pub enrollment_date: NaiveDate,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub policy_id: Uuid,
    pub member_id: Uuid,
    pub claim_number: String,
    pub deceased_name: String,
    pub date_of_death: Option<NaiveDate>,
    pub amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyInput {
    pub name: String,
    pub description: Option<String>,
    pub coverage_amount: f64,
    pub premium_amount: f64,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyEnrollmentInput {
    pub member_id: Uuid,
    pub policy_id: Uuid,
    pub enrollment_date: Option<NaiveDate>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimInput {
    pub policy_id: Uuid,
    pub member_id: Uuid,
    pub claim_number: String,
    pub deceased_name: String,
    pub date_of_death: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: Option<String>,
}
