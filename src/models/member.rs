use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A policyholder.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: String,
    pub join_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Beneficiary {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub full_name: String,
    pub relationship: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub share_percentage: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dependent {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub full_name: String,
    pub relationship: String,
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingDetail {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub member_id: Uuid,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub branch_code: Option<String>,
    pub account_type: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
    pub updated_by: Option<Uuid>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberInput {
    pub first_name: String,
    pub last_name: String,
    pub id_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<String>,
    pub join_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeneficiaryInput {
    pub member_id: Uuid,
    pub full_name: String,
    pub relationship: String,
    pub id_number: Option<String>,
    pub phone: Option<String>,
    pub share_percentage: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependentInput {
    pub member_id: Uuid,
    pub full_name: String,
    pub relationship: String,
    pub date_of_birth: Option<NaiveDate>,
    pub id_number: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankingDetailInput {
    pub member_id: Uuid,
    pub bank_name: String,
    pub account_holder: String,
    pub account_number: String,
    pub branch_code: Option<String>,
    pub account_type: Option<String>,
}
