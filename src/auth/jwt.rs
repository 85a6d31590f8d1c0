use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;
use crate::models::User;

/// Access token payload.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    /// Home tenant. Requests run here unless a system admin sends `X-Tenant-ID`.
    pub tid: Uuid,
    /// Role names held in the home tenant when the token was issued.
    pub roles: Vec<String>,
    pub sys: bool,
    pub exp: i64,
}

impl Claims {
    pub fn new(
        user_id: Uuid,
        tenant_id: Uuid,
        roles: Vec<String>,
        is_system_admin: bool,
        ttl_minutes: i64,
    ) -> Self {
        Self {
            sub: user_id,
            tid: tenant_id,
            roles,
            sys: is_system_admin,
            exp: (Utc::now() + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }

    pub fn for_user(user: &User, roles: Vec<String>, ttl_minutes: i64) -> Self {
        Self::new(user.id, user.tenant_id, roles, user.is_system_admin, ttl_minutes)
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, AppError> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("JWT encode failed: {e}")))
}

/// Any failure (bad signature, expiry, missing claims) is a 401.
pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    let mut validation = Validation::default();
    validation.set_required_spec_claims(&["exp", "sub"]);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!("Rejected access token: {e}");
        AppError::Unauthorized("Invalid or expired token".to_string())
    })
}
