use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::auth::jwt;
use crate::db;
use crate::error::AppError;
use crate::models::rbac::ADMIN_ROLE;
use crate::state::SharedState;

/// Lets a system admin act inside another tenant.
pub const TENANT_HEADER: &str = "x-tenant-id";

/// Authenticated caller plus the tenant every query is scoped to.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    /// The tenant the user belongs to.
    pub home_tenant_id: Uuid,
    /// The tenant this request operates on.
    pub tenant_id: Uuid,
    pub roles: Vec<String>,
    pub is_system_admin: bool,
}

impl AuthUser {
    pub fn require_system_admin(&self) -> Result<(), AppError> {
        if self.is_system_admin {
            Ok(())
        } else {
            Err(AppError::Forbidden(
                "System admin access required".to_string(),
            ))
        }
    }

    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_system_admin || self.has_role(ADMIN_ROLE) {
            Ok(())
        } else {
            Err(AppError::Forbidden("Admin access required".to_string()))
        }
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }

    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }
}

impl FromRequestParts<SharedState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &SharedState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .ok_or_else(|| AppError::Unauthorized("Missing authentication token".to_string()))?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid authorization header".to_string()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))?;

        let claims = jwt::decode_token(token, &state.config.jwt_secret)?;

        let tenant_id = match parts.headers.get(TENANT_HEADER) {
            None => claims.tid,
            Some(value) => {
                let requested = value
                    .to_str()
                    .ok()
                    .and_then(|s| Uuid::parse_str(s.trim()).ok())
                    .ok_or_else(|| AppError::BadRequest("Invalid X-Tenant-ID header".to_string()))?;
                if requested != claims.tid {
                    if !claims.sys {
                        return Err(AppError::Forbidden(
                            "Cannot act on another tenant".to_string(),
                        ));
                    }
                    db::tenants::find_by_id(&state.pool, requested)
                        .await?
                        .ok_or_else(|| AppError::not_found("Tenant"))?;
                }
                requested
            }
        };

        Ok(AuthUser {
            user_id: claims.sub,
            home_tenant_id: claims.tid,
            tenant_id,
            roles: claims.roles,
            is_system_admin: claims.sys,
        })
    }
}
