use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Permission, RolePermission};

pub async fn grant(
    pool: &PgPool,
    tenant_id: Uuid,
    actor: Uuid,
    role_id: Uuid,
    permission_id: Uuid,
) -> Result<RolePermission, sqlx::Error> {
    sqlx::query_as::<_, RolePermission>(
        "INSERT INTO role_permissions (id, tenant_id, role_id, permission_id, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(role_id)
    .bind(permission_id)
    .bind(actor)
    .fetch_one(pool)
    .await
}

pub async fn list_by_role(
    pool: &PgPool,
    role_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<RolePermission>, sqlx::Error> {
    sqlx::query_as::<_, RolePermission>(
        "SELECT * FROM role_permissions WHERE role_id = $1 AND tenant_id = $2 ORDER BY created_at",
    )
    .bind(role_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

/// Permissions reachable from any role the user holds.
pub async fn permissions_for_user(
    pool: &PgPool,
    user_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<Permission>, sqlx::Error> {
    sqlx::query_as::<_, Permission>(
        "SELECT DISTINCT p.* FROM permissions p
         JOIN role_permissions rp ON rp.permission_id = p.id
         JOIN user_roles ur ON ur.role_id = rp.role_id
         WHERE ur.user_id = $1 AND p.tenant_id = $2
         ORDER BY p.name",
    )
    .bind(user_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn revoke(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM role_permissions WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
