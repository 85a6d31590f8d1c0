use sqlx::PgPool;
use uuid::Uuid;

use crate::models::UserRole;

pub async fn assign<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    tenant_id: Uuid,
    actor: Option<Uuid>,
    user_id: Uuid,
    role_id: Uuid,
) -> Result<UserRole, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "INSERT INTO user_roles (id, tenant_id, user_id, role_id, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(tenant_id)
    .bind(user_id)
    .bind(role_id)
    .bind(actor)
    .fetch_one(executor)
    .await
}

pub async fn list_by_user(
    pool: &PgPool,
    user_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<UserRole>, sqlx::Error> {
    sqlx::query_as::<_, UserRole>(
        "SELECT * FROM user_roles WHERE user_id = $1 AND tenant_id = $2 ORDER BY created_at",
    )
    .bind(user_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

/// Role names carried in the user's access token.
pub async fn role_names_for_user(
    pool: &PgPool,
    user_id: Uuid,
    tenant_id: Uuid,
) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT r.name FROM roles r
         JOIN user_roles ur ON ur.role_id = r.id
         WHERE ur.user_id = $1 AND ur.tenant_id = $2
         ORDER BY r.name",
    )
    .bind(user_id)
    .bind(tenant_id)
    .fetch_all(pool)
    .await
}

pub async fn remove(pool: &PgPool, id: Uuid, tenant_id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM user_roles WHERE id = $1 AND tenant_id = $2")
        .bind(id)
        .bind(tenant_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
