use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::db;
use crate::models::rbac::ADMIN_ROLE;
use crate::models::{Role, Tenant, TenantInput, User};

/// Initial administrator created together with a tenant.
pub struct NewAdmin<'a> {
    pub email: &'a str,
    pub password_hash: &'a str,
    pub name: &'a str,
    pub is_system_admin: bool,
}

pub struct Provisioned {
    pub tenant: Tenant,
    pub admin_role: Role,
    pub admin: Option<User>,
}

pub async fn create<'e, E: sqlx::PgExecutor<'e>>(
    executor: E,
    input: &TenantInput,
    actor: Option<Uuid>,
) -> Result<Tenant, sqlx::Error> {
    sqlx::query_as::<_, Tenant>(
        "INSERT INTO tenants (id, name, slug, is_active, created_by, updated_by)
         VALUES ($1, $2, $3, $4, $5, $5) RETURNING *",
    )
    .bind(Uuid::now_v7())
    .bind(&input.name)
    .bind(&input.slug)
    .bind(input.is_active)
    .bind(actor)
    .fetch_one(executor)
    .await
}

/// Create a tenant with its `Admin` role and, optionally, a first user
/// holding that role. Runs on the caller's connection so it can share a
/// transaction.
pub async fn provision(
    conn: &mut PgConnection,
    input: &TenantInput,
    admin: Option<NewAdmin<'_>>,
    actor: Option<Uuid>,
) -> Result<Provisioned, sqlx::Error> {
    let tenant = create(&mut *conn, input, actor).await?;

    let admin_role = db::roles::create(
        &mut *conn,
        tenant.id,
        actor,
        ADMIN_ROLE,
        Some("Tenant administrator"),
    )
    .await?;

    let admin = match admin {
        Some(new) => {
            let user = db::users::create(
                &mut *conn,
                tenant.id,
                actor,
                new.email,
                new.password_hash,
                new.name,
                new.is_system_admin,
            )
            .await?;
            db::user_roles::assign(&mut *conn, tenant.id, actor, user.id, admin_role.id).await?;
            Some(user)
        }
        None => None,
    };

    Ok(Provisioned {
        tenant,
        admin_role,
        admin,
    })
}

pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn list(pool: &PgPool) -> Result<Vec<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>("SELECT * FROM tenants ORDER BY created_at DESC")
        .fetch_all(pool)
        .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    actor: Uuid,
    input: &TenantInput,
) -> Result<Option<Tenant>, sqlx::Error> {
    sqlx::query_as::<_, Tenant>(
        "UPDATE tenants SET name = $2, slug = $3, is_active = $4, updated_by = $5, updated_at = now()
         WHERE id = $1 RETURNING *",
    )
    .bind(id)
    .bind(&input.name)
    .bind(&input.slug)
    .bind(input.is_active)
    .bind(actor)
    .fetch_optional(pool)
    .await
}
