use std::collections::BTreeSet;

use sqlx::PgPool;

use crate::schema::{self, TableDef};

/// SQLSTATE for `undefined_table`.
const UNDEFINED_TABLE: &str = "42P01";

#[derive(Debug)]
pub struct MigrateError {
    pub table: String,
    pub stage: &'static str,
    pub source: sqlx::Error,
}

impl std::fmt::Display for MigrateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of table {} failed: {}", self.stage, self.table, self.source)
    }
}

impl std::error::Error for MigrateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

#[derive(Debug, Default)]
pub struct MigrationReport {
    pub dropped: Vec<String>,
    pub missing: Vec<String>,
    pub created: Vec<String>,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct TableCheck {
    pub missing: Vec<String>,
    pub unexpected: Vec<String>,
}

impl TableCheck {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Create any table (and tenant index) that does not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), MigrateError> {
    for table in schema::TABLES {
        create_table(pool, table, true).await?;
    }
    tracing::debug!("Schema ensured ({} tables)", schema::TABLES.len());
    Ok(())
}

/// Drop every managed and legacy table, then recreate the managed tables.
///
/// This destroys all data. Statements run one by one outside any transaction,
/// so a failure part-way leaves the database partially migrated.
pub async fn recreate_schema(pool: &PgPool) -> Result<MigrationReport, MigrateError> {
    let mut report = MigrationReport::default();

    // CASCADE removes dependent constraints, standing in for a global
    // foreign-key-check toggle.
    for name in schema::drop_order() {
        let sql = format!("DROP TABLE \"{name}\" CASCADE");
        match sqlx::query(&sql).execute(pool).await {
            Ok(_) => {
                tracing::info!("Dropped table {name}");
                report.dropped.push(name.to_string());
            }
            Err(sqlx::Error::Database(ref db_err))
                if db_err.code().as_deref() == Some(UNDEFINED_TABLE) =>
            {
                tracing::warn!("Table {name} not present, skipping drop");
                report.missing.push(name.to_string());
            }
            Err(e) => {
                return Err(MigrateError {
                    table: name.to_string(),
                    stage: "drop",
                    source: e,
                });
            }
        }
    }

    for table in schema::TABLES {
        create_table(pool, table, false).await?;
        tracing::info!("Created table {}", table.name);
        report.created.push(table.name.to_string());
    }

    Ok(report)
}

/// Compare expected table names with what the current schema holds.
pub async fn check_tables(pool: &PgPool) -> Result<TableCheck, sqlx::Error> {
    let present: Vec<String> = sqlx::query_scalar(
        "SELECT table_name::text FROM information_schema.tables
         WHERE table_schema = current_schema() AND table_type = 'BASE TABLE'",
    )
    .fetch_all(pool)
    .await?;

    let check = diff_tables(&schema::table_names(), &present);

    for name in &check.missing {
        tracing::warn!("Missing table: {name}");
    }
    for name in &check.unexpected {
        tracing::info!("Unexpected table: {name}");
    }
    if check.missing.is_empty() {
        tracing::info!("All {} expected tables present", schema::TABLES.len());
    }

    Ok(check)
}

pub fn diff_tables(expected: &[&str], present: &[String]) -> TableCheck {
    let present: BTreeSet<&str> = present.iter().map(String::as_str).collect();
    let expected_set: BTreeSet<&str> = expected.iter().copied().collect();

    TableCheck {
        missing: expected
            .iter()
            .filter(|name| !present.contains(*name))
            .map(|name| name.to_string())
            .collect(),
        unexpected: present
            .iter()
            .filter(|name| !expected_set.contains(*name))
            .map(|name| name.to_string())
            .collect(),
    }
}

async fn create_table(pool: &PgPool, table: &TableDef, if_not_exists: bool) -> Result<(), MigrateError> {
    sqlx::query(&table.create_sql(if_not_exists))
        .execute(pool)
        .await
        .map_err(|e| MigrateError {
            table: table.name.to_string(),
            stage: "create",
            source: e,
        })?;

    if let Some(index_sql) = table.tenant_index_sql() {
        sqlx::query(&index_sql)
            .execute(pool)
            .await
            .map_err(|e| MigrateError {
                table: table.name.to_string(),
                stage: "index",
                source: e,
            })?;
    }

    Ok(())
}
