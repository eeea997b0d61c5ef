// ============================================================================
// Sidebar Infrastructure - PostgreSQL Permission Repository
// File: crates/sidebar-infrastructure/src/database/postgres/permission_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::error;

use sidebar_core::domain::{RecordKind, WorkspaceRecord};
use sidebar_core::error::LookupError;
use sidebar_core::repositories::PermissionRepository;

pub struct PgPermissionRepository {
    pool: PgPool,
}

impl PgPermissionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn table_of(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::DocType => "doctypes",
        RecordKind::Page => "pages",
        RecordKind::Report => "reports",
        RecordKind::Workspace => "workspaces",
        RecordKind::ModuleDef => "module_defs",
    }
}

fn lookup_err(kind: &str, name: &str, e: sqlx::Error) -> LookupError {
    error!("Database error looking up {} '{}': {}", kind, name, e);
    LookupError::Store {
        kind: kind.to_string(),
        name: name.to_string(),
        reason: e.to_string(),
    }
}

#[derive(Debug, FromRow)]
struct WorkspaceRow {
    pub name: String,
    pub public: bool,
    pub module: Option<String>,
}

impl From<WorkspaceRow> for WorkspaceRecord {
    fn from(row: WorkspaceRow) -> Self {
        WorkspaceRecord {
            name: row.name,
            public: row.public,
            module: row.module,
        }
    }
}

#[async_trait]
impl PermissionRepository for PgPermissionRepository {
    async fn exists(&self, kind: RecordKind, name: &str) -> Result<bool, LookupError> {
        let query = format!(
            "SELECT EXISTS (SELECT 1 FROM {} WHERE name = $1)",
            table_of(kind)
        );
        sqlx::query_scalar::<_, bool>(&query)
            .bind(name)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| lookup_err(kind.as_str(), name, e))
    }

    async fn has_read_grant(&self, doctype: &str, role: &str) -> Result<bool, LookupError> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM doctype_permissions
                WHERE doctype = $1 AND role = $2 AND permlevel = 0 AND can_read
            )
            "#,
        )
        .bind(doctype)
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| lookup_err("DocPerm", doctype, e))
    }

    async fn restricted_roles(&self, kind: RecordKind, name: &str) -> Result<Vec<String>, LookupError> {
        sqlx::query_scalar::<_, String>(
            r#"
            SELECT role FROM record_roles
            WHERE record_kind = $1 AND record_name = $2
            ORDER BY role
            "#,
        )
        .bind(kind.as_str())
        .bind(name)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| lookup_err(kind.as_str(), name, e))
    }

    async fn find_workspace(&self, name: &str) -> Result<Option<WorkspaceRecord>, LookupError> {
        let row: Option<WorkspaceRow> = sqlx::query_as(
            "SELECT name, public, module FROM workspaces WHERE name = $1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| lookup_err(RecordKind::Workspace.as_str(), name, e))?;

        Ok(row.map(|r| r.into()))
    }
}
